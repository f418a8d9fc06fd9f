use cortex_m::{
    asm, interrupt,
    peripheral::{DCB, SCB},
};
use snooze_core::{deep_sleep_lock, SleepArbiter, SleepControl, SleepDepth};

const SCR_SLEEPDEEP: u32 = 1 << 2;

/// [`SleepControl`] for ARMv6/7/8-M cores.
///
/// Both depths halt via WFI; the SCR.SLEEPDEEP bit selects whether the
/// target's deep sleep state is entered. Wake-source configuration belongs
/// to the target HAL.
pub struct Wfi(());

impl Wfi {
    pub const fn new() -> Self {
        Wfi(())
    }
}

impl SleepControl for Wfi {
    fn enter(&mut self, depth: SleepDepth) {
        #[cfg(feature = "defmt")]
        defmt::trace!("sleeping at {}", depth);
        // RMW on a register shared with the rest of the system; an interrupt
        // between the write and the WFI is just an early wake.
        interrupt::free(|_| unsafe {
            (*SCB::PTR).scr.modify(|scr| match depth {
                SleepDepth::Deep => scr | SCR_SLEEPDEEP,
                SleepDepth::Light => scr & !SCR_SLEEPDEEP,
            });
        });
        asm::wfi();
    }

    fn debug_active(&self) -> bool {
        cfg!(debug_assertions) || DCB::is_debugger_attached()
    }

    fn isolation_active(&self) -> bool {
        cfg!(feature = "secure-monitor")
    }
}

/// Sends the core to the arbitrated sleep depth until an interrupt or reset
/// wakes it.
///
/// Depth selection consults the process-wide [`DeepSleepLock`]
/// (`snooze_core::lock_deep_sleep` / `unlock_deep_sleep`), the build
/// profile, and the debug port; see [`SleepArbiter::depth`].
///
/// [`DeepSleepLock`]: snooze_core::DeepSleepLock
pub fn sleep() {
    SleepArbiter::new(deep_sleep_lock(), Wfi::new()).sleep_now();
}

/// Sends the core to deep sleep.
///
/// Deep sleep can no longer be forced; this routes through the same
/// automatic arbitration as [`sleep`].
#[deprecated(since = "0.2.0", note = "one entry point for an application, use `sleep()`")]
pub fn deepsleep() {
    sleep()
}
