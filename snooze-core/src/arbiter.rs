use crate::lock::DeepSleepLock;

/// How deeply the core is allowed to sleep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepDepth {
    /// Halt the core clock only; peripherals stay clocked and any interrupt
    /// wakes.
    Light,
    /// Gate peripheral clocks too; wake only via external interrupt or
    /// watchdog, with higher wake latency.
    Deep,
}

/// Platform collaborators the arbiter needs: the hardware sleep primitive
/// and the environment flags that constrain it.
pub trait SleepControl {
    /// Halts the core at `depth` until an interrupt or reset occurs.
    ///
    /// Blocks the calling execution context and returns after wake. The wake
    /// reason is not reported; identifying it is the wake-source layer's
    /// job.
    fn enter(&mut self, depth: SleepDepth);

    /// Whether a debug build or live debug session rules out deep sleep
    /// (deep sleep would disconnect the debug channel).
    fn debug_active(&self) -> bool;

    /// Whether a secure/monitor execution mode currently forbids delegating
    /// sleep control to this layer.
    fn isolation_active(&self) -> bool {
        false
    }
}

/// Picks a sleep depth from the lock state and environment, then delegates
/// to the platform.
///
/// The decision is stateless and computed fresh on every call; the arbiter
/// itself only borrows the lock and owns the platform handle.
pub struct SleepArbiter<'a, C> {
    lock: &'a DeepSleepLock,
    control: C,
}

impl<'a, C: SleepControl> SleepArbiter<'a, C> {
    pub fn new(lock: &'a DeepSleepLock, control: C) -> Self {
        SleepArbiter { lock, control }
    }

    /// The depth the arbiter would select right now.
    ///
    /// Isolation mode and debug mode each force [`SleepDepth::Light`], in
    /// that order of precedence; otherwise the lock decides.
    pub fn depth(&self) -> SleepDepth {
        if self.control.isolation_active() || self.control.debug_active() {
            SleepDepth::Light
        } else if self.lock.can_deep_sleep() {
            SleepDepth::Deep
        } else {
            SleepDepth::Light
        }
    }

    /// Enters the arbitrated sleep depth, blocking until a wake event.
    ///
    /// Invokes the hardware primitive exactly once per call, except under
    /// isolation mode where sleeping is skipped entirely rather than
    /// downgraded.
    pub fn sleep_now(&mut self) {
        if self.control.isolation_active() {
            return;
        }
        let depth = self.depth();
        self.control.enter(depth);
    }

    /// Requests deep sleep.
    ///
    /// Callers can no longer force the depth; this routes to the same
    /// automatic arbitration as [`sleep_now`](SleepArbiter::sleep_now).
    #[deprecated(since = "0.2.0", note = "one entry point for an application, use `sleep_now`")]
    pub fn deep_sleep(&mut self) {
        self.sleep_now()
    }
}
