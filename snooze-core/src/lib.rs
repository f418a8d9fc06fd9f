//! Automatic sleep-mode arbitration for single-core microcontrollers.
//!
//! There are two sleep depths: [`SleepDepth::Light`] halts the core clock
//! only, any interrupt wakes and peripherals keep running; [`SleepDepth::Deep`]
//! additionally gates peripheral clocks, at the cost of a higher wake latency
//! and fewer wake sources.
//!
//! Drivers that depend on resources disabled during deep sleep (high
//! frequency clocks, for instance) hold the [`DeepSleepLock`] across any
//! interval where deep sleep must be suppressed. The idle path then calls
//! [`SleepArbiter::sleep_now`], which picks the deepest depth the current
//! lock state and environment allow and hands off to the platform's
//! [`SleepControl`] implementation.
//!
//! ```
//! use snooze_core::{DeepSleepLock, SleepArbiter, SleepControl, SleepDepth};
//!
//! struct Halt;
//!
//! impl SleepControl for Halt {
//!     fn enter(&mut self, _depth: SleepDepth) {
//!         // architecture specific; wfi on Cortex-M
//!     }
//!
//!     fn debug_active(&self) -> bool {
//!         false
//!     }
//! }
//!
//! static LOCK: DeepSleepLock = DeepSleepLock::new();
//!
//! let mut arbiter = SleepArbiter::new(&LOCK, Halt);
//! assert_eq!(arbiter.depth(), SleepDepth::Deep);
//!
//! let transfer = LOCK.hold();
//! assert_eq!(arbiter.depth(), SleepDepth::Light);
//! drop(transfer);
//!
//! arbiter.sleep_now();
//! ```

#![no_std]

mod arbiter;
mod lock;

pub use self::{
    arbiter::{SleepArbiter, SleepControl, SleepDepth},
    lock::{
        can_deep_sleep, deep_sleep_lock, lock_deep_sleep, unlock_deep_sleep,
        DeepSleepGuard, DeepSleepLock,
    },
};
