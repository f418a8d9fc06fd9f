use portable_atomic::{AtomicU16, Ordering};

static SHARED: DeepSleepLock = DeepSleepLock::new();

/// A reentrant veto on deep sleep, safe to take from both thread and
/// interrupt context.
///
/// The lock is a counter: any number of independent holders may lock it
/// concurrently, and deep sleep stays vetoed until every one of them has
/// unlocked again. Lock and unlock calls must balance; the counter holds up
/// to `u16::MAX` outstanding locks.
///
/// Updates are single atomic read-modify-writes, so an interrupt handler
/// preempting a thread mid-update can never lose or double-count a call.
pub struct DeepSleepLock {
    count: AtomicU16,
}

impl DeepSleepLock {
    /// Creates an unlocked lock. Zero outstanding holders.
    pub const fn new() -> Self {
        DeepSleepLock {
            count: AtomicU16::new(0),
        }
    }

    /// Takes one reference on the lock, vetoing deep sleep until the
    /// matching [`unlock`](DeepSleepLock::lock).
    ///
    /// Locking past `u16::MAX` holders is a driver imbalance: it fails a
    /// `debug_assert!` in debug builds and saturates (the extra lock is
    /// dropped) in release builds.
    pub fn lock(&self) {
        let counted = self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                count.checked_add(1)
            });
        debug_assert!(counted.is_ok(), "deep sleep lock saturated");
    }

    /// Releases one reference on the lock.
    ///
    /// Unlocking with no lock outstanding is a driver imbalance: it fails a
    /// `debug_assert!` in debug builds and is ignored (the counter clamps at
    /// zero, it never wraps) in release builds.
    pub fn unlock(&self) {
        let counted = self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                count.checked_sub(1)
            });
        debug_assert!(counted.is_ok(), "deep sleep unlocked without a matching lock");
    }

    /// Whether deep sleep is currently permitted, i.e. no lock is
    /// outstanding. Pure read, callable from any context.
    pub fn can_deep_sleep(&self) -> bool {
        self.count.load(Ordering::Relaxed) == 0
    }

    /// Takes the lock for the lifetime of the returned guard, releasing it
    /// on every exit path including early return and unwind.
    pub fn hold(&self) -> DeepSleepGuard<'_> {
        self.lock();
        DeepSleepGuard { lock: self }
    }
}

/// Holds a [`DeepSleepLock`] reference until dropped.
#[must_use = "deep sleep is only vetoed while the guard is alive"]
pub struct DeepSleepGuard<'a> {
    lock: &'a DeepSleepLock,
}

impl Drop for DeepSleepGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

/// The process-wide lock instance consulted by the platform sleep entry
/// points. Lives for the life of the process.
pub fn deep_sleep_lock() -> &'static DeepSleepLock {
    &SHARED
}

/// Locks the process-wide deep sleep lock.
pub fn lock_deep_sleep() {
    SHARED.lock()
}

/// Unlocks the process-wide deep sleep lock.
pub fn unlock_deep_sleep() {
    SHARED.unlock()
}

/// Whether the process-wide lock currently permits deep sleep.
pub fn can_deep_sleep() -> bool {
    SHARED.can_deep_sleep()
}
