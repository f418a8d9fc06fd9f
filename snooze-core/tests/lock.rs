use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use snooze_core::DeepSleepLock;

#[test]
fn fresh_lock_permits_deep_sleep() {
    let lock = DeepSleepLock::new();
    assert!(lock.can_deep_sleep());
}

#[test]
fn single_lock_unlock_round_trip() {
    let lock = DeepSleepLock::new();
    lock.lock();
    assert!(!lock.can_deep_sleep());
    lock.unlock();
    assert!(lock.can_deep_sleep());
}

#[test]
fn reentrant_holders_all_must_release() {
    let lock = DeepSleepLock::new();
    for _ in 0..5 {
        lock.lock();
    }
    for _ in 0..4 {
        lock.unlock();
        assert!(!lock.can_deep_sleep());
    }
    lock.unlock();
    assert!(lock.can_deep_sleep());
}

#[test]
fn guard_releases_on_drop() {
    let lock = DeepSleepLock::new();
    {
        let _transfer = lock.hold();
        assert!(!lock.can_deep_sleep());
    }
    assert!(lock.can_deep_sleep());
}

#[test]
fn guard_releases_on_unwind() {
    let lock = DeepSleepLock::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _transfer = lock.hold();
        panic!("driver fault");
    }));
    assert!(result.is_err());
    assert!(lock.can_deep_sleep());
}

#[test]
fn interleaved_contexts_balance_out() {
    let lock = DeepSleepLock::new();
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..10_000 {
                    lock.lock();
                    lock.unlock();
                }
            });
        }
    });
    assert!(lock.can_deep_sleep());
}

#[test]
fn net_effect_matches_locks_minus_unlocks() {
    let lock = DeepSleepLock::new();
    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..1_000 {
                lock.lock();
            }
        });
        s.spawn(|| {
            for _ in 0..600 {
                lock.lock();
            }
        });
    });
    for _ in 0..1_599 {
        lock.unlock();
        assert!(!lock.can_deep_sleep());
    }
    lock.unlock();
    assert!(lock.can_deep_sleep());
}

#[test]
fn shared_lock_free_function_surface() {
    use snooze_core::{can_deep_sleep, deep_sleep_lock, lock_deep_sleep, unlock_deep_sleep};

    // No other test touches the shared instance.
    assert!(can_deep_sleep());
    lock_deep_sleep();
    assert!(!can_deep_sleep());
    assert!(!deep_sleep_lock().can_deep_sleep());
    unlock_deep_sleep();
    assert!(can_deep_sleep());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "deep sleep unlocked without a matching lock")]
fn unbalanced_unlock_is_fatal_in_debug() {
    let lock = DeepSleepLock::new();
    lock.unlock();
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "deep sleep lock saturated")]
fn lock_past_saturation_is_fatal_in_debug() {
    let lock = DeepSleepLock::new();
    for _ in 0..=u16::MAX as u32 {
        lock.lock();
    }
}

#[cfg(not(debug_assertions))]
#[test]
fn unbalanced_unlock_clamps_in_release() {
    let lock = DeepSleepLock::new();
    lock.unlock();
    assert!(lock.can_deep_sleep());
    // The counter must not have wrapped to u16::MAX.
    lock.lock();
    assert!(!lock.can_deep_sleep());
    lock.unlock();
    assert!(lock.can_deep_sleep());
}

#[cfg(not(debug_assertions))]
#[test]
fn lock_past_saturation_clamps_in_release() {
    let lock = DeepSleepLock::new();
    for _ in 0..=u16::MAX as u32 {
        lock.lock();
    }
    // The saturated lock was dropped, so u16::MAX unlocks balance.
    for _ in 0..u16::MAX {
        lock.unlock();
    }
    assert!(lock.can_deep_sleep());
}
