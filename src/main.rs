//! Demo of `EasyMutex` over a `parking_lot` raw mutex.
//!
//! Eight threads bump a shared counter. Every third iteration leaves the
//! critical section early by unlocking by hand; the rest rely on the guard's
//! drop. Either way the lock is released exactly once.

use std::cell::UnsafeCell;
use std::thread;

use axiom_easylock::parking_lot::RawMutex as RawLock;
use axiom_easylock::EasyMutex;
use lock_api::RawMutex;

const THREADS: usize = 8;
const ROUNDS: usize = 100_000;

/// Counter guarded by a raw lock the demo drives by hand.
struct Counter {
    lock: RawLock,
    value: UnsafeCell<u64>,
    early_exits: UnsafeCell<u64>,
}

// Safety: both cells are only touched while `lock` is held.
unsafe impl Sync for Counter {}

static COUNTER: Counter = Counter {
    lock: RawLock::INIT,
    value: UnsafeCell::new(0),
    early_exits: UnsafeCell::new(0),
};

fn bump(round: usize) {
    let mut guard = EasyMutex::locked(&COUNTER.lock);
    unsafe { *COUNTER.value.get() += 1 };

    if round % 3 == 0 {
        unsafe { *COUNTER.early_exits.get() += 1 };
        guard.unlock();
    }

    // `guard` drops here and only unlocks if still held.
}

fn main() {
    println!("Starting easylock demo...");

    let threads: Vec<_> = (0..THREADS)
        .map(|_| thread::spawn(|| (0..ROUNDS).for_each(bump)))
        .collect();

    for t in threads {
        let _ = t.join();
    }

    let guard = EasyMutex::locked(&COUNTER.lock);
    let (value, early) = unsafe { (*COUNTER.value.get(), *COUNTER.early_exits.get()) };
    drop(guard);

    println!("Final counter value: {value} ({early} early exits)");
    assert!(!COUNTER.lock.is_locked());
}
