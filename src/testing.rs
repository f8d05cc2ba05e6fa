//! Instrumented lock used by the guard tests.

use core::sync::atomic::{AtomicUsize, Ordering::SeqCst};

use lock_api::{GuardSend, RawMutex, RawRwLock};

/// Snapshot of the calls a [`CountingLock`] has seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Calls {
    pub lock: usize,
    pub unlock: usize,
    pub lock_shared: usize,
    pub unlock_shared: usize,
    pub failed_tries: usize,
}

/// A `parking_lot` read/write lock that also counts every delegated call.
///
/// Successful non-blocking acquisitions are counted with the blocking ones.
/// A permissive lock grants every acquisition, which lets one guard hold both
/// modes at once.
pub(crate) struct CountingLock {
    inner: parking_lot::RawRwLock,
    enforce: bool,
    lock: AtomicUsize,
    unlock: AtomicUsize,
    lock_shared: AtomicUsize,
    unlock_shared: AtomicUsize,
    failed_tries: AtomicUsize,
}

impl CountingLock {
    pub(crate) fn new() -> Self {
        <Self as RawMutex>::INIT
    }

    pub(crate) fn permissive() -> Self {
        Self {
            enforce: false,
            ..Self::new()
        }
    }

    pub(crate) fn calls(&self) -> Calls {
        Calls {
            lock: self.lock.load(SeqCst),
            unlock: self.unlock.load(SeqCst),
            lock_shared: self.lock_shared.load(SeqCst),
            unlock_shared: self.unlock_shared.load(SeqCst),
            failed_tries: self.failed_tries.load(SeqCst),
        }
    }

    /// Whether the underlying lock is held in any mode.
    pub(crate) fn is_locked(&self) -> bool {
        RawRwLock::is_locked(&self.inner)
    }

    /// Whether the underlying lock is held exclusively.
    pub(crate) fn is_locked_exclusive(&self) -> bool {
        RawRwLock::is_locked_exclusive(&self.inner)
    }

    fn tally(&self, counter: &AtomicUsize, acquired: bool) -> bool {
        if acquired {
            counter.fetch_add(1, SeqCst);
        } else {
            self.failed_tries.fetch_add(1, SeqCst);
        }
        acquired
    }
}

unsafe impl RawMutex for CountingLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        inner: <parking_lot::RawRwLock as RawRwLock>::INIT,
        enforce: true,
        lock: AtomicUsize::new(0),
        unlock: AtomicUsize::new(0),
        lock_shared: AtomicUsize::new(0),
        unlock_shared: AtomicUsize::new(0),
        failed_tries: AtomicUsize::new(0),
    };

    type GuardMarker = GuardSend;

    fn lock(&self) {
        if self.enforce {
            self.inner.lock_exclusive();
        }
        self.lock.fetch_add(1, SeqCst);
    }

    fn try_lock(&self) -> bool {
        self.tally(&self.lock, !self.enforce || self.inner.try_lock_exclusive())
    }

    unsafe fn unlock(&self) {
        self.unlock.fetch_add(1, SeqCst);
        if self.enforce {
            self.inner.unlock_exclusive();
        }
    }

    fn is_locked(&self) -> bool {
        CountingLock::is_locked(self)
    }
}

unsafe impl RawRwLock for CountingLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = <Self as RawMutex>::INIT;

    type GuardMarker = GuardSend;

    fn lock_shared(&self) {
        if self.enforce {
            self.inner.lock_shared();
        }
        self.lock_shared.fetch_add(1, SeqCst);
    }

    fn try_lock_shared(&self) -> bool {
        self.tally(&self.lock_shared, !self.enforce || self.inner.try_lock_shared())
    }

    unsafe fn unlock_shared(&self) {
        self.unlock_shared.fetch_add(1, SeqCst);
        if self.enforce {
            self.inner.unlock_shared();
        }
    }

    fn lock_exclusive(&self) {
        RawMutex::lock(self);
    }

    fn try_lock_exclusive(&self) -> bool {
        RawMutex::try_lock(self)
    }

    unsafe fn unlock_exclusive(&self) {
        RawMutex::unlock(self);
    }

    fn is_locked(&self) -> bool {
        CountingLock::is_locked(self)
    }

    fn is_locked_exclusive(&self) -> bool {
        CountingLock::is_locked_exclusive(self)
    }
}
