//! # EasyRwLock
//!
//! Idempotent guard over a [`lock_api::RawRwLock`].
//!
//! The shared and exclusive modes are tracked by separate flags and gated
//! independently: a guard that took the shared lock and later wants the
//! exclusive one keeps both facts apart. [`EasyRwLock::unlock_any`] lets
//! cleanup code release "whatever this guard holds" without knowing which
//! mode the happy path ended up in.
//!
//! Taking both modes through one guard is left to the caller. With most raw
//! locks a blocking exclusive acquire while holding shared will deadlock.
//!
//! ## Example
//! ```rust
//! use axiom_easylock::EasyRwLock;
//! use lock_api::RawRwLock;
//!
//! fn read_or_write(raw: &parking_lot::RawRwLock, write: bool) {
//!     let mut guard = EasyRwLock::new(raw);
//!     if write {
//!         guard.lock_exclusive();
//!     } else {
//!         guard.lock_shared();
//!     }
//!     // ...
//!     guard.unlock_any();
//! }
//!
//! let raw = parking_lot::RawRwLock::INIT;
//! read_or_write(&raw, true);
//! read_or_write(&raw, false);
//! assert!(!raw.is_locked());
//! ```

use core::fmt;
use core::marker::PhantomData;

use lock_api::RawRwLock;
use tracing::trace;

use crate::WouldBlock;

/// Idempotent guard over a shared/exclusive raw lock.
pub struct EasyRwLock<'a, R: RawRwLock> {
    raw: &'a R,
    held_exclusive: bool,
    held_shared: bool,
    _marker: PhantomData<R::GuardMarker>,
}

// SAFETY: the guard only hands out `&R`, which is shareable when `R: Sync`.
unsafe impl<R: RawRwLock + Sync> Sync for EasyRwLock<'_, R> {}

impl<'a, R: RawRwLock> EasyRwLock<'a, R> {
    /// Wraps `raw` without acquiring it in either mode.
    #[inline]
    pub fn new(raw: &'a R) -> Self {
        Self {
            raw,
            held_exclusive: false,
            held_shared: false,
            _marker: PhantomData,
        }
    }

    /// Acquires `raw` exclusively and returns a guard that holds it.
    #[inline]
    pub fn locked_exclusive(raw: &'a R) -> Self {
        let mut guard = Self::new(raw);
        guard.lock_exclusive();
        guard
    }

    /// Acquires `raw` in shared mode and returns a guard that holds it.
    #[inline]
    pub fn locked_shared(raw: &'a R) -> Self {
        let mut guard = Self::new(raw);
        guard.lock_shared();
        guard
    }

    /// Blocks until the exclusive lock is held. No-op if already held.
    pub fn lock_exclusive(&mut self) {
        if !self.held_exclusive {
            self.raw.lock_exclusive();
            self.held_exclusive = true;
            trace!(mode = "exclusive", "rwlock acquired");
        }
    }

    /// Attempts the exclusive lock without blocking.
    ///
    /// Returns `true` if this guard holds it afterwards. Unlike a plain
    /// [`RawRwLock::try_lock_exclusive`], a guard already holding the exclusive
    /// lock answers `true` without calling the raw lock.
    pub fn try_lock_exclusive(&mut self) -> bool {
        if self.held_exclusive {
            return true;
        }
        if self.raw.try_lock_exclusive() {
            self.held_exclusive = true;
            trace!(mode = "exclusive", "rwlock acquired without blocking");
            true
        } else {
            trace!(mode = "exclusive", "rwlock busy");
            false
        }
    }

    /// [`try_lock_exclusive`](EasyRwLock::try_lock_exclusive) as a `Result`.
    #[inline]
    pub fn try_acquire_exclusive(&mut self) -> Result<(), WouldBlock> {
        WouldBlock::check(self.try_lock_exclusive())
    }

    /// Releases the exclusive lock if this guard holds it.
    pub fn unlock_exclusive(&mut self) {
        if self.held_exclusive {
            // SAFETY: set only after this guard acquired `raw` exclusively.
            unsafe { self.raw.unlock_exclusive() };
            self.held_exclusive = false;
            trace!(mode = "exclusive", "rwlock released");
        } else {
            trace!(mode = "exclusive", "rwlock release skipped, not held");
        }
    }

    /// Blocks until the shared lock is held. No-op if already held.
    pub fn lock_shared(&mut self) {
        if !self.held_shared {
            self.raw.lock_shared();
            self.held_shared = true;
            trace!(mode = "shared", "rwlock acquired");
        }
    }

    /// Attempts the shared lock without blocking.
    ///
    /// Returns `true` if this guard holds it afterwards. A guard already
    /// holding the shared lock answers `true` without calling the raw lock.
    pub fn try_lock_shared(&mut self) -> bool {
        if self.held_shared {
            return true;
        }
        if self.raw.try_lock_shared() {
            self.held_shared = true;
            trace!(mode = "shared", "rwlock acquired without blocking");
            true
        } else {
            trace!(mode = "shared", "rwlock busy");
            false
        }
    }

    /// [`try_lock_shared`](EasyRwLock::try_lock_shared) as a `Result`.
    #[inline]
    pub fn try_acquire_shared(&mut self) -> Result<(), WouldBlock> {
        WouldBlock::check(self.try_lock_shared())
    }

    /// Releases the shared lock if this guard holds it.
    pub fn unlock_shared(&mut self) {
        if self.held_shared {
            // SAFETY: set only after this guard acquired `raw` shared.
            unsafe { self.raw.unlock_shared() };
            self.held_shared = false;
            trace!(mode = "shared", "rwlock released");
        } else {
            trace!(mode = "shared", "rwlock release skipped, not held");
        }
    }

    /// Releases the exclusive lock if held, else the shared lock if held,
    /// else does nothing. At most one mode is released per call.
    pub fn unlock_any(&mut self) {
        if self.held_exclusive {
            self.unlock_exclusive();
        } else if self.held_shared {
            self.unlock_shared();
        } else {
            trace!("rwlock release skipped, not held");
        }
    }

    /// Whether this guard holds the exclusive lock.
    #[inline]
    pub fn is_held_exclusive(&self) -> bool {
        self.held_exclusive
    }

    /// Whether this guard holds the shared lock.
    #[inline]
    pub fn is_held_shared(&self) -> bool {
        self.held_shared
    }

    /// The wrapped raw lock.
    #[inline]
    pub fn raw(&self) -> &'a R {
        self.raw
    }
}

impl<R: RawRwLock> Drop for EasyRwLock<'_, R> {
    fn drop(&mut self) {
        if self.held_exclusive {
            self.unlock_exclusive();
        }
        if self.held_shared {
            self.unlock_shared();
        }
    }
}

impl<R: RawRwLock> fmt::Debug for EasyRwLock<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasyRwLock")
            .field("held_exclusive", &self.held_exclusive)
            .field("held_shared", &self.held_shared)
            .finish_non_exhaustive()
    }
}
