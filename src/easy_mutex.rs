//! # EasyMutex
//!
//! Idempotent guard over a [`lock_api::RawMutex`], with a non-blocking path.
//!
//! ```rust
//! use axiom_easylock::EasyMutex;
//! use lock_api::RawMutex;
//!
//! let raw = parking_lot::RawMutex::INIT;
//! let mut guard = EasyMutex::new(&raw);
//! assert!(guard.try_lock());
//!
//! let mut other = EasyMutex::new(&raw);
//! assert!(!other.try_lock());
//! assert!(other.try_acquire().is_err());
//!
//! guard.unlock();
//! assert!(other.try_lock());
//! ```

use core::fmt;
use core::marker::PhantomData;

use lock_api::RawMutex;
use tracing::trace;

use crate::WouldBlock;

/// Idempotent guard over an exclusive raw lock.
///
/// Same contract as [`EasyLocker`](crate::EasyLocker), plus
/// [`try_lock`](EasyMutex::try_lock). Sendability follows the raw lock's
/// [`GuardMarker`](RawMutex::GuardMarker).
pub struct EasyMutex<'a, R: RawMutex> {
    raw: &'a R,
    held: bool,
    _marker: PhantomData<R::GuardMarker>,
}

// SAFETY: the guard only hands out `&R`, which is shareable when `R: Sync`.
unsafe impl<R: RawMutex + Sync> Sync for EasyMutex<'_, R> {}

impl<'a, R: RawMutex> EasyMutex<'a, R> {
    /// Wraps `raw` without acquiring it.
    #[inline]
    pub fn new(raw: &'a R) -> Self {
        Self {
            raw,
            held: false,
            _marker: PhantomData,
        }
    }

    /// Acquires `raw` and returns a guard that holds it.
    #[inline]
    pub fn locked(raw: &'a R) -> Self {
        let mut guard = Self::new(raw);
        guard.lock();
        guard
    }

    /// Blocks until the lock is held. No-op if this guard already holds it.
    pub fn lock(&mut self) {
        if !self.held {
            self.raw.lock();
            self.held = true;
            trace!("mutex acquired");
        }
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// Returns `true` if this guard holds the lock afterwards. A guard that
    /// already holds it returns `true` without calling the raw lock again,
    /// unlike a plain [`RawMutex::try_lock`], which reports `false` for a lock
    /// that is already held.
    pub fn try_lock(&mut self) -> bool {
        if self.held {
            return true;
        }
        if self.raw.try_lock() {
            self.held = true;
            trace!("mutex acquired without blocking");
            true
        } else {
            trace!("mutex busy");
            false
        }
    }

    /// [`try_lock`](EasyMutex::try_lock) as a `Result`.
    #[inline]
    pub fn try_acquire(&mut self) -> Result<(), WouldBlock> {
        WouldBlock::check(self.try_lock())
    }

    /// Releases the lock if this guard holds it; otherwise does nothing.
    pub fn unlock(&mut self) {
        if self.held {
            // SAFETY: `held` is only set after this guard acquired `raw`.
            unsafe { self.raw.unlock() };
            self.held = false;
            trace!("mutex released");
        } else {
            trace!("mutex release skipped, not held");
        }
    }

    /// Whether this guard currently holds the lock.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// The wrapped raw lock.
    #[inline]
    pub fn raw(&self) -> &'a R {
        self.raw
    }
}

impl<R: RawMutex> Drop for EasyMutex<'_, R> {
    fn drop(&mut self) {
        if self.held {
            self.unlock();
        }
    }
}

impl<R: RawMutex> fmt::Debug for EasyMutex<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasyMutex")
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}
