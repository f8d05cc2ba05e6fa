//! # Locker
//!
//! The plain lock/unlock capability and the idempotent guard over it.
//!
//! [`Locker`] is the smallest lock interface this crate understands: no
//! non-blocking path, no modes. Every [`lock_api::RawMutex`] is a `Locker`, and
//! the [`ReadLocker`] and [`WriteLocker`] views turn either mode of a
//! [`lock_api::RawRwLock`] into one. The trait is object safe, so an
//! [`EasyLocker`] can also sit on top of a `&dyn Locker`.
//!
//! ## Example
//! ```rust
//! use axiom_easylock::{EasyLocker, Locker, ReadLocker};
//! use lock_api::RawRwLock;
//!
//! let raw = parking_lot::RawRwLock::INIT;
//! let locker: &dyn Locker = ReadLocker::new(&raw);
//!
//! let mut guard = EasyLocker::locked(locker);
//! assert!(raw.is_locked() && !raw.is_locked_exclusive());
//!
//! guard.unlock();
//! guard.unlock(); // no-op
//! drop(guard); // no-op
//! assert!(!raw.is_locked());
//! ```

use core::marker::PhantomData;

use lock_api::{RawMutex, RawRwLock};
use tracing::trace;

/// A lock that can be acquired and released, nothing more.
pub trait Locker {
    /// Blocks until the lock is acquired.
    fn lock(&self);

    /// Releases the lock.
    ///
    /// # Safety
    /// The lock must be held, acquired through [`Locker::lock`] on this same
    /// handle.
    unsafe fn unlock(&self);
}

impl<R: RawMutex> Locker for R {
    #[inline]
    fn lock(&self) {
        RawMutex::lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        RawMutex::unlock(self)
    }
}

/// Presents the shared mode of a read/write lock as a [`Locker`].
#[repr(transparent)]
pub struct ReadLocker<R>(R);

/// Presents the exclusive mode of a read/write lock as a [`Locker`].
#[repr(transparent)]
pub struct WriteLocker<R>(R);

impl<R: RawRwLock> ReadLocker<R> {
    /// Views `raw` through its shared mode.
    #[inline]
    pub fn new(raw: &R) -> &Self {
        // SAFETY: `ReadLocker<R>` is a transparent wrapper around `R`.
        unsafe { &*(raw as *const R as *const Self) }
    }

    /// The wrapped read/write lock.
    #[inline]
    pub fn raw(&self) -> &R {
        &self.0
    }
}

impl<R: RawRwLock> WriteLocker<R> {
    /// Views `raw` through its exclusive mode.
    #[inline]
    pub fn new(raw: &R) -> &Self {
        // SAFETY: `WriteLocker<R>` is a transparent wrapper around `R`.
        unsafe { &*(raw as *const R as *const Self) }
    }

    /// The wrapped read/write lock.
    #[inline]
    pub fn raw(&self) -> &R {
        &self.0
    }
}

impl<R: RawRwLock> Locker for ReadLocker<R> {
    #[inline]
    fn lock(&self) {
        self.0.lock_shared()
    }

    #[inline]
    unsafe fn unlock(&self) {
        self.0.unlock_shared()
    }
}

impl<R: RawRwLock> Locker for WriteLocker<R> {
    #[inline]
    fn lock(&self) {
        self.0.lock_exclusive()
    }

    #[inline]
    unsafe fn unlock(&self) {
        self.0.unlock_exclusive()
    }
}

/// Idempotent guard over a [`Locker`].
///
/// Tracks whether *this guard* holds the lock. [`lock`](EasyLocker::lock) while
/// held and [`unlock`](EasyLocker::unlock) while not held never reach the
/// underlying lock, so the lock can be released early on one path and released
/// again unconditionally on the way out. Dropping the guard releases the lock
/// if it is still held.
///
/// The guard does not own the lock; other handles may share it. It is `!Send`
/// because a `Locker` makes no promise about being unlocked from another
/// thread.
pub struct EasyLocker<'a, L: Locker + ?Sized> {
    locker: &'a L,
    held: bool,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: Locker + ?Sized> EasyLocker<'a, L> {
    /// Wraps `locker` without acquiring it.
    #[inline]
    pub fn new(locker: &'a L) -> Self {
        Self {
            locker,
            held: false,
            _not_send: PhantomData,
        }
    }

    /// Acquires `locker` and returns a guard that holds it.
    #[inline]
    pub fn locked(locker: &'a L) -> Self {
        let mut guard = Self::new(locker);
        guard.lock();
        guard
    }

    /// Blocks until the lock is held. No-op if this guard already holds it.
    pub fn lock(&mut self) {
        if !self.held {
            self.locker.lock();
            self.held = true;
            trace!("locker acquired");
        }
    }

    /// Releases the lock if this guard holds it; otherwise does nothing.
    pub fn unlock(&mut self) {
        if self.held {
            // SAFETY: `held` is only set after a successful `lock` through
            // this same handle.
            unsafe { self.locker.unlock() };
            self.held = false;
            trace!("locker released");
        } else {
            trace!("locker release skipped, not held");
        }
    }

    /// Whether this guard currently holds the lock.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// The wrapped locker.
    #[inline]
    pub fn locker(&self) -> &'a L {
        self.locker
    }
}

impl<L: Locker + ?Sized> Drop for EasyLocker<'_, L> {
    fn drop(&mut self) {
        if self.held {
            self.unlock();
        }
    }
}

impl<L: Locker + ?Sized> core::fmt::Debug for EasyLocker<'_, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EasyLocker")
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}
