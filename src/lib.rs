//! # axiom-easylock 🔓
//!
//! Lock guards you can **always** release.
//!
//! Each guard remembers whether *it* currently holds its lock. Acquiring
//! while held and releasing while not held are silent no-ops, so a function
//! can drop the lock early on one path and still release unconditionally on
//! every way out, without a double unlock or a self-deadlock.
//!
//! The crate includes:
//!
//! - [`EasyLocker`] — guard over any plain [`Locker`] (lock/unlock only).
//! - [`EasyMutex`] — guard over a [`lock_api::RawMutex`], with `try_lock`.
//! - [`EasyRwLock`] — guard over a [`lock_api::RawRwLock`], tracking shared
//!   and exclusive mode separately.
//!
//! The guards do no locking of their own. Any `lock_api` raw lock goes
//! underneath; with `std`, [`parking_lot`] is re-exported as the default
//! source of raw locks.
//!
//! ## 🚀 Quick Example
//!
//! ```rust
//! use axiom_easylock::EasyMutex;
//! use lock_api::RawMutex;
//! use parking_lot::RawMutex as RawLock;
//!
//! fn update(raw: &RawLock, fast_path: bool) -> u32 {
//!     let mut guard = EasyMutex::locked(raw);
//!     if fast_path {
//!         guard.unlock();
//!         return 1; // lock already released; the drop below is a no-op
//!     }
//!     2 // still held; released when `guard` drops
//! }
//!
//! let raw = RawLock::INIT;
//! assert_eq!(update(&raw, true), 1);
//! assert_eq!(update(&raw, false), 2);
//! assert!(!raw.is_locked());
//! ```
//!
//! ## 🧠 Design
//!
//! - Guards borrow the lock; they never own it, and other handles may share it.
//! - Methods take `&mut self`: one guard belongs to one control flow.
//! - Dropping a guard releases whatever it still holds.
//! - A guard that already holds a mode answers `try_lock*` with `true` without
//!   touching the lock again.
//! - Fairness, reentrancy and blocking behavior are the raw lock's own.
//!
//! ## ⚙️ Features
//!
//! - **`std`** (default) — re-exports [`parking_lot`] and enables `std`
//!   support in `tracing` and `thiserror`. Without it the crate is `no_std`
//!   and any `lock_api` raw lock can be supplied.
//!
//! Guard operations emit `tracing` events at `TRACE` level.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod easy_mutex;
pub mod easy_rwlock;
pub mod error;
pub mod locker;

#[cfg(test)]
mod testing;

pub use easy_mutex::EasyMutex;
pub use easy_rwlock::EasyRwLock;
pub use error::WouldBlock;
pub use locker::{EasyLocker, Locker, ReadLocker, WriteLocker};

#[cfg(feature = "std")]
pub use parking_lot;
