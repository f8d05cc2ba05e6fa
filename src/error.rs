use thiserror::Error;

/// A non-blocking acquisition found the lock held elsewhere.
///
/// Returned by the `try_acquire*` family on the guards, which are the
/// `Result` counterparts of the boolean `try_lock*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lock is held elsewhere and acquiring it would block")]
pub struct WouldBlock;

impl WouldBlock {
    #[inline]
    pub(crate) fn check(acquired: bool) -> Result<(), WouldBlock> {
        if acquired {
            Ok(())
        } else {
            Err(WouldBlock)
        }
    }
}
