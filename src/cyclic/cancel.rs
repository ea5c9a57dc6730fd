//! Cooperative cancellation for exponential searches

use crate::error::{GaloisError, GaloisResult};
use std::sync::atomic::{AtomicBool, Ordering};

/// Polled at every inner-loop iteration of a combinatorial search
pub trait CancelCheck: Sync {
    fn is_cancelled(&self) -> bool;
}

/// A check that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelCheck for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

#[inline]
pub(crate) fn checkpoint(cancel: &dyn CancelCheck) -> GaloisResult<()> {
    if cancel.is_cancelled() {
        Err(GaloisError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint() {
        assert!(checkpoint(&NeverCancel).is_ok());
        let flag = AtomicBool::new(false);
        assert!(checkpoint(&flag).is_ok());
        flag.store(true, Ordering::Relaxed);
        assert_eq!(checkpoint(&flag), Err(GaloisError::Cancelled));
    }
}
