//! Per-run cancellation token.
//!
//! A [`CancelToken`] is created and owned by the caller, cloned into the
//! [`crate::config::ConversionConfig`] for one run, and polled by the
//! pipeline at page boundaries. Scoping the token to a single run (rather
//! than a process-wide flag) means cancelling one conversion can never
//! interfere with another.
//!
//! The in-flight stage is never interrupted: in OCR mode only the *next*
//! page iteration is skipped, and the direct-conversion delegate cannot be
//! interrupted mid-call at all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation signal shared between a caller and one running conversion.
///
/// Cloning is cheap (an `Arc` bump); all clones observe the same flag.
/// Safe to cancel from any thread while the pipeline polls it.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this token.
    ///
    /// Takes effect at the next page boundary in OCR mode. In direct mode
    /// the single delegated call runs to completion first; a cancellation
    /// observed only afterwards does not undo the already-written output.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Has cancellation been requested?
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
