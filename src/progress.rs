//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline works through a document.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a WebSocket, a log file, or a terminal
//! progress bar — without the library knowing anything about how the host
//! application communicates. The trait is `Send + Sync` so the caller may
//! poke the conversion from one task and render progress from another.
//!
//! Per-page events fire only in OCR mode. Direct mode has no page
//! granularity; it reports through [`ConversionProgressCallback::on_stage`]
//! messages only.
//!
//! # Example
//!
//! ```rust
//! use pdf2word::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize, chars: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} done ({} chars)", page_num, total_pages, chars);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the conversion pipeline as it progresses through a document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Pages are processed strictly sequentially, so
/// per-page events always arrive in page order.
pub trait ConversionProgressCallback: Send + Sync {
    /// A free-text status message (stage start, completion, error detail).
    ///
    /// This is the human-readable channel; the typed events below carry the
    /// same information in machine-usable form.
    fn on_stage(&self, message: &str) {
        let _ = message;
    }

    /// Called once in OCR mode after rasterization, when the page count is
    /// known and before any page is recognized.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before a page is preprocessed and recognized.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page's text has been recognized and appended.
    ///
    /// `chars` is the length of the recognized text (may be 0 for a blank
    /// page — that is not an error).
    fn on_page_complete(&self, page_num: usize, total_pages: usize, chars: usize) {
        let _ = (page_num, total_pages, chars);
    }

    /// Called when a page fails recognition. The run aborts after this.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called when a cancellation request was observed at a page boundary.
    ///
    /// `completed_pages` pages finished before the token was seen; no
    /// destination file is written.
    fn on_cancelled(&self, completed_pages: usize) {
        let _ = completed_pages;
    }

    /// Called once after the destination document has been written.
    fn on_conversion_complete(&self, total_pages: usize, processed_pages: usize) {
        let _ = (total_pages, processed_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        messages: Mutex<Vec<String>>,
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        cancelled_after: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_stage(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn on_page_start(&self, _page_num: usize, _total_pages: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_complete(&self, _page_num: usize, _total_pages: usize, _chars: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_page_error(&self, _page_num: usize, _total_pages: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_cancelled(&self, completed_pages: usize) {
            self.cancelled_after.store(completed_pages, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_stage("Starting PDF to Word conversion...");
        cb.on_conversion_start(5);
        cb.on_page_start(1, 5);
        cb.on_page_complete(1, 5, 42);
        cb.on_page_error(2, 5, "some error");
        cb.on_cancelled(2);
        cb.on_conversion_complete(5, 4);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            messages: Mutex::new(Vec::new()),
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            cancelled_after: AtomicUsize::new(0),
        };

        tracker.on_stage("Starting PDF to Word conversion...");
        tracker.on_page_start(1, 3);
        tracker.on_page_complete(1, 3, 120);
        tracker.on_page_start(2, 3);
        tracker.on_page_error(2, 3, "tesseract exited with status 1");
        tracker.on_cancelled(1);

        assert_eq!(tracker.messages.lock().unwrap().len(), 1);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.cancelled_after.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Arc<dyn ConversionProgressCallback>>();
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
    }
}
