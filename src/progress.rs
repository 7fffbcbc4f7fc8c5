//! Progress-callback trait for per-page and per-file conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline renders each page and as the batch driver moves
//! from file to file.
//!
//! # Example
//!
//! ```rust
//! use pdf2docx::{ConversionConfig, ConversionProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     pages: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} rendered", page_num, total_pages);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { pages: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it processes pages and files.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Events are delivered from the converting thread,
/// in order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once the source PDF is open and its page count is known.
    fn on_conversion_start(&self, source: &Path, total_pages: usize) {
        let _ = (source, total_pages);
    }

    /// Called after a page image has been written (and, in single-pass mode,
    /// inserted into the document).
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    fn on_page_complete(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called after the document has been saved.
    fn on_conversion_complete(&self, output: &Path, total_pages: usize) {
        let _ = (output, total_pages);
    }

    /// Called by the batch driver before each qualifying PDF.
    ///
    /// # Arguments
    /// * `file_index`  — 1-indexed position in the batch
    /// * `total_files` — number of `.pdf` entries in the batch
    fn on_file_start(&self, file_index: usize, total_files: usize, source: &Path) {
        let _ = (file_index, total_files, source);
    }

    /// Called by the batch driver when a file fails.
    fn on_file_error(&self, source: &Path, error: &str) {
        let _ = (source, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_callback_does_not_panic() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(Path::new("a.pdf"), 5);
        cb.on_page_complete(1, 5);
        cb.on_conversion_complete(Path::new("a.docx"), 5);
        cb.on_file_start(1, 2, Path::new("a.pdf"));
        cb.on_file_error(Path::new("b.pdf"), "boom");
    }
}
