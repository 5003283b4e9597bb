//! Progress-callback trait for per-page generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::LabelRunConfigBuilder::progress_callback`] to receive
//! events as each sheet is laid out. The `generate_labels` binary uses this
//! to drive its progress bar; library callers can forward events anywhere.
//!
//! # Example
//!
//! ```rust
//! use asn_labels::{GenerationProgressCallback, LabelRunConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     pages: AtomicUsize,
//! }
//!
//! impl GenerationProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize, labels: usize) {
//!         self.pages.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("sheet {page_num}/{total_pages}: {labels} labels");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { pages: AtomicUsize::new(0) });
//!
//! let config = LabelRunConfig::builder()
//!     .progress_callback(counter as Arc<dyn GenerationProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the generator as it renders each sheet.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Pages are numbered from 1.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once before the first page is laid out.
    fn on_generation_start(&self, total_pages: usize, total_labels: u64) {
        let _ = (total_pages, total_labels);
    }

    /// Called before the labels of a page are drawn.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called after every label of a page has been drawn.
    fn on_page_complete(&self, page_num: usize, total_pages: usize, labels: usize) {
        let _ = (page_num, total_pages, labels);
    }

    /// Called once the PDF has been written to `path`.
    fn on_generation_complete(&self, total_pages: usize, path: &Path) {
        let _ = (total_pages, path);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::LabelRunConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;
