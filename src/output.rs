//! Result types returned by the conversion entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Document-level information read from the PDF without rendering it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Outcome of one successful single-file conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Pages rendered, which is also the number of pictures in the document.
    pub page_count: usize,
    pub dpi: u32,
    pub render_duration_ms: u64,
    pub compose_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// A batch item that failed under [`crate::config::BatchPolicy::SkipAndContinue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub source: PathBuf,
    pub error: String,
}

/// Outcome of a directory-scoped batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub converted: Vec<ConversionStats>,
    pub failed: Vec<BatchFailure>,
    /// Directory entries that were not `.pdf` files.
    pub ignored_entries: usize,
}

impl BatchReport {
    /// Number of `.pdf` files the batch attempted.
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Total pages across every converted file.
    pub fn total_pages(&self) -> usize {
        self.converted.iter().map(|s| s.page_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }
}
