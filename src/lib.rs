//! # pdf2docx
//!
//! Convert PDF documents to Word (`.docx`) by rasterising every page.
//!
//! Each PDF page is rendered to a PNG via pdfium and placed, centered and
//! stretched to the printable area, on its own page of an A4 Word document.
//! No text is extracted and no layout is reconstructed: the output looks
//! exactly like the PDF and is not editable as text.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     check the file exists and starts with %PDF
//!  ├─ 2. Render    rasterise pages at dpi/72 via pdfium
//!  ├─ 3. Encode    page → PNG, written to the temp dir as 1.png … N.png
//!  ├─ 4. Sequence  list the temp dir in numeric page order (two-pass mode)
//!  ├─ 5. Compose   one centered full-page picture per page (docx-rs)
//!  └─ 6. Output    no-clobber save, temp dir removed
//! ```
//!
//! Everything runs synchronously on the calling thread.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2docx::{convert_dir, convert_file, ConversionConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!
//!     // paper.pdf → paper.docx
//!     let stats = convert_file("paper.pdf", None, &config)?;
//!     eprintln!("{} pages → {}", stats.page_count, stats.output.display());
//!
//!     // every *.pdf in papers/ → papers/*.docx
//!     let report = convert_dir("papers", None, &config)?;
//!     eprintln!("{} files converted", report.converted.len());
//!
//!     // explicit output path
//!     convert_file("scan.pdf", Some(Path::new("out/scan.docx")), &config)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Safety rails
//!
//! A job refuses to start when its output document or its temp directory
//! already exists ([`Pdf2DocxError::OutputExists`],
//! [`Pdf2DocxError::TempDirExists`]). Running the same conversion twice
//! therefore fails the second time instead of overwriting.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2docx` binary (clap + anyhow + tracing-subscriber + indicatif + serde_json) |
//!
//! ## Runtime requirement
//!
//! pdfium is loaded at runtime; see [`engine`] for where it is looked up.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::convert_dir;
pub use config::{BatchPolicy, ComposeMode, ConversionConfig, ConversionConfigBuilder};
pub use convert::{
    convert_file, derive_output_path, inspect, pdf_to_images, ConversionJob, Converter,
};
pub use error::Pdf2DocxError;
pub use geometry::PageGeometry;
pub use output::{BatchFailure, BatchReport, ConversionStats, DocumentMetadata};
pub use pipeline::compose::{images_to_docx, DocumentComposer};
pub use pipeline::sequence::{sequence_page_images, PageImage};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
