//! Pipeline stages for PDF-to-Word conversion.
//!
//! Each submodule implements exactly one step, run synchronously in order.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ encode ──▶ (temp dir) ──▶ sequence ──▶ compose
//! (%PDF)    (pdfium)   (PNG)      1.png … N.png   (numeric)    (docx-rs)
//! ```
//!
//! 1. [`input`]    — check the source exists, is readable, and is a PDF
//! 2. [`render`]   — rasterise every page at `dpi / 72`
//! 3. [`encode`]   — PNG-encode each page image
//! 4. [`sequence`] — list a page-image directory in numeric page order
//! 5. [`compose`]  — place each image as a full-page, centered picture
//!
//! In single-pass mode step 4 is skipped: rendered pages go straight from
//! [`render::render_each_page`] into the composer.

pub mod compose;
pub mod encode;
pub mod input;
pub mod render;
pub mod sequence;
