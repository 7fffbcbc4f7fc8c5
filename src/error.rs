//! Error types for the pdf2docx library.
//!
//! Every failure of a single conversion job surfaces as one [`Pdf2DocxError`].
//! Nothing is retried and nothing is recovered inside a job: the job either
//! produces its `.docx` or returns `Err`.
//!
//! Whether one failed job should stop a whole batch is not decided here.
//! That policy belongs to the batch driver (see [`crate::config::BatchPolicy`]),
//! which receives the typed error and either aborts or records it and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2docx library.
#[derive(Debug, Error)]
pub enum Pdf2DocxError {
    // ── Pre-existing artifacts ────────────────────────────────────────────
    /// The output document already exists; it is never overwritten.
    #[error("Output file '{path}' already exists.\nDelete it or choose another output path.")]
    OutputExists { path: PathBuf },

    /// The temp image directory already exists; it is never merged into.
    #[error("Temp directory '{path}' already exists.\nDelete it or choose another --temp-dir.")]
    TempDirExists { path: PathBuf },

    // ── Source errors ─────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// pdfium-render returned an error for a specific page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// A rendered page image could not be written to the temp directory.
    #[error("Failed to write page image '{path}': {detail}")]
    ImageWriteFailed { path: PathBuf, detail: String },

    // ── Composition errors ────────────────────────────────────────────────
    /// A page image could not be read or decoded while composing.
    #[error("Failed to read page image '{path}': {detail}")]
    ImageReadFailed { path: PathBuf, detail: String },

    /// The Word document could not be packed or written.
    #[error("Failed to write output file '{path}': {detail}")]
    DocumentWriteFailed { path: PathBuf, detail: String },

    // ── Filesystem errors ─────────────────────────────────────────────────
    /// The batch source directory (or an image directory) could not be listed.
    #[error("Cannot read directory '{path}': {source}")]
    SourceDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temp directory could not be created or removed.
    #[error("Temp directory '{path}' could not be managed: {source}")]
    TempDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Install libpdfium from https://github.com/bblanchon/pdfium-binaries and either:\n\
  • place it next to the pdf2docx executable or in the current directory, or\n\
  • set PDFIUM_LIB_PATH=/path/to/libpdfium (file or containing directory).\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2DocxError {
    /// `true` when the job refused to start because an artifact it would
    /// create is already on disk.
    pub fn is_preexisting_artifact(&self) -> bool {
        matches!(
            self,
            Pdf2DocxError::OutputExists { .. } | Pdf2DocxError::TempDirExists { .. }
        )
    }

    /// `true` when the source PDF could not be opened as a PDF.
    pub fn is_source_unreadable(&self) -> bool {
        matches!(
            self,
            Pdf2DocxError::FileNotFound { .. }
                | Pdf2DocxError::PermissionDenied { .. }
                | Pdf2DocxError::NotAPdf { .. }
                | Pdf2DocxError::CorruptPdf { .. }
                | Pdf2DocxError::PasswordRequired { .. }
                | Pdf2DocxError::WrongPassword { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_exists_display() {
        let e = Pdf2DocxError::OutputExists {
            path: PathBuf::from("out.docx"),
        };
        let msg = e.to_string();
        assert!(msg.contains("out.docx"), "got: {msg}");
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn preexisting_artifact_classification() {
        assert!(Pdf2DocxError::TempDirExists {
            path: PathBuf::from("tmp")
        }
        .is_preexisting_artifact());
        assert!(!Pdf2DocxError::Internal("x".into()).is_preexisting_artifact());
    }

    #[test]
    fn source_unreadable_classification() {
        let e = Pdf2DocxError::NotAPdf {
            path: PathBuf::from("a.pdf"),
            magic: *b"PK\x03\x04",
        };
        assert!(e.is_source_unreadable());
        assert!(!e.is_preexisting_artifact());
    }

    #[test]
    fn rasterisation_display() {
        let e = Pdf2DocxError::RasterisationFailed {
            page: 3,
            detail: "bitmap alloc".into(),
        };
        assert!(e.to_string().contains("page 3"));
        assert!(e.to_string().contains("bitmap alloc"));
    }
}
