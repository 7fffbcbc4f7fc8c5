//! Input validation: make sure a source path is a readable PDF.
//!
//! Runs before pdfium is touched so a missing file, an unreadable file, or a
//! non-PDF gets a precise error instead of a generic load failure. The check
//! reads the `%PDF` magic bytes only.

use crate::error::Pdf2DocxError;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate that `path` exists, is readable, and starts with `%PDF`.
pub fn validate_pdf(path: &Path) -> Result<(), Pdf2DocxError> {
    if !path.is_file() {
        return Err(Pdf2DocxError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_err() || &magic != PDF_MAGIC {
                return Err(Pdf2DocxError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2DocxError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Pdf2DocxError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Validated source PDF: {}", path.display());
    Ok(())
}

/// `true` if the file name ends in `.pdf` (case-sensitive).
pub fn has_pdf_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(".pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_pdf(&dir.path().join("nope.pdf")).unwrap_err();
        assert!(matches!(err, Pdf2DocxError::FileNotFound { .. }));
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("fake.pdf");
        std::fs::write(&p, b"PK\x03\x04 not a pdf").unwrap();
        match validate_pdf(&p).unwrap_err() {
            Pdf2DocxError::NotAPdf { magic, .. } => assert_eq!(&magic, b"PK\x03\x04"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("short.pdf");
        std::fs::write(&p, b"%P").unwrap();
        assert!(matches!(
            validate_pdf(&p).unwrap_err(),
            Pdf2DocxError::NotAPdf { .. }
        ));
    }

    #[test]
    fn magic_bytes_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("ok.pdf");
        std::fs::write(&p, b"%PDF-1.7\n").unwrap();
        assert!(validate_pdf(&p).is_ok());
    }

    #[test]
    fn directory_is_not_a_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("folder.pdf");
        std::fs::create_dir(&sub).unwrap();
        assert!(matches!(
            validate_pdf(&sub).unwrap_err(),
            Pdf2DocxError::FileNotFound { .. }
        ));
    }

    #[test]
    fn pdf_suffix_is_case_sensitive() {
        assert!(has_pdf_suffix(Path::new("dir/a.pdf")));
        assert!(!has_pdf_suffix(Path::new("dir/A.PDF")));
        assert!(!has_pdf_suffix(Path::new("dir/a.pdf.txt")));
        assert!(!has_pdf_suffix(Path::new("dir/notes")));
    }
}
