//! Binding to the pdfium shared library.
//!
//! pdfium-render loads libpdfium at runtime. Resolution order:
//!
//! 1. `PDFIUM_LIB_PATH`: a library file, or a directory containing it.
//! 2. The directory holding the running executable.
//! 3. The current working directory.
//! 4. The system library search path.
//!
//! Binding happens once per [`crate::convert::Converter`], and only after a
//! job's pre-checks pass, so refusing a pre-existing output never requires
//! pdfium to be installed.

use crate::error::Pdf2DocxError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an existing libpdfium (file or directory).
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to the first pdfium library found.
pub fn bind_pdfium() -> Result<Pdfium, Pdf2DocxError> {
    let mut attempts = Vec::new();

    for candidate in candidate_paths() {
        if !candidate.exists() {
            continue;
        }
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                debug!("Bound pdfium from {}", candidate.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => attempts.push(format!("{}: {}", candidate.display(), e)),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound system pdfium library");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            attempts.push(format!("system library: {e}"));
            Err(Pdf2DocxError::PdfiumBindingFailed(attempts.join("; ")))
        }
    }
}

/// Library paths to try, most specific first.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(p) = std::env::var(PDFIUM_LIB_PATH_ENV) {
        if !p.is_empty() {
            paths.push(library_in(Path::new(&p)));
        }
    }

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(library_in(&dir));
    }

    paths.push(library_in(Path::new("./")));
    paths
}

/// A directory resolves to the platform library name inside it.
fn library_in(path: &Path) -> PathBuf {
    if path.is_dir() {
        Pdfium::pdfium_platform_library_name_at_path(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_resolves_to_platform_library_name() {
        let dir = tempfile::tempdir().unwrap();
        let lib = library_in(dir.path());
        assert!(lib.starts_with(dir.path()));
        assert!(lib.to_string_lossy().contains("pdfium"));
    }

    #[test]
    fn file_path_is_used_verbatim() {
        let p = Path::new("/opt/pdfium/lib/libpdfium.so");
        assert_eq!(library_in(p), p.to_path_buf());
    }

    #[test]
    fn candidates_end_with_working_directory() {
        let paths = candidate_paths();
        assert!(!paths.is_empty());
        assert!(paths
            .last()
            .map(|p| p.to_string_lossy().contains("pdfium"))
            .unwrap_or(false));
    }
}
