//! Image sequencer: turn a directory of page images into page order.
//!
//! Filesystem listing order is unspecified, and a lexical sort puts `10.png`
//! before `2.png`. Pages are therefore keyed by the integer parsed from the
//! file stem and sorted on that key.

use crate::error::Pdf2DocxError;
use crate::pipeline::encode::PAGE_IMAGE_EXTENSION;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One page image on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageImage {
    /// 1-indexed page number parsed from the file stem.
    pub page_num: usize,
    pub path: PathBuf,
}

/// List `dir`, keep `<n>.png` files, and return them sorted by `n`.
///
/// Entries without the image extension are ignored. Image files whose stem is
/// not an integer are skipped with a warning.
pub fn sequence_page_images(dir: &Path) -> Result<Vec<PageImage>, Pdf2DocxError> {
    let entries = std::fs::read_dir(dir).map_err(|e| Pdf2DocxError::SourceDirUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let suffix = format!(".{PAGE_IMAGE_EXTENSION}");
    let mut pages = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Pdf2DocxError::SourceDirUnreadable {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(&suffix) else {
            continue;
        };
        match parse_page_number(stem) {
            Some(page_num) => pages.push(PageImage {
                page_num,
                path: entry.path(),
            }),
            None => warn!("Ignoring image without a page number: {}", name),
        }
    }

    pages.sort();
    debug!("Sequenced {} page images in {}", pages.len(), dir.display());
    Ok(pages)
}

fn parse_page_number(stem: &str) -> Option<usize> {
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    stem.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn numeric_not_lexical_order() {
        let dir = tempfile::tempdir().unwrap();
        for n in [10, 2, 1, 11, 3, 9] {
            touch(dir.path(), &format!("{n}.png"));
        }
        let order: Vec<usize> = sequence_page_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.page_num)
            .collect();
        assert_eq!(order, vec![1, 2, 3, 9, 10, 11]);
    }

    #[test]
    fn non_images_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "1.png");
        touch(dir.path(), "2.jpg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "cover.png");
        touch(dir.path(), "3.PNG");
        let pages = sequence_page_images(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_num, 1);
        assert_eq!(pages[0].path, dir.path().join("1.png"));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sequence_page_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sequence_page_images(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, Pdf2DocxError::SourceDirUnreadable { .. }));
    }

    #[test]
    fn page_number_parsing() {
        assert_eq!(parse_page_number("42"), Some(42));
        assert_eq!(parse_page_number("007"), Some(7));
        assert_eq!(parse_page_number(""), None);
        assert_eq!(parse_page_number("-1"), None);
        assert_eq!(parse_page_number("1a"), None);
    }
}
