//! Batch driver: convert every `.pdf` in a directory, one file at a time.
//!
//! Entries are visited in file-name order. Only regular files whose name ends
//! in `.pdf` (case-sensitive) qualify; everything else is counted as ignored.
//! Each file runs as its own [`ConversionJob`] with the shared temp
//! directory, which every successful job deletes before the next starts.
//!
//! When a job fails, [`BatchPolicy`] decides what happens next: `Abort`
//! returns that job's error, `SkipAndContinue` records it in the
//! [`BatchReport`] and moves on. With `SkipAndContinue` a temp directory
//! created by the failed job is removed before the next file, so one failure
//! does not cascade into `TempDirExists` for every remaining file. A temp
//! directory that existed before the job started is never touched.

use crate::config::{BatchPolicy, ConversionConfig};
use crate::convert::{derive_output_path, ConversionJob, Converter, DOCX_EXTENSION};
use crate::error::Pdf2DocxError;
use crate::output::{BatchFailure, BatchReport};
use crate::pipeline::input::has_pdf_suffix;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Convert every PDF in `pdf_dir`.
///
/// With `output_dir = None` each document is written beside its PDF;
/// otherwise it is written to `output_dir/<stem>.docx`.
///
/// A directory with no entries at all is reported and returns an empty
/// report. A directory with entries but no PDFs also returns an empty report.
pub fn convert_dir(
    pdf_dir: impl AsRef<Path>,
    output_dir: Option<&Path>,
    config: &ConversionConfig,
) -> Result<BatchReport, Pdf2DocxError> {
    Converter::new(config.clone()).convert_dir(pdf_dir.as_ref(), output_dir)
}

impl Converter {
    /// Batch form of [`Converter::convert_file`]; see [`convert_dir`].
    pub fn convert_dir(
        &mut self,
        pdf_dir: &Path,
        output_dir: Option<&Path>,
    ) -> Result<BatchReport, Pdf2DocxError> {
        let (pdfs, ignored_entries) = list_pdfs(pdf_dir)?;
        let mut report = BatchReport {
            ignored_entries,
            ..Default::default()
        };

        if pdfs.is_empty() {
            if ignored_entries == 0 {
                info!("Directory {} is empty; nothing to convert", pdf_dir.display());
            } else {
                info!(
                    "No .pdf files in {} ({} other entries)",
                    pdf_dir.display(),
                    ignored_entries
                );
            }
            return Ok(report);
        }

        let total = pdfs.len();
        info!("Converting {} PDF files from {}", total, pdf_dir.display());

        for (i, pdf) in pdfs.iter().enumerate() {
            if let Some(ref cb) = self.config().progress_callback {
                cb.on_file_start(i + 1, total, pdf);
            }

            let output = batch_output_path(pdf, output_dir);
            let job = ConversionJob::new(pdf, Some(&output), self.config());
            let temp_preexisted = job.temp_dir.exists();

            match self.run_job(&job) {
                Ok(stats) => report.converted.push(stats),
                Err(e) => {
                    if let Some(ref cb) = self.config().progress_callback {
                        cb.on_file_error(pdf, &e.to_string());
                    }
                    match self.config().batch_policy {
                        BatchPolicy::Abort => return Err(e),
                        BatchPolicy::SkipAndContinue => {
                            warn!("Skipping {}: {}", pdf.display(), e);
                            if !temp_preexisted {
                                discard_failed_temp_dir(&job);
                            }
                            report.failed.push(BatchFailure {
                                source: pdf.clone(),
                                error: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        info!(
            "Batch complete: {}/{} converted, {} pages total",
            report.converted.len(),
            total,
            report.total_pages()
        );
        Ok(report)
    }
}

/// Output location of one batch item.
pub fn batch_output_path(pdf: &Path, output_dir: Option<&Path>) -> PathBuf {
    match (output_dir, pdf.file_stem()) {
        (Some(dir), Some(stem)) => {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(DOCX_EXTENSION);
            dir.join(name)
        }
        _ => derive_output_path(pdf),
    }
}

/// Sorted `.pdf` files in `dir`, and the count of every other entry.
fn list_pdfs(dir: &Path) -> Result<(Vec<PathBuf>, usize), Pdf2DocxError> {
    let unreadable = |e: std::io::Error| Pdf2DocxError::SourceDirUnreadable {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut pdfs = Vec::new();
    let mut ignored = 0;
    for entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if has_pdf_suffix(&path) && path.is_file() {
            pdfs.push(path);
        } else {
            ignored += 1;
        }
    }
    pdfs.sort();
    Ok((pdfs, ignored))
}

/// Remove the temp directory a failed job created itself.
fn discard_failed_temp_dir(job: &ConversionJob) {
    if !job.temp_dir.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(&job.temp_dir) {
        warn!(
            "Could not remove temp directory {}: {}",
            job.temp_dir.display(),
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_beside_source_by_default() {
        assert_eq!(
            batch_output_path(Path::new("in/a.pdf"), None),
            PathBuf::from("in/a.docx")
        );
    }

    #[test]
    fn output_dir_override_keeps_stem() {
        assert_eq!(
            batch_output_path(Path::new("in/report.final.pdf"), Some(Path::new("out"))),
            PathBuf::from("out/report.final.docx")
        );
    }

    #[test]
    fn list_pdfs_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.pdf", "C.PDF", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let (pdfs, ignored) = list_pdfs(dir.path()).unwrap();
        assert_eq!(pdfs, vec![dir.path().join("a.pdf"), dir.path().join("b.pdf")]);
        assert_eq!(ignored, 3);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_pdfs(&dir.path().join("nope")).unwrap_err(),
            Pdf2DocxError::SourceDirUnreadable { .. }
        ));
    }
}
