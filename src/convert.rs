//! Single-file conversion entry points.
//!
//! A [`ConversionJob`] names everything one run touches: the source PDF, the
//! output document, the temp image directory, and the DPI. The [`Converter`]
//! runs jobs with one lazily bound pdfium instance, which the batch driver
//! reuses across files.
//!
//! Job lifecycle:
//!
//! 1. pre-checks: source is a readable PDF, output and temp dir do not exist
//! 2. bind pdfium (first job only)
//! 3. rasterise + compose, in one or two passes per [`ComposeMode`]
//! 4. save the document (no-clobber)
//! 5. delete the temp directory
//!
//! A failure at any step returns immediately. The temp directory is then
//! left on disk for inspection and must be removed before the next run.

use crate::config::{render_scale, ComposeMode, ConversionConfig, MIN_DPI};
use crate::engine::bind_pdfium;
use crate::error::Pdf2DocxError;
use crate::output::{ConversionStats, DocumentMetadata};
use crate::pipeline::compose::{images_to_docx, DocumentComposer};
use crate::pipeline::{input, render};
use pdfium_render::prelude::Pdfium;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Extension of every generated document.
pub const DOCX_EXTENSION: &str = "docx";

/// Output path used when none is given: the source path with `.docx`.
pub fn derive_output_path(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension(DOCX_EXTENSION)
}

/// One end-to-end conversion. Pages are rendered at the job's `dpi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub output: PathBuf,
    pub temp_dir: PathBuf,
    pub dpi: u32,
}

impl ConversionJob {
    /// Build a job, deriving the output path from `source` when `output` is `None`.
    pub fn new(
        source: impl Into<PathBuf>,
        output: Option<&Path>,
        config: &ConversionConfig,
    ) -> Self {
        let source = source.into();
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| derive_output_path(&source));
        Self {
            source,
            output,
            temp_dir: config.temp_dir.clone(),
            dpi: config.dpi,
        }
    }

    /// Render scale for this job's DPI.
    pub fn scale(&self) -> f32 {
        render_scale(self.dpi)
    }

    /// Refuse to start unless the source is a PDF and neither the output
    /// nor the temp directory exists.
    pub fn check_preconditions(&self) -> Result<(), Pdf2DocxError> {
        if self.dpi < MIN_DPI {
            return Err(Pdf2DocxError::InvalidConfig(format!(
                "DPI must be at least {MIN_DPI}, got {}",
                self.dpi
            )));
        }
        input::validate_pdf(&self.source)?;
        if self.output.exists() {
            return Err(Pdf2DocxError::OutputExists {
                path: self.output.clone(),
            });
        }
        if self.temp_dir.exists() {
            return Err(Pdf2DocxError::TempDirExists {
                path: self.temp_dir.clone(),
            });
        }
        Ok(())
    }
}

/// Runs conversion jobs with a shared configuration and pdfium binding.
pub struct Converter {
    config: ConversionConfig,
    pdfium: Option<Pdfium>,
}

impl Converter {
    /// pdfium is bound on first use.
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            config,
            pdfium: None,
        }
    }

    /// Use an already bound pdfium instance.
    pub fn with_pdfium(config: ConversionConfig, pdfium: Pdfium) -> Self {
        Self {
            config,
            pdfium: Some(pdfium),
        }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Swap the configuration, keeping the bound engine.
    pub fn reconfigure(&mut self, config: ConversionConfig) {
        self.config = config;
    }

    /// Convert `pdf_path`, writing to `output` or the derived `.docx` path.
    pub fn convert_file(
        &mut self,
        pdf_path: &Path,
        output: Option<&Path>,
    ) -> Result<ConversionStats, Pdf2DocxError> {
        let job = ConversionJob::new(pdf_path, output, &self.config);
        self.run_job(&job)
    }

    /// Run one job end to end.
    pub fn run_job(&mut self, job: &ConversionJob) -> Result<ConversionStats, Pdf2DocxError> {
        let total_start = Instant::now();
        info!(
            "Starting conversion: {} → {}",
            job.source.display(),
            job.output.display()
        );

        job.check_preconditions()?;

        let pdfium = engine(&mut self.pdfium)?;
        let config = &self.config;

        let timings = match config.mode {
            ComposeMode::SinglePass => single_pass(pdfium, job, config)?,
            ComposeMode::TwoPass => two_pass(pdfium, job, config)?,
        };

        std::fs::remove_dir_all(&job.temp_dir).map_err(|e| Pdf2DocxError::TempDirFailed {
            path: job.temp_dir.clone(),
            source: e,
        })?;
        debug!("Removed temp directory {}", job.temp_dir.display());

        if let Some(ref cb) = config.progress_callback {
            cb.on_conversion_complete(&job.output, timings.pages);
        }

        let stats = ConversionStats {
            source: job.source.clone(),
            output: job.output.clone(),
            page_count: timings.pages,
            dpi: job.dpi,
            render_duration_ms: timings.render_ms,
            compose_duration_ms: timings.compose_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        };

        info!(
            "Conversion complete: {} pages, {}ms total",
            stats.page_count, stats.total_duration_ms
        );
        Ok(stats)
    }

    /// Rasterise `pdf_path` into `output_dir` as `1.png … N.png`.
    ///
    /// `output_dir` is created if absent; existing files in it are left alone.
    pub fn pdf_to_images(
        &mut self,
        pdf_path: &Path,
        output_dir: &Path,
    ) -> Result<usize, Pdf2DocxError> {
        input::validate_pdf(pdf_path)?;
        let pdfium = engine(&mut self.pdfium)?;
        render::render_to_dir(pdfium, pdf_path, output_dir, self.config.dpi, &self.config)
    }

    /// Read document metadata without converting.
    pub fn inspect(&mut self, pdf_path: &Path) -> Result<DocumentMetadata, Pdf2DocxError> {
        input::validate_pdf(pdf_path)?;
        let pdfium = engine(&mut self.pdfium)?;
        render::extract_metadata(pdfium, pdf_path, self.config.password.as_deref())
    }
}

struct Timings {
    pages: usize,
    render_ms: u64,
    compose_ms: u64,
}

/// Bind pdfium into `slot` unless already bound.
fn engine(slot: &mut Option<Pdfium>) -> Result<&Pdfium, Pdf2DocxError> {
    let pdfium = match slot.take() {
        Some(p) => p,
        None => bind_pdfium()?,
    };
    Ok(slot.insert(pdfium))
}

/// Render a page, save it, and insert it, page by page.
fn single_pass(
    pdfium: &Pdfium,
    job: &ConversionJob,
    config: &ConversionConfig,
) -> Result<Timings, Pdf2DocxError> {
    let render_start = Instant::now();
    render::ensure_dir(&job.temp_dir)?;

    let document = render::open_document(pdfium, &job.source, config.password.as_deref())?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(&job.source, document.pages().len() as usize);
    }

    let mut composer = DocumentComposer::new(config.geometry);
    let pages = render::render_each_page(&document, job.dpi, config, |page| {
        render::write_page_image(&job.temp_dir, &page)?;
        composer.add_page_png(page.png, page.width_px, page.height_px);
        Ok(())
    })?;
    drop(document);
    info!(
        "All {} pages saved as PNG images in {}",
        pages,
        job.temp_dir.display()
    );
    let render_ms = render_start.elapsed().as_millis() as u64;

    let compose_start = Instant::now();
    composer.save(&job.output)?;

    Ok(Timings {
        pages,
        render_ms,
        compose_ms: compose_start.elapsed().as_millis() as u64,
    })
}

/// Render every page to disk, then compose from the sorted directory listing.
fn two_pass(
    pdfium: &Pdfium,
    job: &ConversionJob,
    config: &ConversionConfig,
) -> Result<Timings, Pdf2DocxError> {
    let render_start = Instant::now();
    let pages = render::render_to_dir(pdfium, &job.source, &job.temp_dir, job.dpi, config)?;
    let render_ms = render_start.elapsed().as_millis() as u64;

    let compose_start = Instant::now();
    let inserted = images_to_docx(&job.temp_dir, &job.output, &config.geometry)?;
    if inserted != pages {
        return Err(Pdf2DocxError::Internal(format!(
            "rendered {pages} pages but composed {inserted} images from {}",
            job.temp_dir.display()
        )));
    }

    Ok(Timings {
        pages,
        render_ms,
        compose_ms: compose_start.elapsed().as_millis() as u64,
    })
}

/// Convert one PDF to a Word document.
///
/// This is the primary entry point for the library. When `output` is `None`
/// the document is written beside the PDF with a `.docx` extension.
///
/// # Errors
/// - [`Pdf2DocxError::OutputExists`] / [`Pdf2DocxError::TempDirExists`] when
///   an artifact of the job is already on disk
/// - source errors (not found, not a PDF, corrupt, password)
/// - rendering, image, or document write failures
pub fn convert_file(
    pdf_path: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Pdf2DocxError> {
    Converter::new(config.clone()).convert_file(pdf_path.as_ref(), output)
}

/// Rasterise every page of a PDF into `output_dir` as numbered PNGs.
pub fn pdf_to_images(
    pdf_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<usize, Pdf2DocxError> {
    Converter::new(config.clone()).pdf_to_images(pdf_path.as_ref(), output_dir.as_ref())
}

/// Extract PDF metadata without converting content.
pub fn inspect(pdf_path: impl AsRef<Path>) -> Result<DocumentMetadata, Pdf2DocxError> {
    Converter::new(ConversionConfig::default()).inspect(pdf_path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_pdf(dir: &Path, name: &str) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, b"%PDF-1.4\n%%EOF\n").unwrap();
        p
    }

    #[test]
    fn derived_output_replaces_extension() {
        assert_eq!(
            derive_output_path(Path::new("papers/thesis.pdf")),
            PathBuf::from("papers/thesis.docx")
        );
        assert_eq!(
            derive_output_path(Path::new("archive.v2.pdf")),
            PathBuf::from("archive.v2.docx")
        );
    }

    #[test]
    fn job_uses_explicit_output() {
        let config = ConversionConfig::default();
        let job = ConversionJob::new("in.pdf", Some(Path::new("out/x.docx")), &config);
        assert_eq!(job.output, PathBuf::from("out/x.docx"));
        assert_eq!(job.temp_dir, PathBuf::from("tmp"));
        assert_eq!(job.dpi, 300);
    }

    #[test]
    fn job_dpi_drives_render_scale() {
        let config = ConversionConfig::builder().dpi(300).build().unwrap();
        let mut job = ConversionJob::new("in.pdf", None, &config);
        assert!((job.scale() - 300.0 / 72.0).abs() < f32::EPSILON);

        job.dpi = 150;
        assert!((job.scale() - 150.0 / 72.0).abs() < f32::EPSILON);
        assert!((job.scale() - config.scale()).abs() > 1.0);
    }

    #[test]
    fn zero_dpi_job_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "a.pdf");
        let config = ConversionConfig::builder()
            .temp_dir(dir.path().join("tmp"))
            .build()
            .unwrap();
        let mut job = ConversionJob::new(&pdf, None, &config);
        job.dpi = 0;
        assert!(matches!(
            Converter::new(config).run_job(&job).unwrap_err(),
            Pdf2DocxError::InvalidConfig(_)
        ));
        assert!(!dir.path().join("tmp").exists());
    }

    #[test]
    fn existing_output_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "a.pdf");
        std::fs::write(dir.path().join("a.docx"), b"old").unwrap();
        let config = ConversionConfig::builder()
            .temp_dir(dir.path().join("tmp"))
            .build()
            .unwrap();
        let job = ConversionJob::new(&pdf, None, &config);
        assert!(matches!(
            job.check_preconditions().unwrap_err(),
            Pdf2DocxError::OutputExists { .. }
        ));
    }

    #[test]
    fn existing_temp_dir_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "a.pdf");
        let tmp = dir.path().join("tmp");
        std::fs::create_dir(&tmp).unwrap();
        let config = ConversionConfig::builder().temp_dir(&tmp).build().unwrap();
        let job = ConversionJob::new(&pdf, None, &config);
        assert!(matches!(
            job.check_preconditions().unwrap_err(),
            Pdf2DocxError::TempDirExists { .. }
        ));
    }

    #[test]
    fn source_is_checked_before_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("tmp");
        std::fs::create_dir(&tmp).unwrap();
        let config = ConversionConfig::builder().temp_dir(&tmp).build().unwrap();
        let job = ConversionJob::new(dir.path().join("missing.pdf"), None, &config);
        assert!(job.check_preconditions().unwrap_err().is_source_unreadable());
    }

    #[test]
    fn clean_job_passes_preconditions() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = fake_pdf(dir.path(), "a.pdf");
        let config = ConversionConfig::builder()
            .temp_dir(dir.path().join("tmp"))
            .build()
            .unwrap();
        assert!(ConversionJob::new(&pdf, None, &config)
            .check_preconditions()
            .is_ok());
    }
}
