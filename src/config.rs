//! Configuration types for PDF-to-Word conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. One struct carries every knob so a
//! single-file job and every item of a batch run with identical settings.

use crate::error::Pdf2DocxError;
use crate::geometry::PageGeometry;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 300;
/// Lowest accepted DPI. There is no upper bound; pdfium reports a page it
/// cannot allocate a bitmap for as a rasterisation failure.
pub const MIN_DPI: u32 = 1;
/// PDF user-space density: one point is 1/72 inch.
pub const PDF_POINTS_PER_INCH: f32 = 72.0;
/// Default scratch directory for page images, relative to the working directory.
pub const DEFAULT_TEMP_DIR: &str = "tmp";

/// Configuration for a PDF-to-Word conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2docx::{ComposeMode, ConversionConfig};
///
/// let config = ConversionConfig::builder()
///     .dpi(150)
///     .temp_dir("scratch")
///     .mode(ComposeMode::TwoPass)
///     .build()
///     .unwrap();
/// assert_eq!(config.dpi, 150);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Rendering DPI. Must be at least 1. Default: 300.
    ///
    /// Pages are scaled by `dpi / 72` on both axes (72 is the PDF point
    /// density), so this controls pixel resolution only; the aspect ratio is
    /// always the page's own.
    pub dpi: u32,

    /// Scratch directory for `1.png`, `2.png`, …. Default: `tmp`.
    ///
    /// Must not exist when a job starts. Deleted after every successful job.
    pub temp_dir: PathBuf,

    /// Sheet size and margins of the generated document. Default: A4.
    pub geometry: PageGeometry,

    /// Whether pages are composed while rendering or after. Default: single pass.
    pub mode: ComposeMode,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// What the batch driver does when one file fails. Default: abort.
    pub batch_policy: BatchPolicy,

    /// Optional per-page / per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            temp_dir: PathBuf::from(DEFAULT_TEMP_DIR),
            geometry: PageGeometry::default(),
            mode: ComposeMode::default(),
            password: None,
            batch_policy: BatchPolicy::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("dpi", &self.dpi)
            .field("temp_dir", &self.temp_dir)
            .field("geometry", &self.geometry)
            .field("mode", &self.mode)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("batch_policy", &self.batch_policy)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Render scale applied to both axes.
    pub fn scale(&self) -> f32 {
        render_scale(self.dpi)
    }
}

/// Factor applied to both page axes when rendering at `dpi`.
pub fn render_scale(dpi: u32) -> f32 {
    dpi as f32 / PDF_POINTS_PER_INCH
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = dir.into();
        self
    }

    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn mode(mut self, mode: ComposeMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.config.batch_policy = policy;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2DocxError> {
        let c = &self.config;
        if c.dpi < MIN_DPI {
            return Err(Pdf2DocxError::InvalidConfig(format!(
                "DPI must be at least {MIN_DPI}, got {}",
                c.dpi
            )));
        }
        if c.temp_dir.as_os_str().is_empty() {
            return Err(Pdf2DocxError::InvalidConfig(
                "temp directory path must not be empty".into(),
            ));
        }
        c.geometry.validate().map_err(Pdf2DocxError::InvalidConfig)?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How pages travel from the rasteriser into the document.
///
/// Both paths write the page images to the temp directory and produce
/// visually identical documents. The packed `.docx` bytes differ between
/// the two (picture ids are generated per insertion), which is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComposeMode {
    /// Render a page, save it, and insert it before rendering the next. (default)
    #[default]
    SinglePass,
    /// Render every page to disk first, then list, sort, and insert them.
    TwoPass,
}

/// What the batch driver does when converting one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatchPolicy {
    /// Stop at the first failing file and return its error. (default)
    #[default]
    Abort,
    /// Record the failure in the report and continue with the next file.
    SkipAndContinue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ConversionConfig::default();
        assert_eq!(c.dpi, 300);
        assert_eq!(c.temp_dir, PathBuf::from("tmp"));
        assert_eq!(c.geometry, PageGeometry::A4);
        assert_eq!(c.mode, ComposeMode::SinglePass);
        assert_eq!(c.batch_policy, BatchPolicy::Abort);
    }

    #[test]
    fn scale_is_dpi_over_72() {
        let c = ConversionConfig::builder().dpi(144).build().unwrap();
        assert!((c.scale() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_dpi_rejected() {
        assert!(ConversionConfig::builder().dpi(0).build().is_err());
    }

    #[test]
    fn low_and_high_dpi_accepted() {
        assert_eq!(ConversionConfig::builder().dpi(50).build().unwrap().dpi, 50);
        assert_eq!(ConversionConfig::builder().dpi(1200).build().unwrap().dpi, 1200);
    }

    #[test]
    fn render_scale_follows_dpi() {
        assert!((render_scale(72) - 1.0).abs() < f32::EPSILON);
        assert!((render_scale(150) - 150.0 / 72.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_temp_dir_rejected() {
        let err = ConversionConfig::builder().temp_dir("").build().unwrap_err();
        assert!(matches!(err, Pdf2DocxError::InvalidConfig(_)));
    }

    #[test]
    fn debug_redacts_password() {
        let c = ConversionConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
    }
}
