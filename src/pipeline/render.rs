//! Page rasteriser: render every PDF page to a PNG via pdfium.
//!
//! Pages are rendered in index order at a uniform scale of `dpi / 72`, so the
//! pixel size follows the DPI and the aspect ratio is always the page's own.
//! Each page is written to the temp directory as `{index + 1}.png`.

use crate::config::{render_scale, ConversionConfig};
use crate::error::Pdf2DocxError;
use crate::output::DocumentMetadata;
use crate::pipeline::encode::{encode_png, page_image_name};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// A page that has been rasterised and PNG-encoded.
pub struct RenderedPage {
    /// 1-indexed page number.
    pub page_num: usize,
    pub width_px: u32,
    pub height_px: u32,
    pub png: Vec<u8>,
}

/// Open a PDF, mapping pdfium's load failure onto a typed error.
pub fn open_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, Pdf2DocxError> {
    pdfium.load_pdf_from_file(pdf_path, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                Pdf2DocxError::WrongPassword {
                    path: pdf_path.to_path_buf(),
                }
            } else {
                Pdf2DocxError::PasswordRequired {
                    path: pdf_path.to_path_buf(),
                }
            }
        } else {
            Pdf2DocxError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: err_str,
            }
        }
    })
}

/// Render every page of `document` at `dpi` in order, handing each to
/// `on_page`. Progress events go to `config`'s callback.
///
/// Returns the page count. Stops at the first error from pdfium, the PNG
/// encoder, or `on_page`.
pub fn render_each_page<F>(
    document: &PdfDocument<'_>,
    dpi: u32,
    config: &ConversionConfig,
    mut on_page: F,
) -> Result<usize, Pdf2DocxError>
where
    F: FnMut(RenderedPage) -> Result<(), Pdf2DocxError>,
{
    let render_config = PdfRenderConfig::new().scale_page_by_factor(render_scale(dpi));
    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;
        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            Pdf2DocxError::RasterisationFailed {
                page: page_num,
                detail: format!("{:?}", e),
            }
        })?;

        let image: DynamicImage = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            page_num,
            image.width(),
            image.height()
        );

        let png = encode_png(&image).map_err(|e| Pdf2DocxError::RasterisationFailed {
            page: page_num,
            detail: format!("PNG encoding failed: {}", e),
        })?;

        on_page(RenderedPage {
            page_num,
            width_px: image.width(),
            height_px: image.height(),
            png,
        })?;

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, total_pages);
        }
    }

    Ok(total_pages)
}

/// Write a rendered page into `dir` as `{page_num}.png`.
pub fn write_page_image(dir: &Path, page: &RenderedPage) -> Result<(), Pdf2DocxError> {
    let path = dir.join(page_image_name(page.page_num));
    std::fs::write(&path, &page.png).map_err(|e| Pdf2DocxError::ImageWriteFailed {
        path,
        detail: e.to_string(),
    })
}

/// Create `dir` if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), Pdf2DocxError> {
    std::fs::create_dir_all(dir).map_err(|e| Pdf2DocxError::TempDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Rasterise every page of `pdf_path` at `dpi` into `output_dir` as
/// `1.png … N.png`.
///
/// Creates `output_dir` if absent. Returns the page count. On failure the
/// directory is left as it is; cleanup belongs to the caller.
pub fn render_to_dir(
    pdfium: &Pdfium,
    pdf_path: &Path,
    output_dir: &Path,
    dpi: u32,
    config: &ConversionConfig,
) -> Result<usize, Pdf2DocxError> {
    ensure_dir(output_dir)?;

    let document = open_document(pdfium, pdf_path, config.password.as_deref())?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(pdf_path, document.pages().len() as usize);
    }

    let total = render_each_page(&document, dpi, config, |page| {
        write_page_image(output_dir, &page)
    })?;

    info!("All {} pages saved as PNG images in {}", total, output_dir.display());
    Ok(total)
}

/// Extract document metadata from a PDF without rendering pages.
pub fn extract_metadata(
    pdfium: &Pdfium,
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, Pdf2DocxError> {
    let document = open_document(pdfium, pdf_path, password)?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
