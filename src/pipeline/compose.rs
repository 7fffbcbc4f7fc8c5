//! Document composer: stamp page images onto a page-sized Word document.
//!
//! Every picture is stretched to exactly the printable area of the configured
//! [`PageGeometry`] and sits alone in a center-aligned paragraph. A picture
//! that fills the printable area pushes the next paragraph onto a new page,
//! so no separator paragraphs or explicit page breaks are inserted.

use crate::error::Pdf2DocxError;
use crate::geometry::PageGeometry;
use crate::pipeline::encode::encode_png;
use crate::pipeline::sequence::sequence_page_images;
use docx_rs::{AlignmentType, Docx, PageMargin, Paragraph, Pic, Run};
use image::{ImageFormat, ImageReader};
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use tracing::{debug, info};

/// An in-memory Word document accumulating one picture per page.
pub struct DocumentComposer {
    geometry: PageGeometry,
    paragraphs: Vec<Paragraph>,
}

impl DocumentComposer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            paragraphs: Vec::new(),
        }
    }

    /// Pictures added so far.
    pub fn page_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Append a page from PNG bytes whose pixel size is already known.
    pub fn add_page_png(&mut self, png: Vec<u8>, width_px: u32, height_px: u32) {
        let (w_emu, h_emu) = self.geometry.image_size_emu();
        let pic = Pic::new_with_dimensions(png, width_px, height_px).size(w_emu, h_emu);
        let paragraph = Paragraph::new()
            .add_run(Run::new().add_image(pic))
            .align(AlignmentType::Center);
        self.paragraphs.push(paragraph);
        debug!(
            "Added page {} ({}x{} px)",
            self.paragraphs.len(),
            width_px,
            height_px
        );
    }

    /// Append a page from an image file on disk.
    ///
    /// PNG files are embedded as-is; any other decodable format is converted
    /// to PNG first.
    pub fn add_page_image_file(&mut self, path: &Path) -> Result<(), Pdf2DocxError> {
        let read_err = |detail: String| Pdf2DocxError::ImageReadFailed {
            path: path.to_path_buf(),
            detail,
        };

        let bytes = std::fs::read(path).map_err(|e| read_err(e.to_string()))?;
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| read_err(e.to_string()))?;

        if reader.format() == Some(ImageFormat::Png) {
            let (w, h) = reader
                .into_dimensions()
                .map_err(|e| read_err(e.to_string()))?;
            self.add_page_png(bytes, w, h);
        } else {
            let img = reader.decode().map_err(|e| read_err(e.to_string()))?;
            let png = encode_png(&img).map_err(|e| read_err(e.to_string()))?;
            self.add_page_png(png, img.width(), img.height());
        }
        Ok(())
    }

    /// Assemble the document: sheet size, margins, then every picture in order.
    fn into_docx(self) -> Docx {
        let (width, height) = self.geometry.page_size_twips();
        let (left_right, top_bottom) = self.geometry.margins_twips();

        let margin = PageMargin::new()
            .top(top_bottom as i32)
            .bottom(top_bottom as i32)
            .left(left_right as i32)
            .right(left_right as i32);

        self.paragraphs.into_iter().fold(
            Docx::new().page_size(width, height).page_margin(margin),
            |docx, p| docx.add_paragraph(p),
        )
    }

    /// Pack the `.docx` archive into any seekable writer.
    pub fn write_to<W: Write + Seek>(self, writer: W) -> Result<(), String> {
        self.into_docx()
            .build()
            .pack(writer)
            .map_err(|e| e.to_string())
    }

    /// Save to `output`, refusing to replace an existing file.
    ///
    /// The archive is packed into a temp file beside `output` and then
    /// persisted without clobbering, so a partially written document is never
    /// visible under the final name.
    pub fn save(self, output: &Path) -> Result<(), Pdf2DocxError> {
        let write_err = |detail: String| Pdf2DocxError::DocumentWriteFailed {
            path: output.to_path_buf(),
            detail,
        };

        let parent = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;

        let pages = self.page_count();
        let mut builder = tempfile::Builder::new();
        builder.prefix(".pdf2docx-").suffix(".docx.tmp");
        // Temp files default to 0600; the document gets the umask's mode.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder
            .tempfile_in(parent)
            .map_err(|e| write_err(e.to_string()))?;

        self.write_to(tmp.as_file_mut()).map_err(write_err)?;
        tmp.as_file_mut()
            .flush()
            .map_err(|e| write_err(e.to_string()))?;

        tmp.persist_noclobber(output).map_err(|e| {
            if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                Pdf2DocxError::OutputExists {
                    path: output.to_path_buf(),
                }
            } else {
                write_err(e.error.to_string())
            }
        })?;

        info!("Document saved: {} ({} pages)", output.display(), pages);
        Ok(())
    }
}

/// Compose every `<n>.png` in `image_dir` into a document saved at `output`.
///
/// Returns the number of pictures inserted.
pub fn images_to_docx(
    image_dir: &Path,
    output: &Path,
    geometry: &PageGeometry,
) -> Result<usize, Pdf2DocxError> {
    if output.exists() {
        return Err(Pdf2DocxError::OutputExists {
            path: output.to_path_buf(),
        });
    }

    let mut composer = DocumentComposer::new(*geometry);
    for page in sequence_page_images(image_dir)? {
        composer.add_page_image_file(&page.path)?;
    }

    let pages = composer.page_count();
    composer.save(output)?;
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn png(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([200, 10, 10])));
        encode_png(&img).unwrap()
    }

    #[test]
    fn counts_pages() {
        let mut c = DocumentComposer::new(PageGeometry::A4);
        assert_eq!(c.page_count(), 0);
        c.add_page_png(png(4, 6), 4, 6);
        c.add_page_png(png(4, 6), 4, 6);
        assert_eq!(c.page_count(), 2);
    }

    #[test]
    fn writes_a_zip_archive() {
        let mut c = DocumentComposer::new(PageGeometry::A4);
        c.add_page_png(png(8, 8), 8, 8);
        let mut buf = Cursor::new(Vec::new());
        c.write_to(&mut buf).unwrap();
        let bytes = buf.into_inner();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn jpeg_input_is_converted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.jpg");
        RgbImage::from_pixel(5, 7, Rgb([0, 0, 0]))
            .save_with_format(&path, ImageFormat::Jpeg)
            .unwrap();
        let mut c = DocumentComposer::new(PageGeometry::A4);
        c.add_page_image_file(&path).unwrap();
        assert_eq!(c.page_count(), 1);
    }

    #[test]
    fn garbage_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let mut c = DocumentComposer::new(PageGeometry::A4);
        let err = c.add_page_image_file(&path).unwrap_err();
        assert!(matches!(err, Pdf2DocxError::ImageReadFailed { .. }));
    }

    #[test]
    fn save_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.docx");
        std::fs::write(&out, b"keep me").unwrap();
        let c = DocumentComposer::new(PageGeometry::A4);
        let err = c.save(&out).unwrap_err();
        assert!(matches!(err, Pdf2DocxError::OutputExists { .. }));
        assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
    }
}
