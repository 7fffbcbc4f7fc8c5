//! Image encoding: `DynamicImage` → PNG bytes.
//!
//! PNG is lossless, so text on a rasterised page stays crisp after it is
//! embedded in the Word document. The same bytes are written to the temp
//! directory and handed to the composer, so the file on disk and the picture
//! in the document are identical.

use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// File extension of every page image.
pub const PAGE_IMAGE_EXTENSION: &str = "png";

/// Encode a rasterised page as PNG.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    debug!(
        "Encoded {}x{} page → {} bytes PNG",
        img.width(),
        img.height(),
        buf.len()
    );
    Ok(buf)
}

/// File name of the image for a 1-indexed page, e.g. `3.png`.
pub fn page_image_name(page_num: usize) -> String {
    format!("{page_num}.{PAGE_IMAGE_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn encode_small_image() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])));
        let png = encode_png(&img).expect("encode should succeed");
        assert_eq!(&png[1..4], b"PNG");
        let decoded = image::load_from_memory(&png).expect("valid png");
        assert_eq!((decoded.width(), decoded.height()), (10, 10));
    }

    #[test]
    fn page_names_are_one_indexed_numbers() {
        assert_eq!(page_image_name(1), "1.png");
        assert_eq!(page_image_name(12), "12.png");
    }
}
