//! Page geometry for the generated Word document.
//!
//! Every page of the output is the same size: the whole printable area of an
//! A4 sheet with Word's "Normal" margins is filled by one picture. The values
//! live in an immutable [`PageGeometry`] so a different sheet size can be
//! passed to the composer without touching the composition code.
//!
//! WordprocessingML measures page size and margins in twentieths of a point
//! (twips) and drawing extents in English Metric Units (EMU). Conversions are
//! rounded to the nearest whole unit.

use serde::{Deserialize, Serialize};

/// A4 sheet width.
pub const A4_WIDTH_CM: f64 = 21.0;
/// A4 sheet height.
pub const A4_HEIGHT_CM: f64 = 29.7;
/// Left and right margin (Word "Normal").
pub const DEFAULT_LEFT_RIGHT_MARGIN_CM: f64 = 3.18;
/// Top and bottom margin (Word "Normal").
pub const DEFAULT_TOP_BOTTOM_MARGIN_CM: f64 = 2.54;

const TWIPS_PER_INCH: f64 = 1440.0;
const CM_PER_INCH: f64 = 2.54;
const EMU_PER_CM: f64 = 360_000.0;

/// Convert centimetres to twips (1/1440 inch).
pub fn cm_to_twips(cm: f64) -> u32 {
    (cm / CM_PER_INCH * TWIPS_PER_INCH).round() as u32
}

/// Convert centimetres to English Metric Units.
pub fn cm_to_emu(cm: f64) -> u32 {
    (cm * EMU_PER_CM).round() as u32
}

/// Sheet size and symmetric margins, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_cm: f64,
    pub height_cm: f64,
    /// Applied to both the left and the right edge.
    pub left_right_margin_cm: f64,
    /// Applied to both the top and the bottom edge.
    pub top_bottom_margin_cm: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

impl PageGeometry {
    /// A4 portrait with Word's default margins.
    pub const A4: PageGeometry = PageGeometry {
        width_cm: A4_WIDTH_CM,
        height_cm: A4_HEIGHT_CM,
        left_right_margin_cm: DEFAULT_LEFT_RIGHT_MARGIN_CM,
        top_bottom_margin_cm: DEFAULT_TOP_BOTTOM_MARGIN_CM,
    };

    /// Width every page picture is stretched to.
    pub fn image_width_cm(&self) -> f64 {
        self.width_cm - 2.0 * self.left_right_margin_cm
    }

    /// Height every page picture is stretched to.
    pub fn image_height_cm(&self) -> f64 {
        self.height_cm - 2.0 * self.top_bottom_margin_cm
    }

    /// `(width, height)` of the sheet in twips.
    pub fn page_size_twips(&self) -> (u32, u32) {
        (cm_to_twips(self.width_cm), cm_to_twips(self.height_cm))
    }

    /// `(left_right, top_bottom)` margins in twips.
    pub fn margins_twips(&self) -> (u32, u32) {
        (
            cm_to_twips(self.left_right_margin_cm),
            cm_to_twips(self.top_bottom_margin_cm),
        )
    }

    /// `(width, height)` of a page picture in EMU.
    pub fn image_size_emu(&self) -> (u32, u32) {
        (
            cm_to_emu(self.image_width_cm()),
            cm_to_emu(self.image_height_cm()),
        )
    }

    /// Reject sheets whose margins leave no room for a picture.
    pub fn validate(&self) -> Result<(), String> {
        let dims = [
            self.width_cm,
            self.height_cm,
            self.left_right_margin_cm,
            self.top_bottom_margin_cm,
        ];
        if dims.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(format!("page geometry must be finite and non-negative: {self:?}"));
        }
        if self.image_width_cm() <= 0.0 || self.image_height_cm() <= 0.0 {
            return Err(format!(
                "margins leave no printable area ({:.2}cm × {:.2}cm)",
                self.image_width_cm(),
                self.image_height_cm()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_printable_area() {
        let g = PageGeometry::A4;
        assert!((g.image_width_cm() - 14.64).abs() < 1e-9);
        assert!((g.image_height_cm() - 24.62).abs() < 1e-9);
    }

    #[test]
    fn a4_in_twips_matches_word() {
        let g = PageGeometry::default();
        assert_eq!(g.page_size_twips(), (11906, 16838));
        assert_eq!(g.margins_twips(), (1803, 1440));
    }

    #[test]
    fn a4_picture_in_emu() {
        assert_eq!(PageGeometry::A4.image_size_emu(), (5_270_400, 8_863_200));
    }

    #[test]
    fn margins_wider_than_page_are_rejected() {
        let g = PageGeometry {
            left_right_margin_cm: 11.0,
            ..PageGeometry::A4
        };
        assert!(g.validate().is_err());
        assert!(PageGeometry::A4.validate().is_ok());
    }
}
