//! Vector (SVG) output.
//!
//! The vector document is a flat list of filled rectangles, one per dark
//! cell, on a canvas matching the source dimensions. It is produced either
//! natively from the module matrix or, when only a raster surface exists,
//! by sampling that raster at a fixed stride.

use image::RgbaImage;
use std::fmt::Write as _;

use crate::encode::Encoding;

/// Channel value below which a sampled pixel counts as dark.
pub const DARKNESS_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRect {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorDocument {
    width: u32,
    height: u32,
    rects: Vec<ModuleRect>,
}

impl VectorDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rects: Vec::new(),
        }
    }

    pub fn push_rect(&mut self, x: u32, y: u32, side: u32) {
        self.rects.push(ModuleRect { x, y, side });
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rects(&self) -> &[ModuleRect] {
        &self.rects
    }

    pub fn rect_count(&self) -> usize {
        self.rects.len()
    }

    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\">",
            self.width, self.height
        );
        for rect in &self.rects {
            // Writing to a String cannot fail.
            let _ = write!(
                svg,
                "<rect x=\"{0}\" y=\"{1}\" width=\"{2}\" height=\"{2}\" fill=\"black\"/>",
                rect.x, rect.y, rect.side
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Reconstructs a vector document from a raster by sampling the top-left
/// pixel of each `stride`-sized cell. A cell is dark when that pixel is
/// opaque-ish (alpha > 0) and every color channel is below the darkness
/// threshold. The output matches the raster at sampling resolution only;
/// anti-aliased detail below one cell is lost.
pub fn raster_to_vector(image: &RgbaImage, stride: u32) -> VectorDocument {
    let stride = stride.max(1);
    let mut document = VectorDocument::new(image.width(), image.height());

    let mut y = 0;
    while y < image.height() {
        let mut x = 0;
        while x < image.width() {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            if a > 0
                && r < DARKNESS_THRESHOLD
                && g < DARKNESS_THRESHOLD
                && b < DARKNESS_THRESHOLD
            {
                document.push_rect(x, y, stride);
            }
            x += stride;
        }
        y += stride;
    }

    document
}

/// Native vector render: one rect per dark module, straight from the module
/// matrix. Used when the render mode asks for a vector surface.
pub fn vector_from_encoding(encoding: &Encoding, module_size: u32, quiet_zone: u32) -> VectorDocument {
    let side = module_size.max(1);
    let total_modules = encoding.module_count + 2 * quiet_zone;
    let mut document = VectorDocument::new(total_modules * side, total_modules * side);

    for y in 0..encoding.module_count {
        for x in 0..encoding.module_count {
            if encoding.is_dark(x, y) {
                document.push_rect((x + quiet_zone) * side, (y + quiet_zone) * side, side);
            }
        }
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CorrectionLevel;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn white_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    fn paint_cell(image: &mut RgbaImage, cell_x: u32, cell_y: u32, stride: u32) {
        for dy in 0..stride {
            for dx in 0..stride {
                image.put_pixel(cell_x * stride + dx, cell_y * stride + dy, Rgba([0, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn test_white_raster_has_no_rects() {
        let image = white_image(64, 64);
        assert_eq!(raster_to_vector(&image, 8).rect_count(), 0);
    }

    #[test]
    fn test_transparent_raster_has_no_rects() {
        let image = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
        assert_eq!(raster_to_vector(&image, 8).rect_count(), 0);
    }

    #[test]
    fn test_single_black_cell_at_grid_position() {
        let mut image = white_image(64, 64);
        paint_cell(&mut image, 2, 3, 8);

        let document = raster_to_vector(&image, 8);
        assert_eq!(
            document.rects(),
            &[ModuleRect {
                x: 16,
                y: 24,
                side: 8
            }]
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let mut image = white_image(8, 8);
        image.put_pixel(0, 0, Rgba([127, 127, 127, 255]));
        assert_eq!(raster_to_vector(&image, 8).rect_count(), 1);

        image.put_pixel(0, 0, Rgba([128, 127, 127, 255]));
        assert_eq!(raster_to_vector(&image, 8).rect_count(), 0);
    }

    #[test]
    fn test_only_top_left_pixel_is_sampled() {
        // A dark pixel anywhere but the cell's top-left corner is invisible
        // to the sampler.
        let mut image = white_image(16, 16);
        image.put_pixel(4, 4, Rgba([0, 0, 0, 255]));
        assert_eq!(raster_to_vector(&image, 8).rect_count(), 0);
    }

    #[test]
    fn test_svg_serialization_shape() {
        let mut document = VectorDocument::new(64, 64);
        document.push_rect(16, 24, 8);

        assert_eq!(
            document.to_svg(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"64\" height=\"64\" viewBox=\"0 0 64 64\">\
             <rect x=\"16\" y=\"24\" width=\"8\" height=\"8\" fill=\"black\"/></svg>"
        );
    }

    #[test]
    fn test_empty_document_is_bare_svg() {
        let document = VectorDocument::new(32, 16);
        let svg = document.to_svg();
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_native_vector_matches_module_matrix() {
        let encoding = Encoding::generate("HELLO", CorrectionLevel::L).unwrap();
        let document = vector_from_encoding(&encoding, 8, 0);

        assert_eq!(document.width(), encoding.module_count * 8);
        let dark_modules = (0..encoding.module_count)
            .flat_map(|y| (0..encoding.module_count).map(move |x| (x, y)))
            .filter(|&(x, y)| encoding.is_dark(x, y))
            .count();
        assert_eq!(document.rect_count(), dark_modules);
    }

    #[test]
    fn test_native_vector_quiet_zone_offsets_rects() {
        let encoding = Encoding::generate("HELLO", CorrectionLevel::L).unwrap();
        let document = vector_from_encoding(&encoding, 8, 4);

        assert_eq!(document.width(), (encoding.module_count + 8) * 8);
        // Finder pattern corner lands after the quiet zone.
        assert!(document
            .rects()
            .iter()
            .any(|r| r.x == 32 && r.y == 32 && r.side == 8));
        assert!(document.rects().iter().all(|r| r.x >= 32 && r.y >= 32));
    }
}
