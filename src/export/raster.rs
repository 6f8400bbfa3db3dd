//! Raster (PNG) output: the module matrix painted onto an RGBA buffer,
//! one opaque block per module.

use image::{Rgba, RgbaImage};

use crate::encode::Encoding;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Paints the encoding into a fresh raster at `module_size` pixels per
/// module with a `quiet_zone`-module light border.
pub fn raster_from_encoding(encoding: &Encoding, module_size: u32, quiet_zone: u32) -> RgbaImage {
    let side = module_size.max(1);
    let total_modules = encoding.module_count + 2 * quiet_zone;
    let dimension = total_modules * side;

    let mut image = RgbaImage::new(dimension, dimension);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let module_x = (x / side) as i64 - quiet_zone as i64;
        let module_y = (y / side) as i64 - quiet_zone as i64;
        let in_symbol = module_x >= 0
            && module_y >= 0
            && (module_x as u32) < encoding.module_count
            && (module_y as u32) < encoding.module_count;
        *pixel = if in_symbol && encoding.is_dark(module_x as u32, module_y as u32) {
            DARK
        } else {
            LIGHT
        };
    }
    image
}
