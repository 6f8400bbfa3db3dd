pub mod raster;
pub mod vector;

pub use raster::raster_from_encoding;
pub use vector::{raster_to_vector, vector_from_encoding, ModuleRect, VectorDocument};

use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::error::AppResult;

/// Writes the raster as `<basename>.png` in `directory`, creating the
/// directory if needed. Returns the path written.
pub fn save_png(image: &RgbaImage, directory: &Path, basename: &str) -> AppResult<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(format!("{basename}.png"));
    image.save(&path)?;
    info!("wrote {}", path.display());
    Ok(path)
}

/// Writes the vector document as `<basename>.svg` in `directory`.
pub fn save_svg(document: &VectorDocument, directory: &Path, basename: &str) -> AppResult<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(format!("{basename}.svg"));
    std::fs::write(&path, document.to_svg())?;
    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CorrectionLevel;
    use crate::encode::Encoding;
    use tempfile::TempDir;

    #[test]
    fn test_save_png_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let encoding = Encoding::generate("HELLO", CorrectionLevel::L).unwrap();
        let image = raster_from_encoding(&encoding, 8, 0);

        let path = save_png(&image, temp_dir.path(), "qrcode").unwrap();
        assert_eq!(path, temp_dir.path().join("qrcode.png"));
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.width(), image.width());
    }

    #[test]
    fn test_save_svg_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let encoding = Encoding::generate("HELLO", CorrectionLevel::L).unwrap();
        let document = vector_from_encoding(&encoding, 8, 0);

        let path = save_svg(&document, temp_dir.path(), "qrcode").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(content.contains("<rect"));
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("qr");
        let encoding = Encoding::generate("HELLO", CorrectionLevel::L).unwrap();
        let image = raster_from_encoding(&encoding, 8, 0);

        let path = save_png(&image, &nested, "qrcode").unwrap();
        assert!(path.exists());
    }
}
