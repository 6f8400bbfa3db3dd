pub mod select;

use qrcode::{Color, QrCode};
use tracing::debug;

use crate::core::error::AppResult;
use crate::core::models::{CorrectionLevel, QrInfo};

/// One encoded QR symbol plus the metadata read back from the encoder.
///
/// The encoder itself is the `qrcode` crate; this wrapper is the only place
/// that talks to it, so version and module count are captured once at
/// construction time.
pub struct Encoding {
    code: QrCode,
    pub level: CorrectionLevel,
    pub version: i16,
    pub module_count: u32,
}

impl Encoding {
    /// Encodes `text` at the given correction level. Fails with
    /// `AppError::Encode` when the text exceeds the capacity of every
    /// version at this level; callers propagate that failure rather than
    /// substituting a clamped version.
    pub fn generate(text: &str, level: CorrectionLevel) -> AppResult<Self> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), level.ec_level())?;
        let version = match code.version() {
            // Micro symbols are never produced by this constructor; the
            // ordinal is opaque either way.
            qrcode::Version::Normal(n) | qrcode::Version::Micro(n) => n,
        };
        let module_count = code.width() as u32;
        debug!(
            "encoded {} bytes at level {}: version {}, {} modules",
            text.len(),
            level,
            version,
            module_count
        );
        Ok(Self {
            code,
            level,
            version,
            module_count,
        })
    }

    pub fn info(&self) -> QrInfo {
        QrInfo {
            version: self.version,
            module_count: self.module_count,
        }
    }

    /// Whether the module at grid position (x, y) is dark. Out-of-range
    /// coordinates read as light, which keeps quiet-zone rendering simple.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.module_count || y >= self.module_count {
            return false;
        }
        self.code[(x as usize, y as usize)] == Color::Dark
    }

    pub fn code(&self) -> &QrCode {
        &self.code
    }
}
