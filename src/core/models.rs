use qrcode::EcLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::AppError;

/// One of the four standard QR error-correction strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionLevel {
    L,
    M,
    Q,
    H,
}

impl CorrectionLevel {
    /// Levels ordered by increasing correction strength. The level selector
    /// relies on the encoder requiring a non-decreasing version along this
    /// ranking for fixed input text.
    pub const RANKING: [CorrectionLevel; 4] = [
        CorrectionLevel::L,
        CorrectionLevel::M,
        CorrectionLevel::Q,
        CorrectionLevel::H,
    ];

    pub fn ec_level(self) -> EcLevel {
        match self {
            CorrectionLevel::L => EcLevel::L,
            CorrectionLevel::M => EcLevel::M,
            CorrectionLevel::Q => EcLevel::Q,
            CorrectionLevel::H => EcLevel::H,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CorrectionLevel::L => "L",
            CorrectionLevel::M => "M",
            CorrectionLevel::Q => "Q",
            CorrectionLevel::H => "H",
        }
    }
}

impl fmt::Display for CorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrectionLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(CorrectionLevel::L),
            "M" => Ok(CorrectionLevel::M),
            "Q" => Ok(CorrectionLevel::Q),
            "H" => Ok(CorrectionLevel::H),
            other => Err(AppError::InvalidLevel(other.to_string())),
        }
    }
}

/// The user-facing level setting: a fixed level or automatic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChoice {
    Auto,
    Fixed(CorrectionLevel),
}

impl fmt::Display for LevelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelChoice::Auto => f.write_str("auto"),
            LevelChoice::Fixed(level) => level.fmt(f),
        }
    }
}

impl FromStr for LevelChoice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(LevelChoice::Auto)
        } else {
            Ok(LevelChoice::Fixed(s.parse()?))
        }
    }
}

/// What the session asked the encoder for. Kept alongside the cached
/// encoding so an unchanged request can reuse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingRequest {
    pub text: String,
    pub level: CorrectionLevel,
}

impl EncodingRequest {
    pub fn new(text: impl Into<String>, level: CorrectionLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Version and module count read back from an encoding (or inferred from
/// rendered output when the encoder is not available).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrInfo {
    pub version: i16,
    pub module_count: u32,
}

impl QrInfo {
    /// Display label in the `N×N` form, e.g. `21×21`.
    pub fn modules_label(&self) -> String {
        format!("{0}×{0}", self.module_count)
    }
}
