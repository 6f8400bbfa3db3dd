//! qrsmith - QR code generator with automatic error-correction selection
//!
//! Wraps the `qrcode` encoder, picks the strongest correction level that
//! does not grow the symbol, and exports deterministic PNG/SVG artifacts.

pub mod cli;
pub mod core;
pub mod encode;
pub mod export;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::{
    config::{AppConfig, RenderMode},
    error::{AppError, AppResult},
    models::{CorrectionLevel, EncodingRequest, LevelChoice, QrInfo},
};

pub use crate::encode::{
    select::{required_version, select_optimal_level},
    Encoding,
};

pub use crate::export::{raster_to_vector, VectorDocument};

pub use crate::session::{Event, Outcome, Session};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
