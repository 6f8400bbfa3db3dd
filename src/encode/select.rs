//! Automatic correction-level selection.
//!
//! Probes the encoder at each of the four levels and picks the strongest one
//! that does not push the symbol past the version required at level L. The
//! probe encodings are throwaway instances; the session's live encoding is
//! never touched.

use tracing::debug;

use crate::core::error::AppResult;
use crate::core::models::{CorrectionLevel, QrInfo};
use crate::encode::Encoding;

/// Version required to encode `text` at `level`. Encodes with an isolated,
/// throwaway instance that is dropped before returning. Capacity failures
/// propagate.
pub fn required_version(text: &str, level: CorrectionLevel) -> AppResult<i16> {
    let probe = Encoding::generate(text, level)?;
    Ok(probe.version)
}

/// Strongest correction level whose required version equals the version
/// required at level L.
pub fn select_optimal_level(text: &str) -> AppResult<CorrectionLevel> {
    let selected = select_optimal_with(|level| required_version(text, level))?;
    debug!("optimal level for {} bytes of input: {}", text.len(), selected);
    Ok(selected)
}

/// The selection walk over an injected probe. Walks the ranking from L
/// upward, advancing while the probed version matches the base version and
/// stopping at the first mismatch.
pub fn select_optimal_with<F>(mut probe: F) -> AppResult<CorrectionLevel>
where
    F: FnMut(CorrectionLevel) -> AppResult<i16>,
{
    let ranking = CorrectionLevel::RANKING;
    let base_version = probe(ranking[0])?;
    let mut best = ranking[0];
    for &level in &ranking[1..] {
        if probe(level)? == base_version {
            best = level;
        } else {
            break;
        }
    }
    Ok(best)
}

/// Version information that is either read directly from the encoder or
/// deferred until it can be inferred from rendered output alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionProbe {
    Ready(QrInfo),
    Deferred(DeferredProbe),
}

/// A pending inference from rendered output dimensions, finalized when the
/// encoder's own metadata is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredProbe {
    /// A vector viewBox width, already in module units.
    FromViewBox { width_modules: u32 },
    /// A raster width in pixels plus the module size it was rendered at.
    FromRaster { width_px: u32, module_size: u32 },
}

impl DeferredProbe {
    pub fn finalize(&self) -> QrInfo {
        match *self {
            DeferredProbe::FromViewBox { width_modules } => {
                let version = ceil_div(width_modules.saturating_sub(17), 4);
                QrInfo {
                    version: version as i16,
                    module_count: version * 4 + 17,
                }
            }
            DeferredProbe::FromRaster {
                width_px,
                module_size,
            } => {
                let modules = width_px / module_size.max(1);
                let version = ceil_div(modules.saturating_sub(17), 4);
                QrInfo {
                    version: version as i16,
                    module_count: modules,
                }
            }
        }
    }
}

impl VersionProbe {
    pub fn finalize(self) -> QrInfo {
        match self {
            VersionProbe::Ready(info) => info,
            VersionProbe::Deferred(pending) => pending.finalize(),
        }
    }
}

fn ceil_div(numerator: u32, denominator: u32) -> u32 {
    (numerator + denominator - 1) / denominator
}
