use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::app::App;
use crate::core::config::{AppConfig, RenderMode};
use crate::core::models::{LevelChoice, QrInfo};
use crate::encode::select::{DeferredProbe, VersionProbe};
use crate::session::{Event, Outcome, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Text to encode into the QR code
    text: Option<String>,

    /// Correction level: L, M, Q, H, or "auto"
    #[arg(short, long, default_value = "auto")]
    level: String,

    /// Export a PNG into the output directory
    #[arg(long)]
    png: bool,

    /// Export an SVG into the output directory
    #[arg(long)]
    svg: bool,

    /// Output directory for exports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Module size in pixels
    #[arg(short, long)]
    module_size: Option<u32>,

    /// Render to an internal raster surface instead of vector
    #[arg(long)]
    raster: bool,

    /// Disable the terminal preview
    #[arg(long)]
    no_preview: bool,

    /// Print the required version at each correction level
    #[arg(long)]
    probe: bool,

    /// Toggle the persisted dark-mode preference and exit
    #[arg(long)]
    toggle_theme: bool,

    /// Infer version and module count from an exported raster image
    #[arg(long, value_name = "IMAGE")]
    inspect: Option<PathBuf>,

    /// Generate example configuration file
    #[arg(long)]
    generate_config: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        // Generate config file if requested
        if self.generate_config {
            AppConfig::save_example()?;
            println!("Generated example configuration file: qrsmith.example.toml");
            return Ok(());
        }

        // Load configuration
        let mut config = AppConfig::load().unwrap_or_else(|e| {
            info!("Using default configuration ({})", e);
            AppConfig::default()
        });

        // Override config with CLI arguments
        if let Some(ref output) = self.output {
            config.export.directory = output.clone();
        }
        if let Some(module_size) = self.module_size {
            config.render.module_size = module_size;
        }
        if self.raster {
            config.render.mode = RenderMode::Raster;
        }
        if self.no_preview {
            config.ui.preview = false;
        }

        if self.toggle_theme {
            let mut session = Session::new(config);
            if let Outcome::ThemeChanged { dark_mode, label } =
                session.dispatch(Event::ToggleTheme)?
            {
                println!("{} (dark mode {})", label, if dark_mode { "on" } else { "off" });
            }
            return Ok(());
        }

        if let Some(ref path) = self.inspect {
            let info = inspect_raster(path, config.render.module_size)?;
            println!("version {} ({} modules)", info.version, info.modules_label());
            return Ok(());
        }

        let choice: LevelChoice = self.level.parse()?;
        let text = self.text.clone().unwrap_or_default();

        let app = App::new(config, text, choice, self.png, self.svg, self.probe);
        app.run()
    }
}

/// Reads back version and module count from a previously exported raster,
/// using only its pixel dimensions. The probe starts deferred and is
/// finalized once the image header has been decoded.
fn inspect_raster(path: &Path, module_size: u32) -> Result<QrInfo> {
    let image = image::open(path)?.to_rgba8();
    let probe = VersionProbe::Deferred(DeferredProbe::FromRaster {
        width_px: image.width(),
        module_size,
    });
    Ok(probe.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::CorrectionLevel;
    use crate::encode::Encoding;
    use crate::export::{raster_from_encoding, save_png};
    use tempfile::TempDir;

    #[test]
    fn test_inspect_round_trips_exported_raster() {
        let temp_dir = TempDir::new().unwrap();
        let encoding = Encoding::generate("HELLO", CorrectionLevel::L).unwrap();
        let image = raster_from_encoding(&encoding, 8, 0);
        let path = save_png(&image, temp_dir.path(), "qrcode").unwrap();

        let info = inspect_raster(&path, 8).unwrap();
        assert_eq!(info.version, encoding.version);
        assert_eq!(info.module_count, encoding.module_count);
    }
}
