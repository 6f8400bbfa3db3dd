//! Session state and event dispatch.
//!
//! All UI-triggered operations funnel through [`Session::dispatch`]: text
//! and level changes regenerate the code, export events write artifacts,
//! the theme toggle flips and persists the dark-mode flag. Handlers run to
//! completion; there is no background work.

pub mod prefs;

use image::RgbaImage;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::config::{AppConfig, RenderMode};
use crate::core::error::AppResult;
use crate::core::models::{CorrectionLevel, EncodingRequest, LevelChoice, QrInfo};
use crate::encode::select::select_optimal_level;
use crate::encode::Encoding;
use crate::export::{
    raster_from_encoding, raster_to_vector, save_png, save_svg, vector_from_encoding,
    VectorDocument,
};
use prefs::Prefs;

/// The render surface the encoder produced: a pixel buffer or a vector
/// document, per the configured render mode.
pub enum Surface {
    Raster(RgbaImage),
    Vector(VectorDocument),
}

/// The cached current encoding plus the surface rendered from it. Kept
/// between events so an unchanged request is not re-encoded.
pub struct Rendered {
    pub request: EncodingRequest,
    pub encoding: Encoding,
    pub surface: Surface,
}

#[derive(Debug, Clone)]
pub enum Event {
    TextChanged(String),
    LevelChanged(LevelChoice),
    Regenerate,
    ExportPng,
    ExportSvg,
    ToggleTheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered {
        info: QrInfo,
        effective_level: CorrectionLevel,
    },
    Exported(PathBuf),
    /// Export was requested before anything was rendered. Benign; no file
    /// is produced and no error is raised.
    NothingToExport,
    ThemeChanged {
        dark_mode: bool,
        label: &'static str,
    },
}

pub struct Session {
    config: AppConfig,
    prefs: Prefs,
    text: String,
    choice: LevelChoice,
    current: Option<Rendered>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        let prefs = Prefs::load(&config.ui.prefs_file);
        Self {
            config,
            prefs,
            text: String::new(),
            choice: LevelChoice::Auto,
            current: None,
        }
    }

    /// Startup-time level setting; does not regenerate.
    pub fn set_choice(&mut self, choice: LevelChoice) {
        self.choice = choice;
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&Rendered> {
        self.current.as_ref()
    }

    pub fn dispatch(&mut self, event: Event) -> AppResult<Outcome> {
        match event {
            Event::TextChanged(text) => {
                self.text = text;
                self.regenerate()
            }
            Event::LevelChanged(choice) => {
                self.choice = choice;
                self.regenerate()
            }
            Event::Regenerate => self.regenerate(),
            Event::ExportPng => self.export_png(),
            Event::ExportSvg => self.export_svg(),
            Event::ToggleTheme => self.toggle_theme(),
        }
    }

    fn regenerate(&mut self) -> AppResult<Outcome> {
        let effective_level = match self.choice {
            LevelChoice::Fixed(level) => level,
            LevelChoice::Auto => {
                let level = select_optimal_level(&self.text)?;
                info!("auto correction level resolved to {}", level);
                level
            }
        };

        let request = EncodingRequest::new(self.text.clone(), effective_level);
        let reusable = self
            .current
            .as_ref()
            .map_or(false, |rendered| rendered.request == request);
        if reusable {
            debug!("reusing cached encoding for unchanged request");
        } else {
            let encoding = Encoding::generate(&request.text, request.level)?;
            let render = &self.config.render;
            let surface = match render.mode {
                RenderMode::Vector => Surface::Vector(vector_from_encoding(
                    &encoding,
                    render.module_size,
                    render.quiet_zone,
                )),
                RenderMode::Raster => Surface::Raster(raster_from_encoding(
                    &encoding,
                    render.module_size,
                    render.quiet_zone,
                )),
            };
            self.current = Some(Rendered {
                request,
                encoding,
                surface,
            });
        }

        // current is always populated here
        let info = self
            .current
            .as_ref()
            .map(|rendered| rendered.encoding.info())
            .unwrap_or(QrInfo {
                version: 0,
                module_count: 0,
            });
        Ok(Outcome::Rendered {
            info,
            effective_level,
        })
    }

    fn export_png(&mut self) -> AppResult<Outcome> {
        let Some(rendered) = self.current.as_ref() else {
            info!("nothing to export yet");
            return Ok(Outcome::NothingToExport);
        };
        let export = &self.config.export;
        let path = match &rendered.surface {
            Surface::Raster(image) => save_png(image, &export.directory, &export.basename)?,
            Surface::Vector(_) => {
                // No live raster; rasterize from the module matrix.
                let render = &self.config.render;
                let image =
                    raster_from_encoding(&rendered.encoding, render.module_size, render.quiet_zone);
                save_png(&image, &export.directory, &export.basename)?
            }
        };
        Ok(Outcome::Exported(path))
    }

    fn export_svg(&mut self) -> AppResult<Outcome> {
        let Some(rendered) = self.current.as_ref() else {
            info!("nothing to export yet");
            return Ok(Outcome::NothingToExport);
        };
        let export = &self.config.export;
        let path = match &rendered.surface {
            // Native vector output is exported unchanged.
            Surface::Vector(document) => save_svg(document, &export.directory, &export.basename)?,
            // Raster-only surface: reconstruct a vector by grid sampling.
            Surface::Raster(image) => {
                let document = raster_to_vector(image, self.config.render.module_size);
                save_svg(&document, &export.directory, &export.basename)?
            }
        };
        Ok(Outcome::Exported(path))
    }

    fn toggle_theme(&mut self) -> AppResult<Outcome> {
        let label = self.prefs.toggle();
        self.prefs.save(&self.config.ui.prefs_file)?;
        info!("dark mode {}", if self.prefs.dark_mode { "on" } else { "off" });
        Ok(Outcome::ThemeChanged {
            dark_mode: self.prefs.dark_mode,
            label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir, mode: RenderMode) -> AppConfig {
        let mut config = AppConfig::default();
        config.render.mode = mode;
        config.export.directory = temp_dir.path().to_path_buf();
        config.ui.prefs_file = temp_dir.path().join("prefs.toml");
        config
    }

    #[test]
    fn test_fixed_level_is_respected() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new(test_config(&temp_dir, RenderMode::Vector));

        session
            .dispatch(Event::LevelChanged(LevelChoice::Fixed(CorrectionLevel::H)))
            .unwrap();
        let outcome = session
            .dispatch(Event::TextChanged("HELLO".to_string()))
            .unwrap();
        match outcome {
            Outcome::Rendered {
                effective_level, ..
            } => assert_eq!(effective_level, CorrectionLevel::H),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_auto_level_never_raises_version() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new(test_config(&temp_dir, RenderMode::Vector));

        let text = "HELLO WORLD FROM QRSMITH";
        let base = crate::encode::select::required_version(text, CorrectionLevel::L).unwrap();
        let outcome = session
            .dispatch(Event::TextChanged(text.to_string()))
            .unwrap();
        match outcome {
            Outcome::Rendered { info, .. } => assert_eq!(info.version, base),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_export_before_render_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new(test_config(&temp_dir, RenderMode::Vector));

        assert_eq!(
            session.dispatch(Event::ExportPng).unwrap(),
            Outcome::NothingToExport
        );
        assert_eq!(
            session.dispatch(Event::ExportSvg).unwrap(),
            Outcome::NothingToExport
        );
        assert!(!temp_dir.path().join("qrcode.png").exists());
        assert!(!temp_dir.path().join("qrcode.svg").exists());
    }

    #[test]
    fn test_theme_toggle_persists_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir, RenderMode::Vector);
        let mut session = Session::new(config.clone());

        let first = session.dispatch(Event::ToggleTheme).unwrap();
        assert_eq!(
            first,
            Outcome::ThemeChanged {
                dark_mode: true,
                label: prefs::DARK_ACTIVE_LABEL
            }
        );
        // A new session sees the persisted flag.
        assert!(Session::new(config.clone()).prefs().dark_mode);

        let second = session.dispatch(Event::ToggleTheme).unwrap();
        assert_eq!(
            second,
            Outcome::ThemeChanged {
                dark_mode: false,
                label: prefs::LIGHT_ACTIVE_LABEL
            }
        );
        assert!(!Session::new(config).prefs().dark_mode);
    }

    #[test]
    fn test_unchanged_request_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = Session::new(test_config(&temp_dir, RenderMode::Vector));

        let first = session
            .dispatch(Event::TextChanged("HELLO".to_string()))
            .unwrap();
        let second = session.dispatch(Event::Regenerate).unwrap();
        assert_eq!(first, second);
    }
}
