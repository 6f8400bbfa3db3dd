use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub export: ExportConfig,
    pub ui: UiConfig,
}

/// Internal render surface kind. Vector matches the original behavior of
/// preferring a scalable output; raster exercises the sampling fallback on
/// SVG export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Raster,
    Vector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_module_size")]
    pub module_size: u32,
    /// Quiet-zone border width, in modules.
    #[serde(default)]
    pub quiet_zone: u32,
    #[serde(default = "default_mode")]
    pub mode: RenderMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_basename")]
    pub basename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub preview: bool,
    #[serde(default = "default_prefs_file")]
    pub prefs_file: PathBuf,
}

// Default value functions
fn default_module_size() -> u32 {
    8
}
fn default_mode() -> RenderMode {
    RenderMode::Vector
}
fn default_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_basename() -> String {
    "qrcode".to_string()
}
fn default_true() -> bool {
    true
}
fn default_prefs_file() -> PathBuf {
    PathBuf::from("qrsmith-prefs.toml")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig {
                module_size: default_module_size(),
                quiet_zone: 0,
                mode: default_mode(),
            },
            export: ExportConfig {
                directory: default_directory(),
                basename: default_basename(),
            },
            ui: UiConfig {
                preview: default_true(),
                prefs_file: default_prefs_file(),
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("qrsmith.toml").required(false))
            .add_source(config::Environment::with_prefix("QRSMITH"));

        // Override with individual environment variables
        if let Ok(dir) = std::env::var("QRSMITH_EXPORT_DIR") {
            builder = builder.set_override("export.directory", dir)?;
        }
        if let Ok(size) = std::env::var("QRSMITH_MODULE_SIZE") {
            builder = builder.set_override("render.module_size", size)?;
        }
        if let Ok(prefs) = std::env::var("QRSMITH_PREFS_FILE") {
            builder = builder.set_override("ui.prefs_file", prefs)?;
        }

        let settings = builder.build()?;
        let config: AppConfig = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn save_example() -> Result<()> {
        let example_config = AppConfig::default();
        let toml_string = toml::to_string_pretty(&example_config)?;
        std::fs::write("qrsmith.example.toml", toml_string)?;
        Ok(())
    }

    pub fn from_toml(toml_content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_content)?;
        Ok(config)
    }
}
