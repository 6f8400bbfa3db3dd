//! Persisted UI preferences. One boolean today: the dark-mode flag, stored
//! as TOML at a fixed path, read once at session startup and written on
//! every toggle.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::error::{AppError, AppResult};

/// Label shown while dark mode is active (the control switches back to
/// light), matching the toggle's wording.
pub const DARK_ACTIVE_LABEL: &str = "Light Mode";
pub const LIGHT_ACTIVE_LABEL: &str = "Dark Mode";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Prefs {
    /// Loads preferences from `path`. A missing or unparsable file falls
    /// back to defaults; startup never fails on preferences.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!("ignoring malformed preferences at {}: {}", path.display(), e);
                Prefs::default()
            }),
            Err(_) => Prefs::default(),
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Prefs(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Flips the dark-mode flag and returns the new toggle label.
    pub fn toggle(&mut self) -> &'static str {
        self.dark_mode = !self.dark_mode;
        self.label()
    }

    pub fn label(&self) -> &'static str {
        if self.dark_mode {
            DARK_ACTIVE_LABEL
        } else {
            LIGHT_ACTIVE_LABEL
        }
    }
}
