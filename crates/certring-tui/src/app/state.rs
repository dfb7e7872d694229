//! Application state types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use certring_core::{Certificate, ContentError, DEFAULT_AUTOPLAY_PERIOD_MS};

use super::constants::{SETTINGS_DIR, SETTINGS_FILE};
use crate::theme::ThemeVariant;

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    /// Help overlay is open.
    Help,
    /// Detail overlay for the activated certificate is open.
    Detail,
    Quit,
}

/// Result of a background content load.
#[derive(Debug)]
pub enum LoadResult {
    Loaded(Vec<Certificate>),
    Failed(ContentError),
}

/// User settings persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Color theme.
    pub theme: ThemeVariant,
    /// Whether autoplay starts enabled.
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub autoplay_period_ms: u64,
    /// Show descriptions on the front card.
    pub show_details: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Dark,
            autoplay: true,
            autoplay_period_ms: DEFAULT_AUTOPLAY_PERIOD_MS,
            show_details: true,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`, or return defaults if it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            Self::default()
        })
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its parent directory if needed.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}
