//! Terminal user interface for certring.
//!
//! Shows a ring of certificates as three cards, a front card with one
//! neighbor on each side, and rotates through them on a timer.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Built-in certificates
//! certring_tui::run(None).unwrap();
//!
//! // Certificates from a file, advancing every two seconds
//! let config = certring_tui::TuiConfig::new()
//!     .with_content(PathBuf::from("certs.json"))
//!     .with_autoplay_period_ms(2000);
//! certring_tui::run_with_config(config).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `h`/`l` - Previous/next certificate
//! - `1`-`9` - Jump to a position
//! - `Enter` - Open the front certificate
//! - `Space` - Pause or resume autoplay
//! - `?` - Help
//! - `q` - Quit

use std::path::PathBuf;
use std::time::Duration;

pub mod app;
mod event;
mod theme;
mod ui;

pub use app::{App, AppResult};
pub use theme::{Theme, ThemeVariant};

/// Launch options that override the saved user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Content file. `None` shows the built-in certificates.
    pub content: Option<PathBuf>,
    /// Autoplay period override.
    pub autoplay_period_ms: Option<u64>,
    /// Autoplay on/off override.
    pub autoplay: Option<bool>,
    /// Start with the light theme.
    pub light: bool,
}

impl TuiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, path: impl Into<PathBuf>) -> Self {
        self.content = Some(path.into());
        self
    }

    pub fn with_autoplay_period_ms(mut self, period_ms: u64) -> Self {
        self.autoplay_period_ms = Some(period_ms);
        self
    }

    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = Some(enabled);
        self
    }

    pub fn with_light_theme(mut self, light: bool) -> Self {
        self.light = light;
        self
    }
}

/// Run the TUI application on `content`, or the built-in certificates.
pub fn run(content: Option<PathBuf>) -> AppResult<()> {
    run_with_config(TuiConfig {
        content,
        ..TuiConfig::default()
    })
}

/// Run the TUI application with explicit launch options.
pub fn run_with_config(config: TuiConfig) -> AppResult<()> {
    // Fail before touching the terminal on bad options
    let app = App::with_config(config)?;

    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Shutdown runtime immediately to cancel background tasks
    rt.shutdown_timeout(Duration::from_millis(100));

    result
}
