//! Carousel configuration types.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default autoplay period in milliseconds.
pub const DEFAULT_AUTOPLAY_PERIOD_MS: u64 = 5000;

/// Configuration for a carousel instance.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CarouselConfig {
    /// Interval between autoplay ticks, in milliseconds.
    #[builder(default = "DEFAULT_AUTOPLAY_PERIOD_MS")]
    #[serde(default = "default_period_ms")]
    pub autoplay_period_ms: u64,

    /// Advance automatically on a timer.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub autoplay: bool,

    /// Show the built-in certificates when the source yields none.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub fallback_to_builtin: bool,
}

fn default_true() -> bool {
    true
}

fn default_period_ms() -> u64 {
    DEFAULT_AUTOPLAY_PERIOD_MS
}

impl CarouselConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.autoplay_period_ms == Some(0) {
            return Err("Autoplay period must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl CarouselConfig {
    /// Create a new config builder.
    pub fn builder() -> CarouselConfigBuilder {
        CarouselConfigBuilder::default()
    }

    /// Autoplay period as a duration.
    pub fn autoplay_period(&self) -> Duration {
        Duration::from_millis(self.autoplay_period_ms)
    }

    /// Check a config that was deserialized rather than built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autoplay_period_ms == 0 {
            return Err(ConfigError::Invalid {
                message: "Autoplay period must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_period_ms: DEFAULT_AUTOPLAY_PERIOD_MS,
            autoplay: true,
            fallback_to_builtin: true,
        }
    }
}
