//! Application constants.

/// Channel buffer size for content load results.
pub const LOAD_CHANNEL_SIZE: usize = 4;

/// Name of the settings directory under the user config dir.
pub const SETTINGS_DIR: &str = "certring";

/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.toml";
