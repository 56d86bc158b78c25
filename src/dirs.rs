//! Application directory paths for websift.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/websift/` | `~/.local/share/websift/` |
//! | Config | `~/Library/Application Support/websift/` | `~/.config/websift/` |
//!
//! # Environment Overrides
//!
//! - `WEBSIFT_DATA_DIR` — overrides [`data_dir`]
//! - `WEBSIFT_CONFIG_DIR` — overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Resolves to `dirs::data_dir()/websift/` by default. Override with
/// the `WEBSIFT_DATA_DIR` environment variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("WEBSIFT_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("websift"))
        .unwrap_or_else(|| PathBuf::from("/tmp/websift-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/websift/` by default. Override with
/// the `WEBSIFT_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("WEBSIFT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("websift"))
        .unwrap_or_else(|| PathBuf::from("/tmp/websift-config"))
}

/// Log file directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
