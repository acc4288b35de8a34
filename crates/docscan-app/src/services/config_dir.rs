// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config directory resolution and config file persistence.

use std::path::{Path, PathBuf};

use docscan_core::{AppConfig, Result};
use tracing::debug;

pub const CONFIG_FILE: &str = "config.json";

/// Return the application config directory. Not created until a config is
/// written.
pub fn config_dir() -> PathBuf {
    base_dir().join("docscan")
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

fn base_dir() -> PathBuf {
    // Try XDG config dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    // Last resort
    PathBuf::from(".")
}

/// Load the config at `path`, falling back to defaults when the file does not
/// exist. A file that exists but cannot be parsed is an error.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }
        Err(err) => return Err(err.into()),
    };
    let config: AppConfig = serde_json::from_str(&data)?;
    config.validate()?;
    Ok(config)
}

pub fn persist_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}
