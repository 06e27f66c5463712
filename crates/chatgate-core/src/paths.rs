//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the ChatGate base directory (~/.chatgate).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".chatgate"))
}

/// Get the main config file path (~/.chatgate/chatgate.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("chatgate.json5"))
}
