//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::LoggerConfig;
use crate::error::LoggerResult;

/// Load a logger configuration from a TOML file.
pub fn load_config(path: &Path) -> LoggerResult<LoggerConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse a logger configuration from TOML text.
pub fn parse_config(content: &str) -> LoggerResult<LoggerConfig> {
    let config: LoggerConfig = toml::from_str(content)?;
    tracing::debug!(provider = %config.provider, level = ?config.level, "Logger configuration parsed");
    Ok(config)
}
