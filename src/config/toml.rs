//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Request configuration section
    #[serde(default)]
    pub request: RequestSection,

    /// Retry configuration section
    #[serde(default)]
    pub retry: RetrySection,
}

/// Request configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestSection {
    /// Target URL
    pub url: Option<String>,

    /// HTTP method (default: GET)
    pub method: Option<String>,

    /// HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Retry configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Total number of attempts
    pub max_retries: Option<u32>,

    /// Backoff unit in seconds
    pub backoff_unit: Option<u32>,

    /// Per-attempt timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# http-retry Configuration File

[request]
# Target URL (required unless passed with --url)
# url = "https://api.example.com/items"

# HTTP method (default: GET, can be overridden by --method)
# method = "GET"

# HTTP headers (--header values override entries with the same name)
# [request.headers]
# Accept = "application/json"

[retry]
# Total number of attempts, including the first one (default: 3)
# max_retries = 3

# Backoff unit in seconds (default: 2)
# The delay after failed attempt N (counting from 0) is N * backoff_unit,
# so with the default the waits are 0s, 2s, 4s.
# backoff_unit = 2

# Per-attempt timeout in seconds (default: 30)
# timeout = 30
"#
    .to_string()
}
