//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Retry settings for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Total number of attempts (at least 1)
    pub max_retries: u32,

    /// Backoff unit in seconds (at least 1)
    pub backoff_unit: u32,

    /// Per-attempt timeout
    pub timeout: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            backoff_unit: defaults::BACKOFF_UNIT_SECS,
            timeout: defaults::timeout(),
        }
    }
}

/// Source of the request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    /// Body given inline on the command line
    Inline(Vec<u8>),
    /// Body streamed from a file
    File(PathBuf),
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Target URL (required)
    pub url: Url,

    /// HTTP method
    pub method: Method,

    /// HTTP headers
    pub headers: HeaderMap,

    /// Request body, if any
    pub body: Option<BodySource>,

    /// Retry settings
    pub retry: RetrySettings,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            None => "none".to_string(),
            Some(BodySource::Inline(bytes)) => format!("{} bytes", bytes.len()),
            Some(BodySource::File(path)) => path.display().to_string(),
        };

        write!(
            f,
            "Config {{ url: {}, method: {}, headers: {}, body: {}, retry: {}x/{}s, timeout: {}s }}",
            self.url,
            self.method,
            self.headers.len(),
            body,
            self.retry.max_retries,
            self.retry.backoff_unit,
            self.retry.timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing or invalid
    /// - The method or a header is invalid
    /// - Both `--data` and `--data-file` are given
    /// - A retry setting is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let url = Self::resolve_url(cli, toml)?;
        let method = Self::resolve_method(cli, toml)?;
        let headers = Self::resolve_headers(cli, toml)?;
        let body = Self::resolve_body(cli)?;
        let retry = Self::resolve_retry(cli, toml)?;

        Ok(Self {
            url,
            method,
            headers,
            body,
            retry,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.request.url.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::URL, "Use --url or set request.url in config file")
            })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_method(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Method, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let method_str = cli
            .method
            .as_deref()
            .or_else(|| toml.and_then(|t| t.request.method.as_deref()))
            .unwrap_or(defaults::METHOD);

        method_str
            .to_ascii_uppercase()
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(method_str.to_string()))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // TOML first so CLI can override
        if let Some(toml) = toml {
            for (name, value) in &toml.request.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn resolve_body(cli: &Cli) -> Result<Option<BodySource>, ConfigError> {
        match (&cli.data, &cli.data_file) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingBody),
            (Some(data), None) => Ok(Some(BodySource::Inline(data.clone().into_bytes()))),
            (None, Some(path)) => Ok(Some(BodySource::File(path.clone()))),
            (None, None) => Ok(None),
        }
    }

    fn resolve_retry(cli: &Cli, toml: Option<&TomlConfig>) -> Result<RetrySettings, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_retries = cli
            .retries
            .or_else(|| retry.and_then(|r| r.max_retries))
            .unwrap_or(defaults::MAX_RETRIES);

        let backoff_unit = cli
            .backoff
            .or_else(|| retry.and_then(|r| r.backoff_unit))
            .unwrap_or(defaults::BACKOFF_UNIT_SECS);

        let timeout_secs = cli
            .timeout
            .or_else(|| retry.and_then(|r| r.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if max_retries == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_retries must be greater than 0".to_string(),
            ));
        }

        if backoff_unit == 0 {
            return Err(ConfigError::InvalidRetry(
                "backoff_unit must be greater than 0".to_string(),
            ));
        }

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(RetrySettings {
            max_retries,
            backoff_unit,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Split on whichever of '=' or ':' comes first, so values may contain the other
    let separator = s.find(['=', ':']).ok_or_else(|| ConfigError::InvalidHeader {
        value: s.to_string(),
    })?;
    let (name, value) = (&s[..separator], &s[separator + 1..]);

    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
