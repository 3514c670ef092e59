//! TOML Configuration File Support
//!
//! The client needs very little configuration: where the backend lives and
//! how long notifications stay up. The backend base URL is fixed per
//! deployment, either baked in at build time or dropped into the user's
//! config directory at install time.
//!
//! # Configuration Priority
//!
//! 1. `~/.config/switchboard/client.toml` (deploy time)
//! 2. `CHAT_API_URL` captured at build time
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "https://demo.example.edu"
//!
//! [notifications]
//! ttl_ms = 1700
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notify::NOTIFICATION_TTL;

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Base URL injected at build time, if any
pub const BUILD_BASE_URL: Option<&str> = option_env!("CHAT_API_URL");

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from the TOML configuration file
    File,
    /// Value baked in at build time
    Build,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "config file"),
            Self::Build => write!(f, "build"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[api]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToml {
    /// Backend base URL
    pub base_url: Option<String>,
}

/// `[notifications]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsToml {
    /// Notification lifetime in milliseconds
    pub ttl_ms: Option<u64>,
}

/// The whole config file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// Backend settings
    pub api: ApiToml,
    /// Notification settings
    pub notifications: NotificationsToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Where `base_url` came from
    pub base_url_source: ConfigSource,
    /// Notification lifetime
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let (base_url, base_url_source) = match BUILD_BASE_URL {
            Some(url) => (url, ConfigSource::Build),
            None => (DEFAULT_BASE_URL, ConfigSource::Default),
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            base_url_source,
            notification_ttl: NOTIFICATION_TTL,
        }
    }
}

impl ClientConfig {
    /// Apply a parsed config file on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a non-HTTP base URL or a
    /// zero notification lifetime.
    pub fn from_toml(file: ClientToml) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = file.api.base_url {
            config.base_url = url.trim_end_matches('/').to_string();
            config.base_url_source = ConfigSource::File;
        }
        if let Some(ttl_ms) = file.notifications.ttl_ms {
            config.notification_ttl = Duration::from_millis(ttl_ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the resolved values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.notification_ttl.is_zero() {
            return Err(ConfigError::ValidationError(
                "notifications.ttl_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/switchboard/client.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("switchboard").join("client.toml"))
}

/// Load configuration from the default path
///
/// A missing file (or no known config directory) yields the defaults.
///
/// # Errors
///
/// See [`load_config_from_path`].
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    match default_config_path() {
        Some(path) => load_config_from_path(&path),
        None => Ok(ClientConfig::default()),
    }
}

/// Load configuration from `path`
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, is not valid
/// TOML, or holds invalid values.
pub fn load_config_from_path(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ClientConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ClientToml = toml::from_str(&content)?;
    let config = ClientConfig::from_toml(file)?;

    tracing::info!(
        base_url = %config.base_url,
        source = %config.base_url_source,
        "loaded client config"
    );
    Ok(config)
}
