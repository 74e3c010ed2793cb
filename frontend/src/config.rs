//! Admin console configuration loaded via OrthoConfig.
//!
//! Every key is optional; accessors fall back to the defaults below.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::http::DEFAULT_USER_AGENT;

/// Deployed marketplace API.
pub const DEFAULT_API_BASE_URL: &str = "https://hostel-backend-fyy3.onrender.com";
const SESSION_DIR_NAME: &str = ".hostel-admin";

/// Log output style of the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = SettingsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(SettingsError::UnknownLogFormat(raw.to_owned())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The API base URL does not parse.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Value as configured.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The session directory is not valid UTF-8.
    #[error("session directory '{0}' is not valid UTF-8")]
    NonUtf8SessionDir(String),
    /// The log format is neither `compact` nor `json`.
    #[error("unknown log format '{0}'; expected compact|json")]
    UnknownLogFormat(String),
}

/// Settings for the admin console and the HTTP adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTEL")]
pub struct ClientSettings {
    /// Base URL of the marketplace REST API.
    pub api_base_url: Option<String>,
    /// Directory holding the persisted session.
    pub session_dir: Option<PathBuf>,
    /// `User-Agent` sent with every request.
    pub user_agent: Option<String>,
    /// `compact` or `json`.
    pub log_format: Option<String>,
}

impl ClientSettings {
    /// Parsed API base URL, falling back to the deployed API.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw.trim()).map_err(|err| SettingsError::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Session directory, falling back to `$HOME/.hostel-admin` and then to
    /// `./.hostel-admin` when no home directory is set.
    pub fn session_dir(&self) -> Result<Utf8PathBuf, SettingsError> {
        let path = self.session_dir.clone().unwrap_or_else(default_session_dir);
        Utf8PathBuf::from_path_buf(path)
            .map_err(|path| SettingsError::NonUtf8SessionDir(path.display().to_string()))
    }

    /// Configured user agent or the crate default.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Configured log format, compact when unset.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), str::parse)
    }
}

fn default_session_dir() -> PathBuf {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(SESSION_DIR_NAME)
}
