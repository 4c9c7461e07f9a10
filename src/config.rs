//! Environment-driven configuration for the task board.
//!
//! Configuration is read from environment variables:
//! - `TASKBOARD_BACKEND` - `memory` (default) or `http`.
//! - `TASKBOARD_API_URL` - REST API base URL. Defaults to
//!   `http://localhost:5000/api`.
//! - `TASKBOARD_AUTH_TOKEN` - bearer token. Absent means an anonymous session.
//! - `TASKBOARD_TIMEOUT_SECS` - HTTP timeout in seconds. Defaults to `30`.
//! - `TASKBOARD_SYNC_FAILURE` - `keep` (default) or `revert`.
//! - `TASKBOARD_PREVIEW_CHARS` - description preview length. Defaults to `120`.

use crate::session::Session;
use crate::task::services::{DEFAULT_PREVIEW_CHARS, SyncFailurePolicy};
use std::time::Duration;
use thiserror::Error;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BACKEND_VAR: &str = "TASKBOARD_BACKEND";
const API_URL_VAR: &str = "TASKBOARD_API_URL";
const AUTH_TOKEN_VAR: &str = "TASKBOARD_AUTH_TOKEN";
const TIMEOUT_VAR: &str = "TASKBOARD_TIMEOUT_SECS";
const SYNC_FAILURE_VAR: &str = "TASKBOARD_SYNC_FAILURE";
const PREVIEW_CHARS_VAR: &str = "TASKBOARD_PREVIEW_CHARS";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable held a value that could not be interpreted.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

/// Which task collection backs the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Process-local collection.
    #[default]
    Memory,
    /// REST API.
    Http,
}

impl TryFrom<&str> for BackendKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// Task board configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Selected backend.
    pub backend: BackendKind,
    /// REST API base URL, used by the HTTP backend.
    pub api_url: String,
    /// Session attached to remote requests.
    pub session: Session,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// What to do with an optimistic change the backend rejected.
    pub sync_failure: SyncFailurePolicy,
    /// Description preview length on cards.
    pub preview_chars: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            api_url: DEFAULT_API_URL.to_owned(),
            session: Session::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sync_failure: SyncFailurePolicy::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl BoardConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let backend = read(BACKEND_VAR)
            .map(|value| BackendKind::try_from(value.as_str()))
            .transpose()
            .map_err(|reason| ConfigError::invalid(BACKEND_VAR, reason))?
            .unwrap_or(defaults.backend);

        let api_url = read(API_URL_VAR)
            .map(|value| value.trim().to_owned())
            .unwrap_or(defaults.api_url);

        let session = Session::from_token(lookup(AUTH_TOKEN_VAR));

        let timeout = read(TIMEOUT_VAR)
            .map(|value| parse_positive(TIMEOUT_VAR, &value))
            .transpose()?
            .map_or(defaults.timeout, Duration::from_secs);

        let sync_failure = read(SYNC_FAILURE_VAR)
            .map(|value| SyncFailurePolicy::try_from(value.as_str()))
            .transpose()
            .map_err(|reason| ConfigError::invalid(SYNC_FAILURE_VAR, reason))?
            .unwrap_or(defaults.sync_failure);

        let preview_chars = read(PREVIEW_CHARS_VAR)
            .map(|value| parse_positive(PREVIEW_CHARS_VAR, &value))
            .transpose()?
            .map_or(Ok(defaults.preview_chars), |chars| {
                usize::try_from(chars)
                    .map_err(|err| ConfigError::invalid(PREVIEW_CHARS_VAR, err.to_string()))
            })?;

        Ok(Self {
            backend,
            api_url,
            session,
            timeout,
            sync_failure,
            preview_chars,
        })
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|err| ConfigError::invalid(name, err.to_string()))?;
    if value == 0 {
        return Err(ConfigError::invalid(name, "must be greater than zero"));
    }
    Ok(value)
}
