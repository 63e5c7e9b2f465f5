//! Read-only client configuration: target API, credentials, current space.
//!
//! The gateway reads the target and token; the route repository reads the
//! space when creating routes. Nothing here is mutated after load.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use cfroutes_core::{Guid, Space};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Client configuration.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Configuration {
    /// Base URL of the API, without a trailing slash.
    pub target: String,
    /// Full `Authorization` header value (e.g. `bearer eyJ...`).
    pub access_token: String,
    #[serde(default, deserialize_with = "deserialize_space")]
    pub space: Space,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// The config file spells space keys in PascalCase (`Guid`, `Name`).
fn deserialize_space<'de, D>(deserializer: D) -> Result<Space, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct RawSpace {
        #[serde(default)]
        guid: String,
        #[serde(default)]
        name: String,
    }

    let raw = Option::<RawSpace>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| Space::new(Guid::new(s.guid), s.name))
        .unwrap_or_default())
}

impl Configuration {
    pub fn new(target: impl Into<String>, access_token: impl Into<String>, space: Space) -> Self {
        Self {
            target: normalize_target(target.into()),
            access_token: access_token.into(),
            space,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Build from `CF_TARGET`, `CF_ACCESS_TOKEN`, `CF_SPACE_GUID`,
    /// `CF_SPACE_NAME` and `CF_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Configuration::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = lookup("CF_TARGET").ok_or(ConfigError::MissingVar("CF_TARGET"))?;
        let access_token = lookup("CF_ACCESS_TOKEN").ok_or(ConfigError::MissingVar("CF_ACCESS_TOKEN"))?;
        let space_guid = lookup("CF_SPACE_GUID").ok_or(ConfigError::MissingVar("CF_SPACE_GUID"))?;
        let space_name = lookup("CF_SPACE_NAME").unwrap_or_default();

        let request_timeout_secs = match lookup("CF_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: "CF_REQUEST_TIMEOUT_SECS",
                value: raw.clone(),
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self::new(target, access_token, Space::new(space_guid, space_name))
            .with_request_timeout(request_timeout_secs))
    }

    /// Load a JSON config file (`Target`, `AccessToken`, `Space`, ...).
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let mut config: Configuration = serde_json::from_str(raw).context("invalid configuration JSON")?;
        config.target = normalize_target(config.target);
        if config.target.is_empty() {
            anyhow::bail!("configuration has no target");
        }
        Ok(config)
    }

    /// Absolute URL for an API path (which already carries any query string).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.target, path)
    }
}

fn normalize_target(target: String) -> String {
    target.trim().trim_end_matches('/').to_string()
}

impl core::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Configuration")
            .field("target", &self.target)
            .field("access_token", &"<redacted>")
            .field("space", &self.space)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
