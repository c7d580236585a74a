//! Run configuration: Zoom credentials, endpoints, and the requested date range.
//!
//! Everything here is built once at startup and passed down explicitly.
//! Library code never reads the process environment on its own.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_OAUTH_URL: &str = "https://zoom.us/oauth/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Environment variable names read by [`Config::from_env`].
pub mod env_vars {
    pub const ACCOUNT_ID: &str = "ACCOUNT_ID";
    pub const CLIENT_ID: &str = "CLIENT_ID";
    pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
    pub const OAUTH_URL: &str = "ZOOM_OAUTH_URL";
    pub const API_BASE_URL: &str = "ZOOM_API_BASE_URL";
    pub const HTTP_TIMEOUT_SECS: &str = "ZOOM_HTTP_TIMEOUT_SECS";
}

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<&'static str>),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {from} is after end date {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
    #[error("invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },
}

/// Server-to-server OAuth app credentials.
#[derive(Clone)]
pub struct Credentials {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &mask(&self.account_id))
            .field("client_id", &mask(&self.client_id))
            .field("client_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub oauth_url: String,
    pub api_base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub http_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let account_id = get(env_vars::ACCOUNT_ID);
        let client_id = get(env_vars::CLIENT_ID);
        let client_secret = get(env_vars::CLIENT_SECRET);

        let mut missing = Vec::new();
        if account_id.is_none() {
            missing.push(env_vars::ACCOUNT_ID);
        }
        if client_id.is_none() {
            missing.push(env_vars::CLIENT_ID);
        }
        if client_secret.is_none() {
            missing.push(env_vars::CLIENT_SECRET);
        }

        let (Some(account_id), Some(client_id), Some(client_secret)) =
            (account_id, client_id, client_secret)
        else {
            return Err(ConfigError::MissingEnv(missing));
        };

        let http_timeout = match get(env_vars::HTTP_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidValue {
                        name: env_vars::HTTP_TIMEOUT_SECS,
                        value: raw.clone(),
                    })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let oauth_url = match get(env_vars::OAUTH_URL) {
            Some(raw) => validate_url(env_vars::OAUTH_URL, raw)?,
            None => DEFAULT_OAUTH_URL.to_string(),
        };
        let api_base_url = match get(env_vars::API_BASE_URL) {
            Some(raw) => validate_url(env_vars::API_BASE_URL, raw)?
                .trim_end_matches('/')
                .to_string(),
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        Ok(Self {
            credentials: Credentials {
                account_id,
                client_id,
                client_secret,
            },
            oauth_url,
            api_base_url,
            http_timeout,
        })
    }
}

/// Endpoint overrides must be absolute http(s) URLs that can take path segments.
fn validate_url(name: &'static str, raw: String) -> Result<String, ConfigError> {
    match Url::parse(raw.trim()) {
        Ok(url) if !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https") => {
            Ok(raw.trim().to_string())
        }
        _ => Err(ConfigError::InvalidValue { name, value: raw }),
    }
}

/// Inclusive calendar date range sent to the recordings listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ConfigError> {
        if from > to {
            return Err(ConfigError::InvertedRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn parse(from: &str, to: &str) -> Result<Self, ConfigError> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ConfigError> {
    let format = Regex::new(DATE_PATTERN).map_err(|_| ConfigError::InvalidDate(raw.to_string()))?;
    if !format.is_match(raw) {
        return Err(ConfigError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ConfigError::InvalidDate(raw.to_string()))
}

/// First eight characters of an identifier, for display.
pub fn mask(value: &str) -> String {
    let prefix: String = value.chars().take(8).collect();
    format!("{prefix}...")
}
