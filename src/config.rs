//! Runtime configuration loaded from the process environment.

use crate::{Error, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    /// Serve the canned identification when no credential is configured.
    pub mock_fallback: bool,
    pub bind_addr: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_timeout_secs: 30,
            mock_fallback: true,
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 10,
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_base_url),
            gemini_timeout_secs: parse_var(&lookup, "GEMINI_TIMEOUT_SECS")?
                .unwrap_or(defaults.gemini_timeout_secs),
            mock_fallback: parse_bool(&lookup, "PLANT_ID_MOCK_FALLBACK")?
                .unwrap_or(defaults.mock_fallback),
            bind_addr: lookup("PLANT_ID_BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_var(&lookup, "PLANT_ID_PORT")?.unwrap_or(defaults.port),
            max_upload_mb: parse_upload_limit(&lookup)?.unwrap_or(defaults.max_upload_mb),
            request_timeout_secs: parse_var(&lookup, "PLANT_ID_REQUEST_TIMEOUT_SECS")?
                .unwrap_or(defaults.request_timeout_secs),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address: {}", e)))
    }

    pub fn gemini_timeout(&self) -> Duration {
        Duration::from_secs(self.gemini_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| Error::Config(format!("{} has invalid value '{}': {}", key, raw, e)))
        })
        .transpose()
}

fn parse_upload_limit<F>(lookup: &F) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    let mb: Option<usize> = parse_var(lookup, "PLANT_ID_MAX_UPLOAD_MB")?;
    match mb {
        Some(mb) if mb.checked_mul(BYTES_PER_MB).is_none() => Err(Error::Config(format!(
            "PLANT_ID_MAX_UPLOAD_MB has invalid value '{}': too large",
            mb
        ))),
        other => Ok(other),
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(Error::Config(format!(
                "{} has invalid value '{}': expected true or false",
                key, raw
            ))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.gemini_api_key.is_none());
        assert!(config.mock_fallback);
        assert_eq!(config.port, 3000);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_BASE_URL", "http://localhost:9999/"),
            ("GEMINI_TIMEOUT_SECS", "5"),
            ("PLANT_ID_MOCK_FALLBACK", "off"),
            ("PLANT_ID_PORT", "8081"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini_base_url, "http://localhost:9999");
        assert_eq!(config.gemini_timeout(), Duration::from_secs(5));
        assert!(!config.mock_fallback);
        assert_eq!(config.socket_addr().unwrap().port(), 8081);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = Config::from_lookup(lookup_from(&[("PLANT_ID_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err =
            Config::from_lookup(lookup_from(&[("PLANT_ID_MOCK_FALLBACK", "maybe")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_oversized_upload_limit_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[(
            "PLANT_ID_MAX_UPLOAD_MB",
            "18446744073709551615",
        )]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = Config {
            max_upload_mb: usize::MAX,
            ..Config::default()
        };
        assert_eq!(config.max_upload_bytes(), usize::MAX);
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = Config {
            bind_addr: "not an address".to_string(),
            ..Config::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
