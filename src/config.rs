//! Runtime configuration for the planner.
//!
//! Values are read from the process environment (after `.env` is loaded):
//! - `OPENAI_API_KEY` - Optional at startup. Requests fail with a 500 until it is set.
//! - `OPENAI_BASE_URL` - Optional. Defaults to `https://api.openai.com/v1`.
//! - `MODEL` - Optional. Defaults to `gpt-3.5-turbo`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Per-call timeout. Defaults to `120`.

use std::time::Duration;

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Bearer credential for the model provider
    pub api_key: Option<String>,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Model identifier sent with every completion request
    pub model: String,
    pub host: String,
    pub port: u16,
    /// Timeout applied to each model call
    pub timeout: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => parse_number::<u16>("PORT", &raw)?,
            None => defaults.port,
        };
        let timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number::<u64>("REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key: non_empty("OPENAI_API_KEY"),
            base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: non_empty("MODEL").unwrap_or(defaults.model),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            timeout,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| PlannerError::Config(format!("Invalid value for {key}: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = PlannerConfig::from_lookup(|_| None).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_reads_overrides() {
        let config = PlannerConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MODEL", "gpt-4o-mini"),
            ("PORT", "8080"),
            ("REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = PlannerConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = PlannerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("PORT"));
    }
}
