use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::digest::models::SummaryBackend;

pub const DEFAULT_X_API_BASE_URL: &str = "https://api.x.com/2";
pub const DEFAULT_OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MODERATION_MODEL: &str = "omni-moderation-latest";
pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 600;
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Credentials are optional at startup; requests report them as missing.
    pub x_bearer_token: Option<String>,
    pub openai_api_key: Option<String>,
    pub x_api_base_url: String,
    pub openai_api_base_url: String,
    pub openai_model: String,
    pub moderation_model: String,
    pub cache_ttl_seconds: i64,
    /// 0 disables the bound.
    pub cache_max_entries: usize,
    pub summary_backend: SummaryBackend,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or_default = |name: &str, default: &str| {
            non_blank(name).unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            port: or_default("PORT", "8080")
                .parse()
                .context("PORT must be a valid number")?,
            x_bearer_token: non_blank("X_BEARER_TOKEN"),
            openai_api_key: non_blank("OPENAI_API_KEY"),
            x_api_base_url: or_default("X_API_BASE_URL", DEFAULT_X_API_BASE_URL),
            openai_api_base_url: or_default("OPENAI_API_BASE_URL", DEFAULT_OPENAI_API_BASE_URL),
            openai_model: or_default("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            moderation_model: or_default("OPENAI_MODERATION_MODEL", DEFAULT_MODERATION_MODEL),
            // 32-bit range only; anything else falls back to the default
            cache_ttl_seconds: non_blank("CACHE_TTL_SECONDS")
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .map(i64::from)
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            cache_max_entries: non_blank("CACHE_MAX_ENTRIES")
                .map(|raw| raw.trim().parse::<usize>())
                .transpose()
                .context("CACHE_MAX_ENTRIES must be a non-negative number")?
                .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
            summary_backend: non_blank("SUMMARY_BACKEND")
                .map(|raw| raw.parse::<SummaryBackend>())
                .transpose()
                .context("SUMMARY_BACKEND must be 'extractive' or 'openai'")?
                .unwrap_or_default(),
        })
    }

    /// Name of the first required credential that is not set.
    pub fn missing_credential(&self) -> Option<&'static str> {
        if self.x_bearer_token.is_none() {
            Some("X_BEARER_TOKEN")
        } else if self.openai_api_key.is_none() {
            Some("OPENAI_API_KEY")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.x_api_base_url, DEFAULT_X_API_BASE_URL);
        assert_eq!(config.openai_api_base_url, DEFAULT_OPENAI_API_BASE_URL);
        assert_eq!(config.openai_model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.moderation_model, DEFAULT_MODERATION_MODEL);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.cache_max_entries, DEFAULT_CACHE_MAX_ENTRIES);
        assert_eq!(config.summary_backend, SummaryBackend::Extractive);
        assert_eq!(config.missing_credential(), Some("X_BEARER_TOKEN"));
    }

    #[test]
    fn test_non_numeric_ttl_falls_back_to_default() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "ten minutes")]).unwrap();
        assert_eq!(config.cache_ttl_seconds, DEFAULT_CACHE_TTL_SECONDS);

        let config = config_from(&[("CACHE_TTL_SECONDS", "30")]).unwrap();
        assert_eq!(config.cache_ttl_seconds, 30);
    }

    #[test]
    fn test_out_of_range_ttl_falls_back_to_default() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "9223372036854775807")]).unwrap();
        assert_eq!(config.cache_ttl_seconds, DEFAULT_CACHE_TTL_SECONDS);

        let config = config_from(&[("CACHE_TTL_SECONDS", "2147483648")]).unwrap();
        assert_eq!(config.cache_ttl_seconds, DEFAULT_CACHE_TTL_SECONDS);

        let config = config_from(&[("CACHE_TTL_SECONDS", "2147483647")]).unwrap();
        assert_eq!(config.cache_ttl_seconds, i64::from(i32::MAX));
    }

    #[test]
    fn test_blank_credentials_are_missing() {
        let config = config_from(&[("X_BEARER_TOKEN", "token"), ("OPENAI_API_KEY", "  ")]).unwrap();
        assert_eq!(config.missing_credential(), Some("OPENAI_API_KEY"));

        let config =
            config_from(&[("X_BEARER_TOKEN", "token"), ("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.missing_credential(), None);
    }

    #[test]
    fn test_invalid_backend_is_rejected() {
        assert!(config_from(&[("SUMMARY_BACKEND", "markov")]).is_err());

        let config = config_from(&[("SUMMARY_BACKEND", "OpenAI")]).unwrap();
        assert_eq!(config.summary_backend, SummaryBackend::OpenAi);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
    }
}
