//! Client configuration
//!
//! # 环境变量
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | MASALA_BASE_URL | http://localhost:8080 | Backend base URL |
//! | MASALA_TOKEN | - | Pre-issued bearer token |
//! | MASALA_TIMEOUT_SECS | 30 | Request timeout (seconds) |
//! | MASALA_TAX_RATE | 0.05 | GST rate applied to carts |
//! | MASALA_LOG_LEVEL | info | Log level (overridden by RUST_LOG) |
//! | MASALA_LOG_JSON | false | JSON log output |

use crate::money::DEFAULT_TAX_RATE;
use crate::{ClientError, ClientResult, HttpClient};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Client configuration for connecting to the POS backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Tax rate applied to cart totals (0.05 = 5%)
    pub tax_rate: Decimal,

    /// Log level directive
    pub log_level: String,

    /// Emit JSON logs
    pub log_json: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            tax_rate: DEFAULT_TAX_RATE,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> ClientResult<Self> {
        // A missing .env file is fine
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config = Self::new(
            lookup("MASALA_BASE_URL").unwrap_or_else(|| "http://localhost:8080".into()),
        );

        config.token = lookup("MASALA_TOKEN").filter(|t| !t.is_empty());

        if let Some(raw) = lookup("MASALA_TIMEOUT_SECS") {
            config.timeout = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("MASALA_TIMEOUT_SECS must be an integer, got {raw}"))
            })?;
        }

        if let Some(raw) = lookup("MASALA_TAX_RATE") {
            let rate = Decimal::from_str(raw.trim()).map_err(|_| {
                ClientError::Config(format!("MASALA_TAX_RATE must be a decimal, got {raw}"))
            })?;
            config = config.with_tax_rate(rate)?;
        }

        if let Some(level) = lookup("MASALA_LOG_LEVEL") {
            config.log_level = level;
        }

        if let Some(raw) = lookup("MASALA_LOG_JSON") {
            config.log_json = matches!(raw.trim(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the tax rate; must lie in `[0, 1]`
    pub fn with_tax_rate(mut self, rate: Decimal) -> ClientResult<Self> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(ClientError::Config(format!(
                "tax rate must be between 0 and 1, got {rate}"
            )));
        }
        self.tax_rate = rate;
        Ok(self)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<HttpClient> {
        HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
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
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.tax_rate, Decimal::new(5, 2));
        assert_eq!(config.log_level, "info");
        assert!(config.token.is_none());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("MASALA_BASE_URL", "http://pos.local:9000"),
            ("MASALA_TOKEN", "abc"),
            ("MASALA_TIMEOUT_SECS", "5"),
            ("MASALA_TAX_RATE", "0.18"),
            ("MASALA_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://pos.local:9000");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.tax_rate, Decimal::new(18, 2));
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[("MASALA_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err =
            ClientConfig::from_lookup(lookup_from(&[("MASALA_TAX_RATE", "five")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("MASALA_TAX_RATE", "1.5")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
