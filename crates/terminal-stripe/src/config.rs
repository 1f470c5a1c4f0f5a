//! # Stripe Configuration
//!
//! Configuration management for the Stripe Terminal integration.
//! The secret key is loaded from the environment once at startup and owned
//! by the client instance built from it.

use std::env;
use terminal_core::{TerminalError, TerminalResult};

pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// API version the server-driven Terminal flow was built against
pub const DEFAULT_API_VERSION: &str = "2020-08-27";

const KEY_PREFIXES: &[&str] = &["sk_test_", "sk_live_", "rk_test_", "rk_live_"];

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret or restricted API key (sk_test_... / rk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version sent as `Stripe-Version`
    pub api_version: String,

    /// Sent as `User-Agent` on every request
    pub app_info: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `STRIPE_SECRET_KEY`.
    /// Optional: `STRIPE_API_VERSION`, `STRIPE_API_BASE`.
    pub fn from_env() -> TerminalResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> TerminalResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| TerminalError::configuration("STRIPE_SECRET_KEY not set"))?;

        if !KEY_PREFIXES.iter().any(|p| secret_key.starts_with(p)) {
            return Err(TerminalError::configuration(
                "STRIPE_SECRET_KEY must start with sk_test_, sk_live_, rk_test_ or rk_live_",
            ));
        }

        let mut config = Self::new(secret_key);

        if let Some(version) = lookup("STRIPE_API_VERSION").filter(|v| !v.is_empty()) {
            config.api_version = version;
        }
        if let Some(base) = lookup("STRIPE_API_BASE").filter(|v| !v.is_empty()) {
            config = config.with_api_base_url(base);
        }

        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            app_info: format!("terminal-server-driven/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_") || self.secret_key.starts_with("rk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for an API path such as `/v1/terminal/readers`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.secret_key.chars().take(8).collect();
        f.debug_struct("StripeConfig")
            .field("secret_key", &format!("{}…", visible))
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = StripeConfig::from_lookup(lookup(&[("STRIPE_SECRET_KEY", "sk_test_abc123")]))
            .unwrap();

        assert!(config.is_test_mode());
        assert_eq!(config.api_base_url, "https://api.stripe.com");
        assert_eq!(config.api_version, "2020-08-27");
    }

    #[test]
    fn test_config_overrides() {
        let config = StripeConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "rk_live_abc123"),
            ("STRIPE_API_VERSION", "2024-06-20"),
            ("STRIPE_API_BASE", "http://localhost:12111/"),
        ]))
        .unwrap();

        assert!(!config.is_test_mode());
        assert_eq!(config.api_version, "2024-06-20");
        assert_eq!(config.url("/v1/terminal/readers"), "http://localhost:12111/v1/terminal/readers");
    }

    #[test]
    fn test_missing_key() {
        let err = StripeConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err.message(), "STRIPE_SECRET_KEY not set");
    }

    #[test]
    fn test_rejects_publishable_key() {
        let result = StripeConfig::from_lookup(lookup(&[("STRIPE_SECRET_KEY", "pk_test_abc")]));
        assert!(matches!(result, Err(TerminalError::Configuration { .. })));
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StripeConfig::new("sk_test_abcdefghijklmnop");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("abcdefghijklmnop"));
    }
}
