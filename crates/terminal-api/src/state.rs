//! # Application State
//!
//! Shared state for the Axum application: the payments gateway and the
//! process configuration. Both are built once at startup and never mutated.

use anyhow::Context;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use terminal_core::SharedGateway;
use terminal_stripe::StripeTerminalClient;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory with the browser client (index.html, reader.html, ...)
    pub static_dir: PathBuf,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    pub const DEFAULT_PORT: u16 = 4242;

    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(Self::DEFAULT_PORT),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("client")),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("HOST is not an IP address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payments API gateway
    pub gateway: SharedGateway,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(gateway: SharedGateway, config: AppConfig) -> Self {
        Self {
            gateway,
            config: Arc::new(config),
        }
    }

    /// Create a new AppState backed by the Stripe gateway
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let client = StripeTerminalClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        if !client.config().is_test_mode() {
            tracing::warn!("Using live Stripe keys; /simulate-payment will be rejected by the API");
        }

        Ok(Self::new(Arc::new(client), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4242);
        assert_eq!(config.static_dir, PathBuf::from("client"));
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_overrides() {
        let config = AppConfig::from_lookup(|key| match key {
            "PORT" => Some("3000".to_string()),
            "STATIC_DIR" => Some("../../client".to_string()),
            "ENVIRONMENT" => Some("production".to_string()),
            _ => None,
        });

        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, PathBuf::from("../../client"));
        assert!(config.is_production());
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = AppConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 4242);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: PathBuf::from("client"),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let config = AppConfig {
            host: "localhost".to_string(),
            ..AppConfig::from_lookup(|_| None)
        };

        assert!(config.socket_addr().is_err());
    }
}
