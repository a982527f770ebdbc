//! # Client Configuration
//!
//! Endpoint URLs and timeouts for the demo client.
//! Values come from environment variables (a `.env` file is honoured).

use cashier_core::{MerchantUrls, PaymentError, PaymentResult};
use reqwest::Url;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_TOKEN_URL: &str = "http://localhost:8080/api/v1/token";
pub const DEFAULT_LANDING_PAGE_URL: &str = "http://127.0.0.1:8765/checkout/result";
pub const DEFAULT_NOTIFICATION_URL: &str = "https://merchant.example/notifications";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 900;

/// Demo client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Merchant token endpoint
    pub token_url: String,

    /// Where the hosted cashier sends the customer back to
    pub landing_page_url: String,

    /// Where the gateway posts server-to-server notifications
    pub notification_url: String,

    /// Timeout for the token request
    pub http_timeout: Duration,

    /// How long to wait for the hosted checkout before treating the session as expired
    pub session_ttl: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognised env vars (all optional):
    /// - `CASHIER_TOKEN_URL`
    /// - `CASHIER_LANDING_PAGE_URL`
    /// - `CASHIER_NOTIFICATION_URL`
    /// - `CASHIER_HTTP_TIMEOUT_SECS`
    /// - `CASHIER_SESSION_TTL_SECS`
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            token_url: env::var("CASHIER_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            landing_page_url: env::var("CASHIER_LANDING_PAGE_URL")
                .unwrap_or_else(|_| DEFAULT_LANDING_PAGE_URL.to_string()),
            notification_url: env::var("CASHIER_NOTIFICATION_URL")
                .unwrap_or_else(|_| DEFAULT_NOTIFICATION_URL.to_string()),
            http_timeout: Duration::from_secs(secs_var(
                "CASHIER_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            session_ttl: Duration::from_secs(secs_var(
                "CASHIER_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL_SECS,
            )?),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the configured URLs parse
    pub fn validate(&self) -> PaymentResult<()> {
        for (name, value) in [
            ("CASHIER_TOKEN_URL", &self.token_url),
            ("CASHIER_LANDING_PAGE_URL", &self.landing_page_url),
            ("CASHIER_NOTIFICATION_URL", &self.notification_url),
        ] {
            Url::parse(value).map_err(|e| {
                PaymentError::Configuration(format!("{} is not a valid URL: {}", name, e))
            })?;
        }
        Ok(())
    }

    /// Merchant callback URLs for token requests
    pub fn merchant_urls(&self) -> MerchantUrls {
        MerchantUrls::new(&self.landing_page_url, &self.notification_url)
    }

    /// Loopback socket address and path of the landing page
    pub fn landing_endpoint(&self) -> PaymentResult<(SocketAddr, String)> {
        landing_endpoint(&self.landing_page_url)
    }

    /// Builder: set the token endpoint
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            landing_page_url: DEFAULT_LANDING_PAGE_URL.to_string(),
            notification_url: DEFAULT_NOTIFICATION_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

fn secs_var(name: &str, default: u64) -> PaymentResult<u64> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            PaymentError::Configuration(format!("{} must be a number of seconds, got {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

/// Split a landing page URL into a bindable address and a route path.
///
/// Only `http` URLs with an IP literal or `localhost` host can be served locally.
pub fn landing_endpoint(landing_page_url: &str) -> PaymentResult<(SocketAddr, String)> {
    let url = Url::parse(landing_page_url).map_err(|e| {
        PaymentError::Configuration(format!("Invalid landing page URL: {}", e))
    })?;

    if url.scheme() != "http" {
        return Err(PaymentError::Configuration(format!(
            "Landing page URL must use http to be served locally, got {}",
            url.scheme()
        )));
    }

    let host = match url.host_str() {
        Some("localhost") => "127.0.0.1",
        Some(host) => host.trim_start_matches('[').trim_end_matches(']'),
        None => {
            return Err(PaymentError::Configuration(
                "Landing page URL has no host".to_string(),
            ))
        }
    };
    let port = url.port_or_known_default().unwrap_or(80);

    let ip = host.parse().map_err(|_| {
        PaymentError::Configuration(format!(
            "Landing page host must be an IP address or localhost, got {}",
            host
        ))
    })?;

    Ok((SocketAddr::new(ip, port), url.path().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_landing_endpoint() {
        let (addr, path) = landing_endpoint("http://127.0.0.1:8765/checkout/result").unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8765");
        assert_eq!(path, "/checkout/result");

        let (addr, path) = landing_endpoint("http://localhost/back").unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:80");
        assert_eq!(path, "/back");
    }

    #[test]
    fn test_landing_endpoint_rejects_remote_hosts() {
        assert!(landing_endpoint("https://merchant.example/landing").is_err());
        assert!(landing_endpoint("http://merchant.example/landing").is_err());
        assert!(landing_endpoint("not a url").is_err());
    }

    #[test]
    fn test_merchant_urls() {
        let urls = ClientConfig::default().merchant_urls();
        assert_eq!(urls.landing_page_url, DEFAULT_LANDING_PAGE_URL);
        assert_eq!(urls.notification_url, DEFAULT_NOTIFICATION_URL);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = ClientConfig::default().with_token_url("::nope");
        assert!(matches!(config.validate(), Err(PaymentError::Configuration(_))));
    }
}
