//! Dashboard Configuration Settings
//!
//! Configuration types for the price stream core, loaded from
//! environment variables with typed defaults.

use std::time::Duration;

/// Where the price feed lives and how to reach it.
///
/// The URL scheme follows the hosting surface: a securely hosted
/// dashboard talks `wss`, otherwise `ws`. The path always carries
/// exactly one leading slash.
#[derive(Debug, Clone)]
pub struct FeedEndpoint {
    /// Whether the hosting surface is secure (selects wss vs ws).
    pub secure: bool,
    /// Host (and optional port) of the feed server.
    pub host: String,
    /// Endpoint path, e.g. "/ws".
    pub path: String,
}

impl FeedEndpoint {
    /// Build the WebSocket URL for this endpoint.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        format!("{scheme}://{}{path}", self.host)
    }
}

impl Default for FeedEndpoint {
    fn default() -> Self {
        Self {
            secure: false,
            host: "localhost:8080".to_string(),
            path: "/ws".to_string(),
        }
    }
}

/// Feed connection settings.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Initial reconnection delay.
    pub reconnect_delay_initial: Duration,
    /// Maximum reconnection delay.
    pub reconnect_delay_max: Duration,
    /// Reconnection delay multiplier (1.0 = constant delay).
    pub reconnect_delay_multiplier: f64,
    /// Jitter factor applied to each delay (0.0 = none).
    pub reconnect_jitter_factor: f64,
    /// Maximum reconnection attempts before giving up (0 = unlimited).
    pub max_reconnect_attempts: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            reconnect_delay_initial: Duration::from_millis(3000),
            reconnect_delay_max: Duration::from_millis(3000),
            reconnect_delay_multiplier: 1.0,
            reconnect_jitter_factor: 0.0,
            max_reconnect_attempts: 0, // Unlimited
        }
    }
}

/// Broadcast hub capacities.
#[derive(Debug, Clone)]
pub struct HubSettings {
    /// Capacity of the price view channel.
    pub views_capacity: usize,
    /// Capacity of the user intent channel.
    pub intents_capacity: usize,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            views_capacity: 256,
            intents_capacity: 64,
        }
    }
}

/// Order history endpoint settings (collaborator boundary).
#[derive(Debug, Clone)]
pub struct OrdersSettings {
    /// Base URL of the trading backend, e.g. "http://localhost:8080".
    pub base_url: String,
    /// Bearer token attached to order-history requests, if any. The
    /// price stream itself never carries credentials.
    pub auth_token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for OrdersSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Complete dashboard core configuration.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    /// Price feed endpoint.
    pub endpoint: FeedEndpoint,
    /// Feed connection settings.
    pub feed: FeedSettings,
    /// Broadcast hub settings.
    pub hub: HubSettings,
    /// Order history settings.
    pub orders: OrdersSettings,
}

impl DashboardConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PRICE_FEED_HOST` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("PRICE_FEED_HOST")
            .map_err(|_| ConfigError::MissingEnvVar("PRICE_FEED_HOST".to_string()))?;

        if host.is_empty() {
            return Err(ConfigError::EmptyValue("PRICE_FEED_HOST".to_string()));
        }

        let endpoint = FeedEndpoint {
            secure: parse_env_bool("PRICE_FEED_SECURE", FeedEndpoint::default().secure),
            host,
            path: std::env::var("PRICE_FEED_PATH").unwrap_or_else(|_| "/ws".to_string()),
        };

        let feed = FeedSettings {
            reconnect_delay_initial: parse_env_duration_millis(
                "PRICE_FEED_RECONNECT_DELAY_MS",
                FeedSettings::default().reconnect_delay_initial,
            ),
            reconnect_delay_max: parse_env_duration_millis(
                "PRICE_FEED_RECONNECT_DELAY_MAX_MS",
                FeedSettings::default().reconnect_delay_max,
            ),
            reconnect_delay_multiplier: parse_env_f64(
                "PRICE_FEED_RECONNECT_MULTIPLIER",
                FeedSettings::default().reconnect_delay_multiplier,
            ),
            reconnect_jitter_factor: parse_env_f64(
                "PRICE_FEED_RECONNECT_JITTER",
                FeedSettings::default().reconnect_jitter_factor,
            ),
            max_reconnect_attempts: parse_env_u32(
                "PRICE_FEED_MAX_RECONNECT_ATTEMPTS",
                FeedSettings::default().max_reconnect_attempts,
            ),
        };

        let hub = HubSettings {
            views_capacity: parse_env_usize(
                "PRICE_VIEWS_CAPACITY",
                HubSettings::default().views_capacity,
            ),
            intents_capacity: parse_env_usize(
                "USER_INTENTS_CAPACITY",
                HubSettings::default().intents_capacity,
            ),
        };

        let orders_scheme = if endpoint.secure { "https" } else { "http" };
        let orders = OrdersSettings {
            base_url: std::env::var("ORDERS_BASE_URL")
                .unwrap_or_else(|_| format!("{orders_scheme}://{}", endpoint.host)),
            auth_token: std::env::var("ORDERS_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout: parse_env_duration_secs(
                "ORDERS_TIMEOUT_SECS",
                OrdersSettings::default().timeout,
            ),
        };

        Ok(Self {
            endpoint,
            feed,
            hub,
            orders,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
}

fn parse_env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

fn parse_env_duration_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_insecure() {
        let endpoint = FeedEndpoint {
            secure: false,
            host: "localhost:8080".to_string(),
            path: "/ws".to_string(),
        };
        assert_eq!(endpoint.url(), "ws://localhost:8080/ws");
    }

    #[test]
    fn endpoint_url_secure() {
        let endpoint = FeedEndpoint {
            secure: true,
            host: "stocks.example.com".to_string(),
            path: "/ws".to_string(),
        };
        assert_eq!(endpoint.url(), "wss://stocks.example.com/ws");
    }

    #[test]
    fn endpoint_url_normalizes_missing_leading_slash() {
        let endpoint = FeedEndpoint {
            secure: false,
            host: "localhost:8080".to_string(),
            path: "ws".to_string(),
        };
        assert_eq!(endpoint.url(), "ws://localhost:8080/ws");
    }

    #[test]
    fn feed_settings_defaults_match_fixed_delay_contract() {
        let settings = FeedSettings::default();
        assert_eq!(settings.reconnect_delay_initial, Duration::from_millis(3000));
        assert_eq!(settings.reconnect_delay_max, Duration::from_millis(3000));
        assert!((settings.reconnect_delay_multiplier - 1.0).abs() < f64::EPSILON);
        assert!(settings.reconnect_jitter_factor.abs() < f64::EPSILON);
        assert_eq!(settings.max_reconnect_attempts, 0);
    }

    #[test]
    fn hub_settings_defaults() {
        let settings = HubSettings::default();
        assert_eq!(settings.views_capacity, 256);
        assert_eq!(settings.intents_capacity, 64);
    }

    #[test]
    fn orders_settings_defaults() {
        let settings = OrdersSettings::default();
        assert!(settings.auth_token.is_none());
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }
}
