//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pool::ServerAddress;

/// Root configuration for a search client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Seed server addresses (e.g., "http://127.0.0.1:9200").
    /// Used as the fallback whenever discovery yields nothing.
    pub servers: Vec<String>,

    /// Seconds before the server list is considered stale.
    pub refresh_period_secs: u64,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Address discovery settings.
    pub discovery: DiscoveryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            servers: vec!["http://127.0.0.1:9200".to_string()],
            refresh_period_secs: 60,
            timeouts: TimeoutConfig::default(),
            discovery: DiscoveryConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Config seeded with the given servers and defaults for everything else.
    pub fn with_servers<I, S>(servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            servers: servers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn seed_addresses(&self) -> Vec<ServerAddress> {
        self.servers.iter().cloned().map(ServerAddress::from).collect()
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_secs)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Bound on a single request attempt in milliseconds.
    pub request_ms: u64,

    /// Connection establishment timeout in milliseconds.
    pub connect_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_ms: 2000,
            connect_ms: 1000,
        }
    }
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }
}

/// Address discovery configuration.
///
/// With no `dns_host`, the seed list is used unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Host name resolved on every refresh.
    pub dns_host: Option<String>,

    /// Port appended to every resolved address.
    pub port: u16,

    /// Scheme prefixed to every resolved address ("http" or "https").
    pub scheme: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            dns_host: None,
            port: 9200,
            scheme: "http".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Record request metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.servers, vec!["http://127.0.0.1:9200"]);
        assert_eq!(config.refresh_period(), Duration::from_secs(60));
        assert_eq!(config.timeouts.request(), Duration::from_secs(2));
        assert!(config.discovery.dns_host.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            servers = ["http://es1:9200", "http://es2:9200"]

            [timeouts]
            request_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.seed_addresses().len(), 2);
        assert_eq!(config.timeouts.request_ms, 500);
        assert_eq!(config.timeouts.connect_ms, 1000);
        assert_eq!(config.refresh_period_secs, 60);
        assert_eq!(config.observability.log_level, "info");
    }
}
