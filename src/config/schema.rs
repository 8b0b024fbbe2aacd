//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config file.

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Geolocation database settings.
    pub geoip: GeoIpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Redirect rules, evaluated in order.
    pub redirects: Vec<RedirectConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Geolocation database configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GeoIpConfig {
    /// Path to a MaxMind `.mmdb` file (Country or City edition).
    pub database_path: String,
}

/// One geo/language redirect rule.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RedirectConfig {
    /// Rule identifier for logging/metrics. Defaults to `from`.
    #[serde(default)]
    pub name: Option<String>,

    /// Exact request path that triggers evaluation.
    pub from: String,

    /// Redirect destination (absolute or relative URL).
    pub to: String,

    /// `301` selects permanent redirects; anything else is temporary.
    #[serde(default)]
    pub status: Option<u16>,

    /// ISO-3166 alpha-2 country codes (case-insensitive).
    #[serde(default)]
    pub country: Vec<String>,

    /// Language codes (case-insensitive).
    #[serde(default)]
    pub language: Vec<String>,
}

impl RedirectConfig {
    /// Create a rule with no country or language constraint.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Default::default()
        }
    }

    /// Name used in logs and metric labels.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.from)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
