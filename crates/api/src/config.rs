//! Application configuration loaded from environment variables.

use std::time::Duration;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `CATALOG_URL` — restaurant backend base URL (default: `"http://localhost:8080/api"`)
/// - `CATALOG_TIMEOUT_SECS` — per-request backend timeout (default: `30`)
/// - `SESSION_IDLE_SECS` — idle time before a session is evicted (default: `1800`)
/// - `SESSION_SWEEP_SECS` — how often idle sessions are swept (default: `60`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub catalog_url: String,
    pub catalog_timeout: Duration,
    pub session_idle_timeout: Duration,
    pub session_sweep_interval: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            catalog_url: lookup("CATALOG_URL").unwrap_or(defaults.catalog_url),
            catalog_timeout: lookup("CATALOG_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.catalog_timeout),
            session_idle_timeout: lookup_secs(&lookup, "SESSION_IDLE_SECS")
                .unwrap_or(defaults.session_idle_timeout),
            session_sweep_interval: lookup_secs(&lookup, "SESSION_SWEEP_SECS")
                .filter(|d| !d.is_zero())
                .unwrap_or(defaults.session_sweep_interval),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            catalog_url: "http://localhost:8080/api".to_string(),
            catalog_timeout: Duration::from_secs(30),
            session_idle_timeout: Duration::from_secs(30 * 60),
            session_sweep_interval: Duration::from_secs(60),
        }
    }
}

fn lookup_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    lookup(key)
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}
