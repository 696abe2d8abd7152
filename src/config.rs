//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing or unparsable numeric values fall back to the
//! defaults; only `LISTEN_ADDR` is strict.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Top-level service configuration.
///
/// Loaded once at startup via [`WinestaConfig::from_env`].
#[derive(Debug, Clone)]
pub struct WinestaConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the change bus broadcast channel.
    pub change_bus_capacity: usize,

    /// Delay before the sommelier's canned reply is appended.
    pub reply_delay: Duration,

    /// Whether to populate the cellar, events and stories with demo data.
    pub seed_demo_data: bool,

    /// Per-request timeout applied to the HTTP routes.
    pub request_timeout: Duration,
}

impl Default for WinestaConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            change_bus_capacity: 1024,
            reply_delay: Duration::from_millis(1000),
            seed_demo_data: true,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl WinestaConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid LISTEN_ADDR: {raw}"))?,
            Err(_) => defaults.listen_addr,
        };

        Ok(Self {
            listen_addr,
            change_bus_capacity: parse_env("CHANGE_BUS_CAPACITY", defaults.change_bus_capacity),
            reply_delay: Duration::from_millis(parse_env("SOMMELIER_REPLY_DELAY_MS", 1000)),
            seed_demo_data: parse_env_bool("SEED_DEMO_DATA", defaults.seed_demo_data),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)),
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WinestaConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.change_bus_capacity, 1024);
        assert_eq!(config.reply_delay, Duration::from_secs(1));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn bool_parsing() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn missing_key_falls_back() {
        assert_eq!(parse_env("WINESTA_TEST_UNSET_KEY", 7_u64), 7);
        assert!(parse_env_bool("WINESTA_TEST_UNSET_KEY", true));
    }
}
