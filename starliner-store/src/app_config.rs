use serde::Deserialize;
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://starlinerdreamtours.com";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Where submitted bookings are persisted
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// Record into this process's ledger
    Local,
    /// POST to the booking service at `api_base_url`
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    #[serde(default = "default_gateway")]
    pub gateway: GatewayKind,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_gateway() -> GatewayKind { GatewayKind::Local }

fn default_api_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }

fn default_timeout() -> u64 { 30 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked developer overrides
            .add_source(config::File::with_name("config/local").required(false))
            // STARLINER__BOOKING__GATEWAY=http sets booking.gateway
            .add_source(config::Environment::with_prefix("STARLINER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_shipped_defaults_parse() {
        let config = from_toml(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.booking.gateway, GatewayKind::Local);
        assert_eq!(config.booking.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_booking_section_defaults() {
        let config = from_toml("[server]\nport = 8080\n[booking]\ngateway = \"http\"\n").unwrap();
        assert_eq!(config.booking.gateway, GatewayKind::Http);
        assert_eq!(config.booking.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.booking.request_timeout_seconds, 30);
    }
}
