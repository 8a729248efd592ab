pub mod app_config;
pub mod http_gateway;

pub use app_config::{BookingConfig, Config, GatewayKind, ServerConfig};
pub use http_gateway::HttpBookingGateway;
