use std::sync::Arc;
use std::time::Duration;

use starliner_booking::{BookingLedger, CustomerDirectory, LedgerGateway};
use starliner_catalog::{InMemoryTourCatalog, TourCatalog};
use starliner_core::{BookingGateway, GatewayError};
use starliner_store::{Config, GatewayKind, HttpBookingGateway};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn TourCatalog>,
    pub ledger: Arc<RwLock<BookingLedger>>,
    pub customers: Arc<RwLock<CustomerDirectory>>,
    /// Where checkout submissions go; the local ledger or a remote service
    pub gateway: Arc<dyn BookingGateway>,
}

impl AppState {
    /// Seeded catalog and customers, bookings recorded in-process
    pub fn in_memory() -> Self {
        let ledger = Arc::new(RwLock::new(BookingLedger::new()));
        Self {
            catalog: Arc::new(InMemoryTourCatalog::default()),
            gateway: Arc::new(LedgerGateway::new(ledger.clone())),
            ledger,
            customers: Arc::new(RwLock::new(CustomerDirectory::default())),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let state = Self::in_memory();
        match config.booking.gateway {
            GatewayKind::Local => Ok(state),
            GatewayKind::Http => {
                let gateway = HttpBookingGateway::new(
                    &config.booking.api_base_url,
                    Duration::from_secs(config.booking.request_timeout_seconds),
                )?;
                tracing::info!(
                    endpoint = %gateway.endpoint(),
                    "Submitting bookings to remote service"
                );
                Ok(state.with_gateway(Arc::new(gateway)))
            }
        }
    }

    pub fn with_gateway(self, gateway: Arc<dyn BookingGateway>) -> Self {
        Self { gateway, ..self }
    }
}
