pub mod envelope;
pub mod gateway;
pub mod models;
pub mod query;

pub use envelope::Envelope;
pub use gateway::{BookingGateway, BookingReceipt, GatewayError};
pub use models::{Booking, BookingRequest, BookingStatus};
pub use query::empty_as_none;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
