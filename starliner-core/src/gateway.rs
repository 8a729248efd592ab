use async_trait::async_trait;

use crate::models::{Booking, BookingRequest};

/// What the persistence collaborator hands back for an accepted booking
#[derive(Debug, Clone)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub booking: Option<Booking>,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The collaborator answered and refused the booking; the message is its own.
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Transport(String),

    #[error("Unexpected response from booking service: {0}")]
    InvalidResponse(String),
}

/// Persistence collaborator for submitted bookings.
///
/// One call per submission attempt. Implementations must not retry.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingReceipt, GatewayError>;
}
