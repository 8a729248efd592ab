//! Booking gateway backed by the remote booking service's HTTP API.
//!
//! One POST to `{base}/api/bookings` per submission. Failures are reported as
//! the service phrased them, falling back to the HTTP status when the body
//! carries no message.

use std::time::Duration;

use async_trait::async_trait;
use starliner_core::{
    Booking, BookingGateway, BookingReceipt, BookingRequest, Envelope, GatewayError,
};

pub const BOOKINGS_PATH: &str = "/api/bookings";

pub struct HttpBookingGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBookingGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), BOOKINGS_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingReceipt, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, tour_id = %request.tour_id, "Posting booking");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "Booking service unreachable"
                );
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        // Error bodies are not guaranteed to be JSON.
        let body: Option<Envelope<serde_json::Value>> = response.json().await.ok();

        tracing::debug!(%status, "Booking service responded");

        let body = match body {
            Some(body) if status.is_success() && body.success => body,
            Some(Envelope {
                message: Some(message),
                ..
            }) => return Err(GatewayError::Rejected(message)),
            _ if status.is_success() => {
                return Err(GatewayError::InvalidResponse(
                    "response did not report success".to_string(),
                ))
            }
            _ => {
                return Err(GatewayError::Rejected(format!(
                    "Request failed with status {}",
                    status.as_u16()
                )))
            }
        };

        // The echoed record is informational; the id is what confirms the booking.
        let echoed_id = body
            .data
            .as_ref()
            .and_then(|data| data.get("id"))
            .and_then(|id| id.as_str())
            .map(str::to_string);
        let booking_id = body
            .id
            .or(echoed_id)
            .ok_or_else(|| GatewayError::InvalidResponse("missing booking id".to_string()))?;

        let booking = body.data.and_then(|data| match serde_json::from_value::<Booking>(data) {
            Ok(booking) => Some(booking),
            Err(e) => {
                tracing::debug!(%booking_id, error = %e, "Ignoring unrecognised booking record");
                None
            }
        });

        Ok(BookingReceipt {
            booking_id,
            booking,
        })
    }
}
