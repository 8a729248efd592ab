use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use starliner_core::{
    empty_as_none, Booking, BookingGateway, BookingReceipt, BookingRequest, BookingStatus,
    CoreError, CoreResult, GatewayError,
};
use tokio::sync::RwLock;

/// Query over stored bookings, as used by the admin bookings list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<BookingStatus>,
    /// Case-insensitive match on customer name, email, booking id or tour title
    pub q: Option<String>,
}

impl BookingFilter {
    fn matches(&self, booking: &Booking) -> bool {
        let status_ok = self.status.map_or(true, |s| booking.status == s);

        let search_ok = match self.q.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                [
                    &booking.customer_name,
                    &booking.customer_email,
                    &booking.id,
                    &booking.tour_title,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&q))
            }
        };

        status_ok && search_ok
    }
}

/// In-memory store of submitted bookings, kept in creation order
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
        }
    }

    /// Store a submitted booking as `pending`.
    ///
    /// Ids are `BK` followed by the creation time in unix milliseconds, bumped
    /// forward when two bookings land in the same millisecond.
    pub fn record(&mut self, request: &BookingRequest, now: DateTime<Utc>) -> CoreResult<Booking> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Rejecting booking with missing fields");
            return Err(CoreError::ValidationError("Missing required fields".to_string()));
        }
        let date = request
            .date
            .ok_or_else(|| CoreError::ValidationError("Missing required fields".to_string()))?;

        let booking = Booking {
            id: self.next_id(now),
            tour_id: request.tour_id.clone(),
            tour_title: request.tour_name.clone(),
            customer_name: request.name.clone(),
            customer_email: request.email.clone(),
            customer_phone: request.phone.clone(),
            date,
            time: request.time.clone(),
            adults: request.adults,
            children: request.children_812.saturating_add(request.children_37),
            infants: request.infants,
            total_members: request.total_travelers,
            postal_code: request.postal_code.clone(),
            country: request.country.clone(),
            status: BookingStatus::Pending,
            total_price: request.total_price,
            created_at: now,
            notes: String::new(),
        };

        tracing::info!(booking_id = %booking.id, tour_id = %booking.tour_id, "Booking recorded");
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn list(&self, filter: &BookingFilter) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect()
    }

    /// Change a booking's status. Cancelled and completed bookings are final.
    pub fn update_status(&mut self, id: &str, status: BookingStatus) -> CoreResult<Booking> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("Booking {}", id)))?;

        if matches!(booking.status, BookingStatus::Cancelled | BookingStatus::Completed)
            && booking.status != status
        {
            return Err(CoreError::ValidationError(format!(
                "Invalid status change from {} to {}",
                booking.status, status
            )));
        }

        booking.status = status;
        tracing::info!(booking_id = %id, %status, "Booking status updated");
        Ok(booking.clone())
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = format!("BK{}", millis);
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Booking gateway that records straight into an in-process ledger
#[derive(Clone)]
pub struct LedgerGateway {
    ledger: Arc<RwLock<BookingLedger>>,
}

impl LedgerGateway {
    pub fn new(ledger: Arc<RwLock<BookingLedger>>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl BookingGateway for LedgerGateway {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingReceipt, GatewayError> {
        let booking = self
            .ledger
            .write()
            .await
            .record(request, Utc::now())
            .map_err(|e| match e {
                CoreError::ValidationError(message) | CoreError::NotFound(message) => {
                    GatewayError::Rejected(message)
                }
            })?;

        Ok(BookingReceipt {
            booking_id: booking.id.clone(),
            booking: Some(booking),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(name: &str, email: &str, tour_name: &str) -> BookingRequest {
        BookingRequest {
            tour_id: "city-walk".to_string(),
            tour_name: tour_name.to_string(),
            date: Some(Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap()),
            time: "09:00".to_string(),
            adults: 2,
            children_812: 1,
            children_37: 1,
            infants: 0,
            total_travelers: 4,
            total_price: 196,
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 8, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_record_creates_pending_booking() {
        let mut ledger = BookingLedger::new();
        let booking = ledger
            .record(
                &request("John Doe", "john.doe@example.com", "Historic City Walking Tour"),
                now(),
            )
            .unwrap();

        assert_eq!(booking.id, format!("BK{}", now().timestamp_millis()));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.children, 2);
        assert_eq!(booking.total_members, 4);
        assert_eq!(booking.created_at, now());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_same_millisecond_ids_stay_unique() {
        let mut ledger = BookingLedger::new();
        let first = ledger.record(&request("A B", "a@b.co", "Tour"), now()).unwrap();
        let second = ledger.record(&request("C D", "c@d.co", "Tour"), now()).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.id, format!("BK{}", now().timestamp_millis() + 1));
    }

    #[test]
    fn test_record_rejects_missing_fields() {
        let mut ledger = BookingLedger::new();
        let mut incomplete = request("John Doe", "john.doe@example.com", "Tour");
        incomplete.email = " ".to_string();

        let err = ledger.record(&incomplete, now()).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(ref m) if m == "Missing required fields"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_list_filters_by_status_and_search() {
        let mut ledger = BookingLedger::new();
        let john = ledger
            .record(
                &request("John Doe", "john.doe@example.com", "Historic City Walking Tour"),
                now(),
            )
            .unwrap();
        ledger
            .record(&request("Sarah Smith", "sarah@example.com", "Street Food Safari"), now())
            .unwrap();
        ledger.update_status(&john.id, BookingStatus::Confirmed).unwrap();

        let confirmed = ledger.list(&BookingFilter {
            status: Some(BookingStatus::Confirmed),
            q: None,
        });
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].customer_name, "John Doe");

        let food = ledger.list(&BookingFilter {
            status: None,
            q: Some("FOOD".to_string()),
        });
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].customer_name, "Sarah Smith");

        assert_eq!(ledger.list(&BookingFilter::default()).len(), 2);
    }

    #[test]
    fn test_final_statuses_cannot_change() {
        let mut ledger = BookingLedger::new();
        let booking = ledger.record(&request("A B", "a@b.co", "Tour"), now()).unwrap();

        ledger.update_status(&booking.id, BookingStatus::Cancelled).unwrap();
        let err = ledger.update_status(&booking.id, BookingStatus::Confirmed).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        assert!(matches!(
            ledger.update_status("BK0", BookingStatus::Confirmed),
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ledger_gateway_records_and_rejects() {
        let ledger = Arc::new(RwLock::new(BookingLedger::new()));
        let gateway = LedgerGateway::new(ledger.clone());

        let receipt = gateway
            .create_booking(&request("A B", "a@b.co", "Tour"))
            .await
            .unwrap();
        assert!(receipt.booking_id.starts_with("BK"));
        assert!(ledger.read().await.get(&receipt.booking_id).is_some());

        let err = gateway.create_booking(&BookingRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields");
    }
}
