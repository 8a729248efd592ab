use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use starliner_shared::Masked;

/// Lifecycle status of a stored booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Payload sent to the persistence collaborator when a booking is submitted.
///
/// Every field defaults so the receiving side can report missing fields
/// itself instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub tour_id: String,
    pub tour_name: String,
    /// Midnight UTC of the selected calendar date
    pub date: Option<DateTime<Utc>>,
    pub time: String,
    pub adults: u32,
    pub children_812: u32,
    pub children_37: u32,
    pub infants: u32,
    pub total_travelers: u32,
    pub total_price: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub country: String,
    pub card_number: Masked<String>,
    pub card_name: String,
    pub expiry_date: Masked<String>,
    pub cvv: Masked<String>,
}

impl BookingRequest {
    /// Names of required fields that are absent or blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tour_id.trim().is_empty() {
            missing.push("tourId");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time.trim().is_empty() {
            missing.push("time");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        missing
    }
}

/// A booking record as stored and echoed back by the persistence collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub tour_id: String,
    pub tour_title: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub adults: u32,
    /// Both child age bands combined
    pub children: u32,
    pub infants: u32,
    pub total_members: u32,
    pub postal_code: String,
    pub country: String,
    pub status: BookingStatus,
    pub total_price: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}
