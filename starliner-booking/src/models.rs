use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use starliner_shared::Masked;

pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 10;

/// Party size by age band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Travelers {
    pub adults: u32,
    /// Children aged 8 to 12
    pub children_812: u32,
    /// Children aged 3 to 7
    pub children_37: u32,
    pub infants: u32,
}

impl Travelers {
    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.children_812)
            .saturating_add(self.children_37)
            .saturating_add(self.infants)
    }
}

impl Default for Travelers {
    fn default() -> Self {
        Self {
            adults: 1,
            children_812: 0,
            children_37: 0,
            infants: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub country: String,
}

impl Default for CustomerDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            postal_code: String::new(),
            country: "United States".to_string(),
        }
    }
}

/// Card fields. Collected and forwarded, never charged here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub card_number: Masked<String>,
    pub card_name: String,
    /// "MM/YY"
    pub expiry_date: Masked<String>,
    pub cvv: Masked<String>,
}

/// Everything the booking wizard collects across its four steps
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub selected_date: Option<NaiveDate>,
    pub time_slot: String,
    pub travelers: Travelers,
    pub customer: CustomerDetails,
    pub payment: PaymentDetails,
}
