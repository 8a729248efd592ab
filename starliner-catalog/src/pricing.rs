use serde::{Deserialize, Serialize};

/// Price for a party, derived from the tour's per-person price.
///
/// Pricing is flat: every traveler category (adults, children, infants) pays
/// the same per-person amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub price_per_person: u32,
    pub total_travelers: u32,
    pub total_price: u32,
}

impl PriceQuote {
    pub fn flat(price_per_person: u32, total_travelers: u32) -> Self {
        Self {
            price_per_person,
            total_travelers,
            total_price: price_per_person.saturating_mul(total_travelers),
        }
    }
}
