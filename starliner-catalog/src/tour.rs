use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::pricing::PriceQuote;

/// A bookable departure time within a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    /// Wall-clock start, e.g. "09:00"
    pub time: String,
    /// Advisory only. Nothing reserves or decrements it.
    pub capacity: u32,
}

impl TimeSlot {
    pub fn new(time: &str, capacity: u32) -> Self {
        Self {
            time: time.to_string(),
            capacity,
        }
    }
}

/// Weekly recurrence pattern for a tour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TourSchedule {
    /// Weekday indices, 0 = Sunday .. 6 = Saturday
    pub available_days: BTreeSet<u8>,
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub blocked_dates: BTreeSet<NaiveDate>,
    /// Rolling window size counted from today inclusive
    pub advance_booking_days: u32,
}

impl TourSchedule {
    /// Monday to Saturday with the given slots and a 60 day horizon.
    pub fn weekdays_and_saturday(time_slots: Vec<TimeSlot>) -> Self {
        Self {
            available_days: (1..=6).collect(),
            time_slots,
            blocked_dates: BTreeSet::new(),
            advance_booking_days: 60,
        }
    }

    pub fn runs_on(&self, weekday: Weekday) -> bool {
        // num_days_from_sunday is always < 7
        self.available_days.contains(&(weekday.num_days_from_sunday() as u8))
    }

    pub fn is_blocked(&self, date: NaiveDate) -> bool {
        self.blocked_dates.contains(&date)
    }

    pub fn runs_on_date(&self, date: NaiveDate) -> bool {
        self.runs_on(date.weekday()) && !self.is_blocked(date)
    }
}

/// A tour as listed in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: String,
    pub title: String,
    pub short_description: String,
    /// Per-person price in whole currency units
    pub price: u32,
    pub duration_hours: f64,
    pub image: String,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<TourSchedule>,
}

impl Tour {
    /// Find a declared time slot by its "HH:MM" label
    pub fn time_slot(&self, time: &str) -> Option<&TimeSlot> {
        self.schedule
            .as_ref()
            .and_then(|s| s.time_slots.iter().find(|slot| slot.time == time))
    }

    /// Flat per-person quote; traveler categories are not priced differently.
    pub fn quote(&self, total_travelers: u32) -> PriceQuote {
        PriceQuote::flat(self.price, total_travelers)
    }
}

/// Input for creating a tour through the admin surface.
///
/// Every field defaults so that a partially filled body is rejected by
/// [`NewTour::into_tour`] rather than by the deserializer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTour {
    pub title: String,
    pub short_description: String,
    pub details: String,
    pub price: u32,
    pub duration_hours: f64,
    pub image: String,
    pub schedule: Option<TourSchedule>,
}

impl NewTour {
    pub fn into_tour(self, now: DateTime<Utc>) -> Result<Tour, CatalogError> {
        let missing_text = [
            &self.title,
            &self.short_description,
            &self.details,
            &self.image,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        let bad_duration = self.duration_hours.is_nan() || self.duration_hours <= 0.0;

        if missing_text || self.price == 0 || bad_duration {
            return Err(CatalogError::MissingFields);
        }

        Ok(Tour {
            id: format!("tour-{}", now.timestamp_millis()),
            title: self.title,
            short_description: self.short_description,
            price: self.price,
            duration_hours: self.duration_hours,
            image: self.image,
            details: self.details,
            schedule: self.schedule,
        })
    }
}

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Tour not found: {0}")]
    NotFound(String),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Tour already exists: {0}")]
    Duplicate(String),
}

/// Lookup capability the booking flow depends on.
///
/// The availability calculator and the wizard only ever see a [`Tour`], so a
/// real backing store can replace the in-memory catalog behind this trait.
#[async_trait]
pub trait TourCatalog: Send + Sync {
    async fn list_tours(&self) -> Vec<Tour>;

    async fn get_tour_by_id(&self, id: &str) -> Option<Tour>;

    async fn add_tour(&self, tour: Tour) -> Result<(), CatalogError>;
}

/// In-memory catalog seeded from a fixed list
pub struct InMemoryTourCatalog {
    tours: RwLock<Vec<Tour>>,
}

impl InMemoryTourCatalog {
    pub fn new(tours: Vec<Tour>) -> Self {
        Self {
            tours: RwLock::new(tours),
        }
    }
}

impl Default for InMemoryTourCatalog {
    fn default() -> Self {
        Self::new(crate::fixtures::default_tours())
    }
}

#[async_trait]
impl TourCatalog for InMemoryTourCatalog {
    async fn list_tours(&self) -> Vec<Tour> {
        self.tours.read().await.clone()
    }

    async fn get_tour_by_id(&self, id: &str) -> Option<Tour> {
        self.tours.read().await.iter().find(|t| t.id == id).cloned()
    }

    async fn add_tour(&self, tour: Tour) -> Result<(), CatalogError> {
        let mut tours = self.tours.write().await;
        if tours.iter().any(|t| t.id == tour.id) {
            return Err(CatalogError::Duplicate(tour.id));
        }

        tracing::info!(tour_id = %tour.id, title = %tour.title, "Tour added to catalog");
        tours.push(tour);
        Ok(())
    }
}
