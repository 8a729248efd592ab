pub mod availability;
pub mod fixtures;
pub mod pricing;
pub mod tour;

pub use availability::{compute_available_dates, is_date_available, FALLBACK_WINDOW_DAYS};
pub use fixtures::default_tours;
pub use pricing::PriceQuote;
pub use tour::{
    CatalogError, InMemoryTourCatalog, NewTour, TimeSlot, Tour, TourCatalog, TourSchedule,
};
