use crate::tour::{TimeSlot, Tour, TourSchedule};

fn four_slots(capacity: u32) -> Vec<TimeSlot> {
    ["09:00", "11:00", "14:00", "16:00"]
        .into_iter()
        .map(|time| TimeSlot::new(time, capacity))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn tour(
    id: &str,
    title: &str,
    short_description: &str,
    price: u32,
    duration_hours: f64,
    image: &str,
    details: &str,
    time_slots: Vec<TimeSlot>,
) -> Tour {
    Tour {
        id: id.to_string(),
        title: title.to_string(),
        short_description: short_description.to_string(),
        price,
        duration_hours,
        image: image.to_string(),
        details: details.to_string(),
        schedule: Some(TourSchedule::weekdays_and_saturday(time_slots)),
    }
}

/// The tours the public site ships with
pub fn default_tours() -> Vec<Tour> {
    vec![
        tour(
            "sunset-sail",
            "Sunset Sail Cruise",
            "Glide across the bay as the sun dips below the horizon.",
            129,
            2.0,
            "/sunset-sail-cruise.jpg",
            "Enjoy a serene two-hour sunset sail with complimentary beverages and guided commentary on local landmarks.",
            four_slots(10),
        ),
        tour(
            "city-walk",
            "Historic City Walking Tour",
            "Discover hidden alleys, architecture, and stories of the old town.",
            49,
            3.0,
            "/historic-city-walking-tour.jpg",
            "A curated route through the city's most iconic districts, with stops for photos and local treats.",
            four_slots(15),
        ),
        tour(
            "mountain-hike",
            "Guided Mountain Hike",
            "A moderate ascent with panoramic views and expert guides.",
            99,
            5.0,
            "/guided-mountain-hike.jpg",
            "Trail-tested guides lead you up scenic paths with frequent rest points and nature insights.",
            vec![TimeSlot::new("09:00", 12), TimeSlot::new("14:00", 12)],
        ),
        tour(
            "wine-country",
            "Wine Country Day Trip",
            "Taste award-winning wines and stroll through vineyards.",
            159,
            6.0,
            "/wine-country-vineyards.jpg",
            "Visit two boutique wineries, enjoy a picnic lunch, and learn about local varietals.",
            four_slots(8),
        ),
        tour(
            "reef-snorkel",
            "Coral Reef Snorkeling",
            "Explore vibrant marine life with top-quality gear included.",
            139,
            4.0,
            "/coral-reef-snorkeling.png",
            "Crystal-clear waters, guided snorkel tour, and safety briefing for all experience levels.",
            four_slots(10),
        ),
        tour(
            "food-tour",
            "Street Food Safari",
            "Savor local flavors on a chef-curated tasting trail.",
            69,
            2.0,
            "/street-food-tour.png",
            "Sample 6+ dishes from beloved vendors, with stories about the food culture and people behind it.",
            four_slots(12),
        ),
    ]
}
