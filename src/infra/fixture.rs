//! Bundled sample listings, used when the marketplace API is unreachable
//! and nothing is cached. Mirrors a real snapshot of the market so the
//! dashboard stays demonstrable offline.

use uuid::Uuid;

use crate::domain::{CropListing, ListingStatus};

struct FixtureRow {
    name: &'static str,
    price_text: &'static str,
    seller: &'static str,
    contact: &'static str,
    date: &'static str,
    region: &'static str,
    category: &'static str,
    wholesale: bool,
    status: &'static str,
}

const ROWS: &[FixtureRow] = &[
    FixtureRow {
        name: "Maize",
        price_text: "TZS 1800/kg",
        seller: "Mkulima Asha",
        contact: "+255123456789",
        date: "2025-07-22",
        region: "Dodoma",
        category: "cereals",
        wholesale: true,
        status: "Sold",
    },
    FixtureRow {
        name: "Beans",
        price_text: "TZS 2000/kg",
        seller: "Neema John",
        contact: "0789123456",
        date: "2025-08-19",
        region: "Mwanza",
        category: "cereals",
        wholesale: false,
        status: "Available",
    },
    FixtureRow {
        name: "Rice",
        price_text: "TZS 2000/kg",
        seller: "James Zaki",
        contact: "0712345678",
        date: "2025-04-20",
        region: "Kahama",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Maize",
        price_text: "TZS 1400/kg",
        seller: "Mkulima Asha",
        contact: "+255123456789",
        date: "2025-07-22",
        region: "Dodoma",
        category: "cereals",
        wholesale: true,
        status: "Sold",
    },
    FixtureRow {
        name: "Beans",
        price_text: "TZS 2000/kg",
        seller: "Asha",
        contact: "0789123456",
        date: "2025-01-19",
        region: "Arusha",
        category: "cereals",
        wholesale: false,
        status: "Available",
    },
    FixtureRow {
        name: "Rice",
        price_text: "TZS 2300/kg",
        seller: "James Zaki",
        contact: "0712345678",
        date: "2025-06-20",
        region: "Kahama",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Beans",
        price_text: "TZS 2800/kg",
        seller: "Asha",
        contact: "0789123456",
        date: "2025-08-19",
        region: "Dodoma",
        category: "cereals",
        wholesale: false,
        status: "Available",
    },
    FixtureRow {
        name: "Wheat",
        price_text: "TZS 1000/kg",
        seller: "John",
        contact: "0712345678",
        date: "2025-05-20",
        region: "Mbeya",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Millet",
        price_text: "TZS 900/kg",
        seller: "John",
        contact: "0712345678",
        date: "2025-05-20",
        region: "Shinyanga",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Rice",
        price_text: "TZS 1500/kg",
        seller: "James Zaki",
        contact: "0712345678",
        date: "2025-01-20",
        region: "Kahama",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Beans",
        price_text: "TZS 1800/kg",
        seller: "Asha",
        contact: "0789123456",
        date: "2025-05-19",
        region: "Arusha",
        category: "cereals",
        wholesale: false,
        status: "Available",
    },
    FixtureRow {
        name: "Ground Nuts",
        price_text: "TZS 1200/kg",
        seller: "John",
        contact: "0712345678",
        date: "2025-05-20",
        region: "Dodoma",
        category: "nuts",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Maize",
        price_text: "TZS 1100/kg",
        seller: "Mkulima Asha",
        contact: "+255123456789",
        date: "2025-03-22",
        region: "Kahama",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Rice",
        price_text: "TZS 2200/kg",
        seller: "John",
        contact: "0712345678",
        date: "2025-02-20",
        region: "Kahama",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
    FixtureRow {
        name: "Maize",
        price_text: "TZS 2400/kg",
        seller: "Mkulima Asha",
        contact: "+255123456789",
        date: "2025-09-22",
        region: "Tanga",
        category: "cereals",
        wholesale: true,
        status: "Available",
    },
];

/// Materialise the bundled sample listings with fresh session ids.
pub fn sample_listings() -> Vec<CropListing> {
    ROWS.iter()
        .map(|row| CropListing {
            id: Uuid::new_v4().to_string(),
            name: row.name.to_string(),
            price_text: row.price_text.to_string(),
            seller: row.seller.to_string(),
            contact: row.contact.to_string(),
            date: row.date.to_string(),
            region: row.region.to_string(),
            category: row.category.to_string(),
            wholesale: row.wholesale,
            status: ListingStatus::parse(row.status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_region_averages, build_series, distinct_crop_names};

    #[test]
    fn fixture_is_non_empty_and_well_formed() {
        let listings = sample_listings();
        assert!(!listings.is_empty());
        // Every bundled price must parse; the fixture is not the place to
        // exercise the defect path.
        for listing in &listings {
            assert!(crate::domain::parse_price(&listing.price_text).is_some());
        }
    }

    #[test]
    fn fixture_covers_the_dashboard_scenarios() {
        let listings = sample_listings();
        assert!(distinct_crop_names(&listings).contains(&"Maize".to_string()));
        assert!(!build_series(&listings, "Maize").is_empty());
        // Dodoma's Maize listings are all sold, so the region panel shows
        // Beans and Ground Nuts only.
        let dodoma = build_region_averages(&listings, "Dodoma");
        assert!(dodoma.iter().all(|avg| avg.crop_name != "Maize"));
        assert!(dodoma.iter().any(|avg| avg.crop_name == "Beans"));
    }
}
