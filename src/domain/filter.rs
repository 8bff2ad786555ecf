//! Marketplace browse filters.

use serde::{Deserialize, Serialize};

use super::entities::CropListing;

/// Whether a listing is offered wholesale or retail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleKind {
    Wholesale,
    Retail,
}

impl SaleKind {
    pub fn label(&self) -> &'static str {
        match self {
            SaleKind::Wholesale => "Wholesale",
            SaleKind::Retail => "Retail",
        }
    }
}

/// Filter options for the marketplace grid. Unset fields match everything;
/// set fields combine with AND semantics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingFilter {
    pub kind: Option<SaleKind>,
    pub region: Option<String>,
    /// Exact `YYYY-MM-DD` match, mirroring the date picker.
    pub date: Option<String>,
    pub category: Option<String>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &CropListing) -> bool {
        if let Some(kind) = self.kind {
            let wants_wholesale = matches!(kind, SaleKind::Wholesale);
            if listing.wholesale != wants_wholesale {
                return false;
            }
        }
        if let Some(ref region) = self.region {
            if &listing.region != region {
                return false;
            }
        }
        if let Some(ref date) = self.date {
            if &listing.date != date {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !listing.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, listings: &'a [CropListing]) -> Vec<&'a CropListing> {
        listings
            .iter()
            .filter(|listing| self.matches(listing))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.region.is_none() && self.date.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ListingStatus;

    fn listing(name: &str, region: &str, date: &str, category: &str, wholesale: bool) -> CropListing {
        CropListing {
            id: format!("{name}-{region}"),
            name: name.to_string(),
            price_text: "TZS 1000/kg".to_string(),
            seller: "John".to_string(),
            contact: "0712345678".to_string(),
            date: date.to_string(),
            region: region.to_string(),
            category: category.to_string(),
            wholesale,
            status: ListingStatus::Available,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ListingFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&listing("Maize", "Dodoma", "2025-07-22", "cereals", true)));
    }

    #[test]
    fn kind_distinguishes_wholesale_from_retail() {
        let filter = ListingFilter {
            kind: Some(SaleKind::Retail),
            ..Default::default()
        };
        assert!(filter.matches(&listing("Beans", "Mwanza", "2025-08-19", "cereals", false)));
        assert!(!filter.matches(&listing("Maize", "Dodoma", "2025-07-22", "cereals", true)));
    }

    #[test]
    fn set_fields_combine_with_and_semantics() {
        let filter = ListingFilter {
            kind: Some(SaleKind::Wholesale),
            region: Some("Dodoma".to_string()),
            date: Some("2025-07-22".to_string()),
            category: Some("Cereals".to_string()),
        };
        // Category comparison tolerates the UI's capitalised labels.
        assert!(filter.matches(&listing("Maize", "Dodoma", "2025-07-22", "cereals", true)));
        assert!(!filter.matches(&listing("Maize", "Mbeya", "2025-07-22", "cereals", true)));
        assert!(!filter.matches(&listing("Maize", "Dodoma", "2025-07-23", "cereals", true)));
    }

    #[test]
    fn apply_keeps_store_order() {
        let store = vec![
            listing("Maize", "Dodoma", "2025-07-22", "cereals", true),
            listing("Beans", "Mwanza", "2025-08-19", "cereals", false),
            listing("Wheat", "Dodoma", "2025-05-20", "cereals", true),
        ];
        let filter = ListingFilter {
            region: Some("Dodoma".to_string()),
            ..Default::default()
        };
        let matched = filter.apply(&store);
        let names: Vec<&str> = matched.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Maize", "Wheat"]);
    }
}
