use serde::{Deserialize, Serialize};

/// Availability of a marketplace listing.
///
/// The backend is not consistent about casing ("Sold" vs "sold"), so the
/// string form is always parsed case-insensitively. Anything that is not
/// recognisably sold counts as available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    Available,
    Sold,
}

impl ListingStatus {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("sold") {
            ListingStatus::Sold
        } else {
            ListingStatus::Available
        }
    }

    pub fn is_sold(&self) -> bool {
        matches!(self, ListingStatus::Sold)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Available => "Available",
            ListingStatus::Sold => "Sold",
        }
    }
}

/// One crop-for-sale record from the marketplace. Immutable once ingested;
/// every derived figure is recomputed from these rather than stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropListing {
    /// Session-local id assigned at ingest, used only as a display key.
    pub id: String,
    /// Crop name; repeated across listings, one entry per offer.
    pub name: String,
    /// Formatted price as published, e.g. "TZS 1800/kg".
    pub price_text: String,
    pub seller: String,
    pub contact: String,
    /// Calendar date in `YYYY-MM-DD` form; used only for ordering.
    pub date: String,
    /// Administrative region name, matched exactly against the gazetteer.
    pub region: String,
    pub category: String,
    pub wholesale: bool,
    pub status: ListingStatus,
}

/// An administrative region from the Tanzania regions gazetteer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One point of a per-crop price history. Duplicate dates are legal and keep
/// their listing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropPricePoint {
    pub date: String,
    pub price: u64,
}

/// Average price of one crop among the non-sold listings of a region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionCropAverage {
    pub crop_name: String,
    pub average_price: u64,
    pub region: String,
}

/// Average price of one crop across the whole store, kept only when it
/// clears the high-value threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalCropAverage {
    pub crop_name: String,
    pub average_price: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(ListingStatus::parse("Sold"), ListingStatus::Sold);
        assert_eq!(ListingStatus::parse("sold"), ListingStatus::Sold);
        assert_eq!(ListingStatus::parse(" SOLD "), ListingStatus::Sold);
        assert_eq!(ListingStatus::parse("Available"), ListingStatus::Available);
    }

    #[test]
    fn unknown_status_counts_as_available() {
        assert_eq!(ListingStatus::parse("reserved"), ListingStatus::Available);
        assert_eq!(ListingStatus::parse(""), ListingStatus::Available);
    }
}
