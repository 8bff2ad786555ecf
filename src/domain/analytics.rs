//! Aggregations over the listing store.
//!
//! Everything here is a pure function of the store plus the current
//! selection: no caching, no mutation, freshly allocated output per call.
//! Listings whose price text carries no digits are a data-quality defect;
//! the policy is to skip them with a warning rather than fold a misleading
//! zero into an average.

use time::{format_description::BorrowedFormatItem, macros::format_description, Date};
use tracing::warn;

use super::app_state::SelectionState;
use super::entities::{CropListing, CropPricePoint, GlobalCropAverage, RegionCropAverage};
use super::price::parse_price;

/// Crops whose global average stays at or below this many TZS are left out
/// of the high-value summary chart. A display policy, not a market rule;
/// adjustable from the settings page.
pub const DEFAULT_PRICE_THRESHOLD: u64 = 2000;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Price history for one crop, ascending by calendar date.
///
/// Dates are compared as parsed `time::Date`s, not as strings, so the
/// ordering would survive a change of date format. The sort is stable:
/// same-day listings keep their store order.
pub fn build_series(listings: &[CropListing], crop_name: &str) -> Vec<CropPricePoint> {
    let mut dated: Vec<(Date, CropPricePoint)> = listings
        .iter()
        .filter(|listing| listing.name == crop_name)
        .filter_map(|listing| {
            let price = usable_price(listing)?;
            let date = parse_listing_date(listing)?;
            let point = CropPricePoint {
                date: listing.date.clone(),
                price,
            };
            Some((date, point))
        })
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated.into_iter().map(|(_, point)| point).collect()
}

/// Average prices per crop for the non-sold listings of one region.
///
/// Output order is the first-occurrence order of each crop name in the
/// filtered store, which keeps recomputes deterministic. An unknown region
/// name is not an error; it just matches nothing.
pub fn build_region_averages(listings: &[CropListing], region: &str) -> Vec<RegionCropAverage> {
    let mut groups: Vec<PriceGroup> = Vec::new();
    for listing in listings
        .iter()
        .filter(|listing| !listing.status.is_sold())
        .filter(|listing| listing.region == region)
    {
        let Some(price) = usable_price(listing) else {
            continue;
        };
        push_group(&mut groups, &listing.name, price);
    }

    groups
        .into_iter()
        .map(|group| {
            let average_price = group.rounded_average();
            RegionCropAverage {
                crop_name: group.name,
                average_price,
                region: region.to_string(),
            }
        })
        .collect()
}

/// Average price per crop across the whole store (sold listings included),
/// keeping only crops whose average is strictly above `threshold`.
///
/// Filtering happens after grouping and never reorders the survivors.
pub fn build_global_averages(listings: &[CropListing], threshold: u64) -> Vec<GlobalCropAverage> {
    let mut groups: Vec<PriceGroup> = Vec::new();
    for listing in listings {
        let Some(price) = usable_price(listing) else {
            continue;
        };
        push_group(&mut groups, &listing.name, price);
    }

    groups
        .into_iter()
        .map(|group| {
            let average_price = group.rounded_average();
            GlobalCropAverage {
                crop_name: group.name,
                average_price,
            }
        })
        .filter(|average| average.average_price > threshold)
        .collect()
}

/// Distinct crop names in store enumeration order. Drives the crop dropdown
/// and the initial crop selection.
pub fn distinct_crop_names(listings: &[CropListing]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for listing in listings {
        if !names.iter().any(|name| name == &listing.name) {
            names.push(listing.name.clone());
        }
    }
    names
}

/// Everything the dashboard renders, recomputed as a whole on each selection
/// change. No field is ever patched in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedViews {
    pub series: Vec<CropPricePoint>,
    pub region_averages: Vec<RegionCropAverage>,
    pub global_averages: Vec<GlobalCropAverage>,
}

impl DerivedViews {
    pub fn compute(listings: &[CropListing], selection: &SelectionState, threshold: u64) -> Self {
        let series = selection
            .selected_crop
            .as_deref()
            .map(|crop| build_series(listings, crop))
            .unwrap_or_default();
        let region_averages = selection
            .selected_region
            .as_deref()
            .map(|region| build_region_averages(listings, region))
            .unwrap_or_default();
        let global_averages = build_global_averages(listings, threshold);

        Self {
            series,
            region_averages,
            global_averages,
        }
    }
}

struct PriceGroup {
    name: String,
    sum: u64,
    count: u64,
}

impl PriceGroup {
    fn rounded_average(&self) -> u64 {
        ((self.sum as f64) / (self.count as f64)).round() as u64
    }
}

// The store holds a few hundred listings over a handful of crops; a linear
// scan keeps first-occurrence order without an extra index map.
fn push_group(groups: &mut Vec<PriceGroup>, name: &str, price: u64) {
    if let Some(group) = groups.iter_mut().find(|group| group.name == name) {
        group.sum += price;
        group.count += 1;
    } else {
        groups.push(PriceGroup {
            name: name.to_string(),
            sum: price,
            count: 1,
        });
    }
}

fn usable_price(listing: &CropListing) -> Option<u64> {
    match parse_price(&listing.price_text) {
        Some(price) => Some(price),
        None => {
            warn!(
                listing = %listing.id,
                price_text = %listing.price_text,
                "skipping listing with unparsable price"
            );
            None
        }
    }
}

fn parse_listing_date(listing: &CropListing) -> Option<Date> {
    match Date::parse(&listing.date, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(
                listing = %listing.id,
                date = %listing.date,
                "skipping listing with unparsable date"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ListingStatus;

    fn listing(name: &str, price_text: &str, date: &str, region: &str, status: &str) -> CropListing {
        CropListing {
            id: format!("{name}-{date}-{region}"),
            name: name.to_string(),
            price_text: price_text.to_string(),
            seller: "Mkulima Asha".to_string(),
            contact: "+255123456789".to_string(),
            date: date.to_string(),
            region: region.to_string(),
            category: "cereals".to_string(),
            wholesale: true,
            status: ListingStatus::parse(status),
        }
    }

    fn maize_store() -> Vec<CropListing> {
        vec![
            listing("Maize", "TZS 1800/kg", "2025-07-22", "Dodoma", "Available"),
            listing("Maize", "TZS 1100/kg", "2025-03-22", "Dodoma", "Available"),
            listing("Maize", "TZS 2400/kg", "2025-09-22", "Mwanza", "Available"),
        ]
    }

    #[test]
    fn series_sorts_by_calendar_date_not_input_order() {
        let points = build_series(&maize_store(), "Maize");
        let prices: Vec<u64> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1100, 1800, 2400]);
        assert_eq!(points[0].date, "2025-03-22");
        assert_eq!(points[2].date, "2025-09-22");
    }

    #[test]
    fn series_length_matches_name_filter() {
        let mut store = maize_store();
        store.push(listing("Beans", "TZS 2000/kg", "2025-08-19", "Mwanza", "Available"));
        assert_eq!(build_series(&store, "Maize").len(), 3);
        assert_eq!(build_series(&store, "Beans").len(), 1);
    }

    #[test]
    fn series_name_match_is_case_sensitive() {
        assert!(build_series(&maize_store(), "maize").is_empty());
    }

    #[test]
    fn series_for_unknown_crop_is_empty_not_an_error() {
        assert!(build_series(&maize_store(), "Cassava").is_empty());
    }

    #[test]
    fn series_keeps_duplicate_dates_in_store_order() {
        let store = vec![
            listing("Rice", "TZS 2000/kg", "2025-04-20", "Kahama", "Available"),
            listing("Rice", "TZS 2300/kg", "2025-04-20", "Kahama", "Available"),
        ];
        let points = build_series(&store, "Rice");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 2000);
        assert_eq!(points[1].price, 2300);
    }

    #[test]
    fn region_average_is_rounded_mean_of_non_sold_listings() {
        let store = vec![
            listing("Maize", "TZS 1000/kg", "2025-05-01", "Dodoma", "Available"),
            listing("Maize", "TZS 2000/kg", "2025-05-02", "Dodoma", "Available"),
            listing("Maize", "TZS 3000/kg", "2025-05-03", "Dodoma", "Available"),
        ];
        let averages = build_region_averages(&store, "Dodoma");
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].crop_name, "Maize");
        assert_eq!(averages[0].average_price, 2000);
        assert_eq!(averages[0].region, "Dodoma");
    }

    #[test]
    fn region_with_only_sold_listings_yields_no_data() {
        let store = vec![listing("Maize", "TZS 1800/kg", "2025-07-22", "Dodoma", "Sold")];
        assert!(build_region_averages(&store, "Dodoma").is_empty());
    }

    #[test]
    fn sold_filter_is_case_insensitive() {
        let store = vec![
            listing("Maize", "TZS 1800/kg", "2025-07-22", "Dodoma", "sold"),
            listing("Maize", "TZS 1000/kg", "2025-07-23", "Dodoma", "Available"),
        ];
        let averages = build_region_averages(&store, "Dodoma");
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].average_price, 1000);
    }

    #[test]
    fn unknown_region_yields_empty_sequence() {
        assert!(build_region_averages(&maize_store(), "Atlantis").is_empty());
    }

    #[test]
    fn region_averages_keep_first_occurrence_order() {
        let store = vec![
            listing("Wheat", "TZS 1000/kg", "2025-05-20", "Mbeya", "Available"),
            listing("Millet", "TZS 900/kg", "2025-05-20", "Mbeya", "Available"),
            listing("Wheat", "TZS 1200/kg", "2025-05-21", "Mbeya", "Available"),
        ];
        let averages = build_region_averages(&store, "Mbeya");
        let names: Vec<&str> = averages.iter().map(|a| a.crop_name.as_str()).collect();
        assert_eq!(names, vec!["Wheat", "Millet"]);
    }

    #[test]
    fn global_average_at_threshold_is_excluded() {
        // Strict inequality: exactly 2000 must not survive the default cut.
        let store = vec![
            listing("Millet", "TZS 2000/kg", "2025-05-20", "Dodoma", "Available"),
            listing("Beans", "TZS 2800/kg", "2025-08-19", "Dodoma", "Available"),
        ];
        let averages = build_global_averages(&store, DEFAULT_PRICE_THRESHOLD);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].crop_name, "Beans");
        assert_eq!(averages[0].average_price, 2800);
    }

    #[test]
    fn global_averages_ignore_sold_status() {
        let store = vec![
            listing("Rice", "TZS 2400/kg", "2025-04-20", "Kahama", "Sold"),
            listing("Rice", "TZS 2200/kg", "2025-06-20", "Kahama", "Available"),
        ];
        let averages = build_global_averages(&store, 2000);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].average_price, 2300);
    }

    #[test]
    fn global_filter_does_not_reorder_survivors() {
        let store = vec![
            listing("Rice", "TZS 2300/kg", "2025-04-20", "Kahama", "Available"),
            listing("Millet", "TZS 900/kg", "2025-05-20", "Dodoma", "Available"),
            listing("Beans", "TZS 2800/kg", "2025-08-19", "Arusha", "Available"),
        ];
        let averages = build_global_averages(&store, 2000);
        let names: Vec<&str> = averages.iter().map(|a| a.crop_name.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Beans"]);
    }

    #[test]
    fn unparsable_prices_are_skipped_not_averaged_as_zero() {
        let store = vec![
            listing("Maize", "TZS /kg", "2025-07-22", "Dodoma", "Available"),
            listing("Maize", "TZS 1500/kg", "2025-07-23", "Dodoma", "Available"),
        ];
        let averages = build_region_averages(&store, "Dodoma");
        assert_eq!(averages.len(), 1);
        // Mean over the one parsable listing, not (0 + 1500) / 2.
        assert_eq!(averages[0].average_price, 1500);

        // A crop with no parsable price at all produces no row.
        let broken = vec![listing("Maize", "bei nzuri", "2025-07-22", "Dodoma", "Available")];
        assert!(build_region_averages(&broken, "Dodoma").is_empty());
    }

    #[test]
    fn unparsable_dates_are_dropped_from_the_series() {
        // Wrong field order and empty dates both come straight from sparse
        // backend rows; they must vanish without disturbing the ordering.
        let store = vec![
            listing("Maize", "TZS 1800/kg", "22-07-2025", "Dodoma", "Available"),
            listing("Maize", "TZS 1100/kg", "2025-03-22", "Kahama", "Available"),
            listing("Maize", "TZS 2400/kg", "", "Tanga", "Available"),
            listing("Maize", "TZS 2000/kg", "2025-06-10", "Mwanza", "Available"),
        ];
        let points = build_series(&store, "Maize");
        let prices: Vec<u64> = points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1100, 2000]);
        assert_eq!(points[0].date, "2025-03-22");
        assert_eq!(points[1].date, "2025-06-10");
    }

    #[test]
    fn aggregations_are_idempotent() {
        let store = maize_store();
        assert_eq!(build_series(&store, "Maize"), build_series(&store, "Maize"));
        assert_eq!(
            build_region_averages(&store, "Dodoma"),
            build_region_averages(&store, "Dodoma")
        );
        assert_eq!(
            build_global_averages(&store, 2000),
            build_global_averages(&store, 2000)
        );
    }

    #[test]
    fn distinct_names_follow_store_order() {
        let store = vec![
            listing("Maize", "TZS 1800/kg", "2025-07-22", "Dodoma", "Sold"),
            listing("Beans", "TZS 2000/kg", "2025-08-19", "Mwanza", "Available"),
            listing("Maize", "TZS 1400/kg", "2025-07-22", "Dodoma", "Sold"),
        ];
        assert_eq!(distinct_crop_names(&store), vec!["Maize", "Beans"]);
    }

    #[test]
    fn derived_views_follow_selection() {
        let store = maize_store();
        let mut selection = SelectionState::default();
        selection.select_crop("Maize");

        let views = DerivedViews::compute(&store, &selection, DEFAULT_PRICE_THRESHOLD);
        assert_eq!(views.series.len(), 3);
        // No region chosen yet: the region panel is a valid empty state.
        assert!(views.region_averages.is_empty());

        selection.select_region("Mwanza");
        let views = DerivedViews::compute(&store, &selection, DEFAULT_PRICE_THRESHOLD);
        assert_eq!(views.region_averages.len(), 1);
        assert_eq!(views.region_averages[0].average_price, 2400);
        // Crop selection is untouched by the region change.
        assert_eq!(views.series.len(), 3);
    }
}
