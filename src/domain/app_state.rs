use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::analytics::{distinct_crop_names, DEFAULT_PRICE_THRESHOLD};
use super::entities::{CropListing, Region};

/// Which crop and region the dashboard is focused on.
///
/// The two fields move independently: picking a crop never clears the
/// region and vice versa. Aggregations stay pure; this is the only piece
/// of mutable state they depend on, and it is owned by [`AppState`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    /// Defaults to the first distinct crop name once listings load; never
    /// `None` afterwards while the store is non-empty.
    pub selected_crop: Option<String>,
    /// Set only by region-selection events from the map panel.
    pub selected_region: Option<String>,
}

impl SelectionState {
    pub fn select_crop(&mut self, crop: impl Into<String>) {
        self.selected_crop = Some(crop.into());
    }

    pub fn select_region(&mut self, region: impl Into<String>) {
        self.selected_region = Some(region.into());
    }

    pub fn clear_region(&mut self) {
        self.selected_region = None;
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    /// The listing store: loaded once per session, read-only afterwards.
    pub listings: Vec<CropListing>,
    /// Region gazetteer; may be empty while the fetch is in flight.
    pub regions: Vec<Region>,
    pub selection: SelectionState,
    /// Cut-off for the high-value summary chart, in TZS.
    pub price_threshold: u64,
    pub cache: CacheTimestamps,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            listings: Vec::new(),
            regions: Vec::new(),
            selection: SelectionState::default(),
            price_threshold: DEFAULT_PRICE_THRESHOLD,
            cache: CacheTimestamps::default(),
        }
    }
}

impl AppState {
    /// Installs a freshly loaded listing store. The selected crop falls back
    /// to the first distinct name unless the previous choice is still
    /// present (a refresh should not yank the dropdown).
    pub fn set_listings(&mut self, listings: Vec<CropListing>) {
        self.listings = listings;
        let names = distinct_crop_names(&self.listings);
        let keep_current = self
            .selection
            .selected_crop
            .as_ref()
            .map(|crop| names.iter().any(|name| name == crop))
            .unwrap_or(false);
        if !keep_current {
            self.selection.selected_crop = names.first().cloned();
        }
    }

    /// Region names offered for selection: the gazetteer when loaded,
    /// otherwise whatever regions the listings themselves mention.
    pub fn region_names(&self) -> Vec<String> {
        if !self.regions.is_empty() {
            return self.regions.iter().map(|region| region.name.clone()).collect();
        }
        let mut names: Vec<String> = Vec::new();
        for listing in &self.listings {
            if !names.iter().any(|name| name == &listing.region) {
                names.push(listing.region.clone());
            }
        }
        names
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.cache.is_stale(resource, ttl)
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.price_threshold = persisted.price_threshold;
        if persisted.selected_crop.is_some() {
            self.selection.selected_crop = persisted.selected_crop;
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            selected_crop: self.selection.selected_crop.clone(),
            price_threshold: self.price_threshold,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    Listings,
    Regions,
}

/// The slice of user state written to disk between sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub selected_crop: Option<String>,
    #[serde(default = "default_threshold")]
    pub price_threshold: u64,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            selected_crop: None,
            price_threshold: DEFAULT_PRICE_THRESHOLD,
        }
    }
}

fn default_threshold() -> u64 {
    DEFAULT_PRICE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ListingStatus;

    fn listing(name: &str, region: &str) -> CropListing {
        CropListing {
            id: format!("{name}-{region}"),
            name: name.to_string(),
            price_text: "TZS 1000/kg".to_string(),
            seller: "John".to_string(),
            contact: "0712345678".to_string(),
            date: "2025-05-20".to_string(),
            region: region.to_string(),
            category: "cereals".to_string(),
            wholesale: true,
            status: ListingStatus::Available,
        }
    }

    #[test]
    fn first_distinct_crop_becomes_initial_selection() {
        let mut state = AppState::default();
        state.set_listings(vec![
            listing("Maize", "Dodoma"),
            listing("Beans", "Mwanza"),
            listing("Maize", "Mbeya"),
        ]);
        assert_eq!(state.selection.selected_crop.as_deref(), Some("Maize"));
        assert_eq!(state.selection.selected_region, None);
    }

    #[test]
    fn refresh_keeps_selection_when_crop_still_listed() {
        let mut state = AppState::default();
        state.set_listings(vec![listing("Maize", "Dodoma"), listing("Beans", "Mwanza")]);
        state.selection.select_crop("Beans");

        state.set_listings(vec![listing("Beans", "Mwanza"), listing("Maize", "Dodoma")]);
        assert_eq!(state.selection.selected_crop.as_deref(), Some("Beans"));
    }

    #[test]
    fn refresh_resets_selection_when_crop_disappears() {
        let mut state = AppState::default();
        state.set_listings(vec![listing("Maize", "Dodoma"), listing("Beans", "Mwanza")]);
        state.selection.select_crop("Beans");

        state.set_listings(vec![listing("Maize", "Dodoma")]);
        assert_eq!(state.selection.selected_crop.as_deref(), Some("Maize"));
    }

    #[test]
    fn crop_and_region_selection_are_independent() {
        let mut state = AppState::default();
        state.set_listings(vec![listing("Maize", "Dodoma"), listing("Beans", "Mwanza")]);

        state.selection.select_region("Dodoma");
        state.selection.select_crop("Beans");
        assert_eq!(state.selection.selected_region.as_deref(), Some("Dodoma"));

        state.selection.select_region("Mwanza");
        assert_eq!(state.selection.selected_crop.as_deref(), Some("Beans"));
    }

    #[test]
    fn region_names_fall_back_to_listing_regions() {
        let mut state = AppState::default();
        state.set_listings(vec![
            listing("Maize", "Dodoma"),
            listing("Beans", "Mwanza"),
            listing("Wheat", "Dodoma"),
        ]);
        assert_eq!(state.region_names(), vec!["Dodoma", "Mwanza"]);

        state.regions = vec![Region {
            name: "Arusha".to_string(),
            latitude: -3.3869,
            longitude: 36.6829,
        }];
        assert_eq!(state.region_names(), vec!["Arusha"]);
    }

    #[test]
    fn persisted_threshold_round_trips() {
        let mut state = AppState::default();
        state.price_threshold = 2500;
        state.selection.select_crop("Rice");

        let mut restored = AppState::default();
        restored.apply_persisted(state.to_persisted());
        assert_eq!(restored.price_threshold, 2500);
        assert_eq!(restored.selection.selected_crop.as_deref(), Some("Rice"));
    }
}
