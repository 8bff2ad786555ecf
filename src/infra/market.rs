//! Thin asynchronous client for the marketplace backend and the Tanzania
//! regions gazetteer.
//!
//! - Provides typed accessors for crop listings and region names.
//! - Maintains a simple 30-minute in-memory cache with stale fallbacks;
//!   the gazetteer additionally persists to disk with a 7-day TTL.

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{CropListing, ListingStatus, Region};
use crate::infra::cache::{load_region_cache, save_region_cache, RegionCache};

const DEFAULT_BASE_URL: &str = "https://api.mazaosoko.co.tz/api/";
const REGIONS_BASE_URL: &str = "https://api.tanzaniaregions.com/api/v1/";
const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
const USER_AGENT: &str = concat!("mazao-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum MarketClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: SystemTime,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: SystemTime, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

#[derive(Default)]
struct MarketCache {
    listings: Option<Cached<Vec<CropListing>>>,
    regions: Option<Cached<Vec<Region>>>,
}

#[derive(Clone)]
pub struct MarketClient {
    http: Client,
    base_url: Url,
    regions_url: Url,
    cache: Arc<Mutex<MarketCache>>,
    ttl: Duration,
}

impl MarketClient {
    pub fn new() -> Result<Self, MarketClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, MarketClientError> {
        let base_url = Url::parse(base)?;
        let regions_url = Url::parse(REGIONS_BASE_URL)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            regions_url,
            cache: Arc::new(Mutex::new(MarketCache::default())),
            ttl: DEFAULT_TTL,
        })
    }

    /// Fetch the full listing store. Served from the in-memory cache while
    /// fresh; falls back to a stale payload when the backend is down.
    pub async fn get_listings(&self) -> Result<CachedPayload<Vec<CropListing>>, MarketClientError> {
        if let Some(payload) = self.cached_listings().await {
            return Ok(payload);
        }

        let url = self.url("market/items/")?;
        debug!(%url, "requesting marketplace listings");
        match self.fetch_list::<ListingDto>(self.http.get(url)).await {
            Ok(rows) => {
                let data: Vec<CropListing> = rows.into_iter().map(CropListing::from).collect();
                info!(listings = data.len(), "loaded marketplace listings");
                Ok(self.store_listings(data, CacheStatus::Fresh).await)
            }
            Err(error) => {
                warn!(%error, "listing fetch failed");
                if let Some(stale) = self.cached_listings_stale().await {
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    /// Fetch the region gazetteer. Checked against the disk cache first;
    /// a fetch failure falls back to whatever cached copy exists.
    pub async fn get_regions(&self) -> Result<CachedPayload<Vec<Region>>, MarketClientError> {
        if let Some(payload) = self.cached_regions().await {
            return Ok(payload);
        }

        if let Some(disk) = load_region_cache() {
            if !disk.is_expired() {
                debug!(age = %disk.age_string(), "using region gazetteer from disk");
                return Ok(self.store_regions(disk.regions, CacheStatus::Cached).await);
            }
        }

        let url = self.regions_url.join("regions")?;
        debug!(%url, "requesting region gazetteer");
        match self
            .fetch_enveloped::<Vec<RegionDto>>(self.http.get(url))
            .await
        {
            Ok(rows) => {
                let data: Vec<Region> = rows.into_iter().map(Region::from).collect();
                info!(regions = data.len(), "loaded region gazetteer");
                if let Err(error) = save_region_cache(&RegionCache::new(data.clone())) {
                    warn!(%error, "failed to persist region cache");
                }
                Ok(self.store_regions(data, CacheStatus::Fresh).await)
            }
            Err(error) => {
                warn!(%error, "region fetch failed");
                if let Some(disk) = load_region_cache() {
                    // Expired beats empty when the API is unreachable.
                    return Ok(self.store_regions(disk.regions, CacheStatus::Stale).await);
                }
                if let Some(stale) = self.cached_regions_stale().await {
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    async fn cached_listings(&self) -> Option<CachedPayload<Vec<CropListing>>> {
        let cache = self.cache.lock().await;
        cache
            .listings
            .as_ref()
            .and_then(|entry| entry.if_fresh(self.ttl))
    }

    async fn cached_listings_stale(&self) -> Option<CachedPayload<Vec<CropListing>>> {
        let cache = self.cache.lock().await;
        cache.listings.as_ref().map(Cached::stale)
    }

    async fn cached_regions(&self) -> Option<CachedPayload<Vec<Region>>> {
        let cache = self.cache.lock().await;
        cache
            .regions
            .as_ref()
            .and_then(|entry| entry.if_fresh(self.ttl))
    }

    async fn cached_regions_stale(&self) -> Option<CachedPayload<Vec<Region>>> {
        let cache = self.cache.lock().await;
        cache.regions.as_ref().map(Cached::stale)
    }

    async fn store_listings(
        &self,
        data: Vec<CropListing>,
        status: CacheStatus,
    ) -> CachedPayload<Vec<CropListing>> {
        let fetched_at = SystemTime::now();
        let payload = CachedPayload::new(data.clone(), fetched_at, status);
        let mut cache = self.cache.lock().await;
        cache.listings = Some(Cached::new(data, fetched_at));
        payload
    }

    async fn store_regions(
        &self,
        data: Vec<Region>,
        status: CacheStatus,
    ) -> CachedPayload<Vec<Region>> {
        let fetched_at = SystemTime::now();
        let payload = CachedPayload::new(data.clone(), fetched_at, status);
        let mut cache = self.cache.lock().await;
        cache.regions = Some(Cached::new(data, fetched_at));
        payload
    }

    // The marketplace backend returns a bare JSON array.
    async fn fetch_list<T>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<T>, MarketClientError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    // The regions API wraps its payload in a `{ data: [...] }` envelope.
    async fn fetch_enveloped<T>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, MarketClientError>
    where
        T: DeserializeOwned + Default,
    {
        let response = builder.send().await?.error_for_status()?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| MarketClientError::Api("response missing data".into()))
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }
}

struct Cached<T> {
    value: T,
    fetched_at: SystemTime,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: SystemTime) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self
            .fetched_at
            .elapsed()
            .map(|elapsed| elapsed <= ttl)
            .unwrap_or(false)
        {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ListingDto {
    name: String,
    price: String,
    #[serde(default)]
    seller: Option<String>,
    #[serde(default, alias = "contact_info")]
    contact: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default, alias = "location")]
    region: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    wholesale: Option<bool>,
    #[serde(default)]
    status: Option<String>,
}

impl From<ListingDto> for CropListing {
    fn from(dto: ListingDto) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name,
            price_text: dto.price,
            seller: dto.seller.unwrap_or_else(|| "Unknown seller".to_string()),
            contact: dto.contact.unwrap_or_default(),
            date: dto.date.unwrap_or_default(),
            region: dto.region.unwrap_or_default(),
            category: dto.category.unwrap_or_else(|| "other".to_string()),
            wholesale: dto.wholesale.unwrap_or(false),
            status: dto
                .status
                .as_deref()
                .map(ListingStatus::parse)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegionDto {
    name: String,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lng")]
    longitude: Option<f64>,
}

impl From<RegionDto> for Region {
    fn from(dto: RegionDto) -> Self {
        Self {
            name: dto.name,
            latitude: dto.latitude.unwrap_or(0.0),
            longitude: dto.longitude.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_dto_maps_backend_field_names() {
        let json = r#"{
            "name": "Maize",
            "price": "TZS 1800/kg",
            "seller": "Mkulima Asha",
            "contact_info": "+255123456789",
            "date": "2025-07-22",
            "location": "Dodoma",
            "category": "cereals",
            "wholesale": true,
            "status": "sold"
        }"#;
        let dto: ListingDto = serde_json::from_str(json).unwrap();
        let listing = CropListing::from(dto);
        assert_eq!(listing.name, "Maize");
        assert_eq!(listing.price_text, "TZS 1800/kg");
        assert_eq!(listing.region, "Dodoma");
        assert!(listing.status.is_sold());
        assert!(!listing.id.is_empty());
    }

    #[test]
    fn listing_dto_tolerates_sparse_rows() {
        let json = r#"{ "name": "Beans", "price": "TZS 2000/kg" }"#;
        let dto: ListingDto = serde_json::from_str(json).unwrap();
        let listing = CropListing::from(dto);
        assert_eq!(listing.status, ListingStatus::Available);
        assert!(!listing.wholesale);
        assert_eq!(listing.category, "other");
    }

    #[test]
    fn region_dto_accepts_short_coordinate_names() {
        let json = r#"{ "name": "Dodoma", "lat": -6.163, "lng": 35.7516 }"#;
        let region = Region::from(serde_json::from_str::<RegionDto>(json).unwrap());
        assert_eq!(region.name, "Dodoma");
        assert!(region.latitude < 0.0);
    }
}
