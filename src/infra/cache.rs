//! Persistent on-disk caching for the region gazetteer with TTL tracking.

use std::{
    fs,
    path::PathBuf,
    sync::OnceLock,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::Region;

const CACHE_FILENAME: &str = "region_cache.json";

/// Cache TTL: 7 days. Administrative regions change on the order of years.
pub const REGION_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Cached gazetteer with its creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCache {
    /// Unix timestamp (seconds) when this cache was created.
    pub cached_at: u64,
    /// All regions from the gazetteer API.
    pub regions: Vec<Region>,
}

impl RegionCache {
    /// Create a new cache with the current timestamp.
    pub fn new(regions: Vec<Region>) -> Self {
        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self { cached_at, regions }
    }

    /// Check if the cache is older than the TTL.
    pub fn is_expired(&self) -> bool {
        self.age() > REGION_CACHE_TTL
    }

    /// Cache age as a Duration.
    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    /// Human-readable age string.
    pub fn age_string(&self) -> String {
        crate::util::compact_age(self.age().as_secs())
    }
}

/// Cache file path inside the platform's local data directory.
fn cache_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mazao-dashboard");

        let _ = fs::create_dir_all(&base);

        base.join(CACHE_FILENAME)
    })
    .clone()
}

/// Load the region cache from disk, if present and parsable.
pub fn load_region_cache() -> Option<RegionCache> {
    let path = cache_path();

    if !path.exists() {
        debug!(path = %path.display(), "no region cache on disk");
        return None;
    }

    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str::<RegionCache>(&content) {
            Ok(cache) => {
                debug!(
                    regions = cache.regions.len(),
                    age = %cache.age_string(),
                    "loaded region cache from disk"
                );
                Some(cache)
            }
            Err(error) => {
                warn!(%error, "failed to parse region cache");
                None
            }
        },
        Err(error) => {
            warn!(%error, "failed to read region cache");
            None
        }
    }
}

/// Save the region cache to disk.
pub fn save_region_cache(cache: &RegionCache) -> Result<(), std::io::Error> {
    let path = cache_path();
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(&path, content)?;
    debug!(
        regions = cache.regions.len(),
        path = %path.display(),
        "saved region cache"
    );
    Ok(())
}
