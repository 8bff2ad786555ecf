//! Domain logic for crop-price analytics lives here.

pub mod analytics;
pub mod app_state;
pub mod entities;
pub mod filter;
pub mod price;

#[allow(unused_imports)]
pub use analytics::{
    build_global_averages, build_region_averages, build_series, distinct_crop_names, DerivedViews,
    DEFAULT_PRICE_THRESHOLD,
};
#[allow(unused_imports)]
pub use app_state::{AppState, CacheResource, CacheTimestamps, PersistedState, SelectionState};
#[allow(unused_imports)]
pub use entities::{
    CropListing, CropPricePoint, GlobalCropAverage, ListingStatus, Region, RegionCropAverage,
};
#[allow(unused_imports)]
pub use filter::{ListingFilter, SaleKind};
#[allow(unused_imports)]
pub use price::parse_price;
