//! Remote data access: marketplace backend, region gazetteer, disk caches.

pub mod cache;
pub mod fixture;
pub mod market;
