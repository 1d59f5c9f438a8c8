//! # Storage Traits
//!
//! Abstractions the domain layer depends on, so the file-backed store, the
//! in-memory mock or a remote database can be swapped without touching the
//! services.

use anyhow::Result;
use async_trait::async_trait;
use shared::ImpactConfig;

use crate::domain::models::availability::VendorAvailability;

/// Persistence of vendor weekly availability, keyed by vendor id
#[async_trait]
pub trait AvailabilityStorage: Send + Sync {
    /// Insert or replace the availability for `availability.vendor_id`
    async fn store_availability(&self, availability: &VendorAvailability) -> Result<()>;

    /// Retrieve the availability for a vendor
    async fn get_availability(&self, vendor_id: &str) -> Result<Option<VendorAvailability>>;

    /// Delete a vendor's availability
    /// Returns true if a record was found and removed
    async fn delete_availability(&self, vendor_id: &str) -> Result<bool>;

    /// List all stored availabilities, ordered by vendor id
    async fn list_availabilities(&self) -> Result<Vec<VendorAvailability>>;
}

/// Source of the impact conversion factors.
///
/// Keyed by vendor so regional or per-vendor factors can be served later.
pub trait ImpactConfigProvider: Send + Sync {
    fn impact_config(&self, vendor_id: Option<&str>) -> ImpactConfig;
}
