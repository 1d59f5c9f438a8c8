//! # In-Memory Availability Repository
//!
//! Process-local store used for demos and tests. Nothing survives a restart.
//! Optionally seeded with a handful of demo vendors.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use shared::{DayKey, DaySchedule, WeeklyAvailability};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::models::availability::VendorAvailability;
use crate::storage::AvailabilityStorage;

#[derive(Clone, Default)]
pub struct InMemoryAvailabilityRepository {
    records: Arc<RwLock<HashMap<String, VendorAvailability>>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with the demo vendors
    pub fn with_demo_data() -> Self {
        let records = demo_availabilities()
            .into_iter()
            .map(|availability| (availability.vendor_id.clone(), availability))
            .collect();

        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl AvailabilityStorage for InMemoryAvailabilityRepository {
    async fn store_availability(&self, availability: &VendorAvailability) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(availability.vendor_id.clone(), availability.clone());
        debug!("Stored availability for vendor '{}' in memory", availability.vendor_id);
        Ok(())
    }

    async fn get_availability(&self, vendor_id: &str) -> Result<Option<VendorAvailability>> {
        Ok(self.records.read().await.get(vendor_id).cloned())
    }

    async fn delete_availability(&self, vendor_id: &str) -> Result<bool> {
        Ok(self.records.write().await.remove(vendor_id).is_some())
    }

    async fn list_availabilities(&self) -> Result<Vec<VendorAvailability>> {
        let mut availabilities: Vec<VendorAvailability> =
            self.records.read().await.values().cloned().collect();
        availabilities.sort_by(|a, b| a.vendor_id.cmp(&b.vendor_id));
        Ok(availabilities)
    }
}

fn demo_availabilities() -> Vec<VendorAvailability> {
    let now = Utc::now().to_rfc3339();

    let mut bakery = WeeklyAvailability::every_day(DaySchedule::open("17:30", "18:30", 6));
    bakery.set(DayKey::Sun, DaySchedule::closed("17:30", "18:30"));

    let mut grocer = WeeklyAvailability::every_day(DaySchedule::closed("19:00", "20:00"));
    grocer.set(DayKey::Wed, DaySchedule::open("19:00", "20:00", 4));
    grocer.set(DayKey::Fri, DaySchedule::open("19:00", "20:30", 10));
    grocer.set(DayKey::Sat, DaySchedule::open("18:00", "19:00", 7));

    [("corner-bakery", bakery), ("green-grocer", grocer)]
        .into_iter()
        .map(|(vendor_id, schedule)| VendorAvailability {
            vendor_id: vendor_id.to_string(),
            schedule,
            created_at: now.clone(),
            updated_at: now.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::calculate_base_bags_per_day;

    #[tokio::test]
    async fn test_store_get_delete() {
        let repo = InMemoryAvailabilityRepository::new();
        let availability = VendorAvailability {
            vendor_id: "deli".to_string(),
            schedule: WeeklyAvailability::every_day(DaySchedule::open("12:00", "13:00", 2)),
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            updated_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        repo.store_availability(&availability).await.unwrap();
        assert_eq!(repo.get_availability("deli").await.unwrap(), Some(availability));

        assert!(repo.delete_availability("deli").await.unwrap());
        assert!(!repo.delete_availability("deli").await.unwrap());
        assert!(repo.get_availability("deli").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_demo_data_is_listed_in_order() {
        let repo = InMemoryAvailabilityRepository::with_demo_data();
        let listed = repo.list_availabilities().await.unwrap();

        let ids: Vec<&str> = listed.iter().map(|a| a.vendor_id.as_str()).collect();
        assert_eq!(ids, vec!["corner-bakery", "green-grocer"]);
        assert_eq!(calculate_base_bags_per_day(&listed[0].schedule), 6.0);
        assert_eq!(calculate_base_bags_per_day(&listed[1].schedule), 7.0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryAvailabilityRepository::new();
        let clone = repo.clone();
        clone
            .store_availability(&demo_availabilities().remove(0))
            .await
            .unwrap();

        assert!(repo.get_availability("corner-bakery").await.unwrap().is_some());
    }
}
