use anyhow::Result;
use chrono::Utc;
use shared::{distribute_bags_across_schedule, round_half_up};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::availability::{
    ApplyBagTargetCommand, ApplyBagTargetResult, GetAvailabilityCommand, GetAvailabilityResult,
    UpdateAvailabilityCommand, UpdateAvailabilityResult,
};
use crate::domain::models::availability::{
    validate_schedule, validate_vendor_id, AvailabilityError, VendorAvailability,
};
use crate::storage::AvailabilityStorage;

/// Service for managing vendor weekly availability
#[derive(Clone)]
pub struct AvailabilityService {
    storage: Arc<dyn AvailabilityStorage>,
}

impl AvailabilityService {
    pub fn new(storage: Arc<dyn AvailabilityStorage>) -> Self {
        Self { storage }
    }

    /// Get the stored availability for a vendor
    pub async fn get_availability(
        &self,
        command: GetAvailabilityCommand,
    ) -> Result<GetAvailabilityResult> {
        validate_vendor_id(&command.vendor_id)?;

        let availability = self.storage.get_availability(&command.vendor_id).await?;

        if availability.is_some() {
            info!("Found availability for vendor: {}", command.vendor_id);
        } else {
            info!("No availability found for vendor: {}", command.vendor_id);
        }

        Ok(GetAvailabilityResult { availability })
    }

    /// Create or replace the availability for a vendor
    pub async fn update_availability(
        &self,
        command: UpdateAvailabilityCommand,
    ) -> Result<UpdateAvailabilityResult> {
        info!(
            "Updating availability for vendor {} ({} days, {} active)",
            command.vendor_id,
            command.schedule.len(),
            command.schedule.active_day_count()
        );

        validate_vendor_id(&command.vendor_id)?;
        validate_schedule(&command.schedule)?;

        let existing = self.storage.get_availability(&command.vendor_id).await?;
        let now = Utc::now().to_rfc3339();

        let availability = match existing {
            Some(mut availability) => {
                availability.schedule = command.schedule;
                availability.updated_at = now;
                availability
            }
            None => VendorAvailability {
                vendor_id: command.vendor_id.clone(),
                schedule: command.schedule,
                created_at: now.clone(),
                updated_at: now,
            },
        };

        self.storage.store_availability(&availability).await?;

        Ok(UpdateAvailabilityResult {
            availability,
            success_message: "Availability updated successfully".to_string(),
        })
    }

    /// Replace every active day's quantity with the rounded target and save.
    pub async fn apply_bag_target(
        &self,
        command: ApplyBagTargetCommand,
    ) -> Result<ApplyBagTargetResult> {
        info!(
            "Applying {} bags/day to vendor {}",
            command.total_bags_per_day, command.vendor_id
        );

        validate_vendor_id(&command.vendor_id)?;
        let target = command.total_bags_per_day;
        if !target.is_finite() {
            return Err(AvailabilityError::NonFiniteBags(target).into());
        }
        if target < 0.0 {
            return Err(AvailabilityError::NegativeTarget(target).into());
        }
        if round_half_up(target) > f64::from(u32::MAX) {
            return Err(AvailabilityError::TargetTooLarge(target).into());
        }

        let mut availability = self
            .storage
            .get_availability(&command.vendor_id)
            .await?
            .ok_or_else(|| AvailabilityError::VendorNotFound(command.vendor_id.clone()))?;

        if availability.schedule.active_day_count() == 0 {
            warn!(
                "Vendor {} has no active days; bag target leaves the schedule unchanged",
                command.vendor_id
            );
        }

        let applied_quantity = round_half_up(target) as u32;
        availability.schedule = distribute_bags_across_schedule(&availability.schedule, target);
        availability.updated_at = Utc::now().to_rfc3339();

        self.storage.store_availability(&availability).await?;

        Ok(ApplyBagTargetResult {
            availability,
            applied_quantity,
            success_message: format!("Set {} bags on each active day", applied_quantity),
        })
    }

    /// Delete the availability for a vendor
    pub async fn delete_availability(&self, vendor_id: &str) -> Result<bool> {
        validate_vendor_id(vendor_id)?;

        let deleted = self.storage.delete_availability(vendor_id).await?;
        if deleted {
            info!("Deleted availability for vendor: {}", vendor_id);
        } else {
            warn!("No availability found to delete for vendor: {}", vendor_id);
        }
        Ok(deleted)
    }

    /// List every stored availability
    pub async fn list_availabilities(&self) -> Result<Vec<VendorAvailability>> {
        let availabilities = self.storage.list_availabilities().await?;
        info!("Found {} vendor availabilities", availabilities.len());
        Ok(availabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryAvailabilityRepository;
    use shared::{calculate_base_bags_per_day, DayKey, DaySchedule, WeeklyAvailability};

    fn setup_test() -> AvailabilityService {
        AvailabilityService::new(Arc::new(InMemoryAvailabilityRepository::new()))
    }

    fn three_day_week() -> WeeklyAvailability {
        let mut schedule = WeeklyAvailability::every_day(DaySchedule::closed("17:00", "18:00"));
        schedule.set(DayKey::Mon, DaySchedule::open("17:00", "18:00", 2));
        schedule.set(DayKey::Wed, DaySchedule::open("17:00", "18:00", 5));
        schedule.set(DayKey::Fri, DaySchedule::open("17:00", "18:00", 8));
        schedule
    }

    async fn store_three_day_week(service: &AvailabilityService, vendor_id: &str) {
        service
            .update_availability(UpdateAvailabilityCommand {
                vendor_id: vendor_id.to_string(),
                schedule: three_day_week(),
            })
            .await
            .expect("Failed to store schedule");
    }

    fn availability_error(err: &anyhow::Error) -> &AvailabilityError {
        err.downcast_ref::<AvailabilityError>()
            .expect("expected an AvailabilityError")
    }

    #[tokio::test]
    async fn test_get_availability_not_found() {
        let service = setup_test();
        let result = service
            .get_availability(GetAvailabilityCommand {
                vendor_id: "deli".to_string(),
            })
            .await
            .unwrap();
        assert!(result.availability.is_none());
    }

    #[tokio::test]
    async fn test_update_and_get_availability() {
        let service = setup_test();
        store_three_day_week(&service, "deli").await;

        let result = service
            .get_availability(GetAvailabilityCommand {
                vendor_id: "deli".to_string(),
            })
            .await
            .unwrap();

        let availability = result.availability.unwrap();
        assert_eq!(availability.vendor_id, "deli");
        assert_eq!(availability.schedule, three_day_week());
        assert_eq!(calculate_base_bags_per_day(&availability.schedule), 5.0);
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let service = setup_test();
        store_three_day_week(&service, "deli").await;
        let first = service
            .get_availability(GetAvailabilityCommand {
                vendor_id: "deli".to_string(),
            })
            .await
            .unwrap()
            .availability
            .unwrap();

        let updated = service
            .update_availability(UpdateAvailabilityCommand {
                vendor_id: "deli".to_string(),
                schedule: WeeklyAvailability::every_day(DaySchedule::open("09:00", "10:00", 1)),
            })
            .await
            .unwrap();

        assert_eq!(updated.availability.created_at, first.created_at);
        assert_eq!(updated.availability.schedule.active_day_count(), 7);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_schedule() {
        let service = setup_test();
        let mut schedule = three_day_week();
        schedule.set(DayKey::Tue, DaySchedule::open("18:00", "17:00", 3));

        let err = service
            .update_availability(UpdateAvailabilityCommand {
                vendor_id: "deli".to_string(),
                schedule,
            })
            .await
            .unwrap_err();

        assert_eq!(
            availability_error(&err),
            &AvailabilityError::PickupWindowNotOrdered { day: DayKey::Tue }
        );

        let stored = service.list_availabilities().await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_vendor_id() {
        let service = setup_test();
        let err = service
            .update_availability(UpdateAvailabilityCommand {
                vendor_id: "../deli".to_string(),
                schedule: three_day_week(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            availability_error(&err),
            AvailabilityError::InvalidVendorId(_)
        ));
    }

    #[tokio::test]
    async fn test_apply_bag_target_replicates_rounded_value() {
        let service = setup_test();
        store_three_day_week(&service, "deli").await;

        let result = service
            .apply_bag_target(ApplyBagTargetCommand {
                vendor_id: "deli".to_string(),
                total_bags_per_day: 7.4,
            })
            .await
            .unwrap();

        assert_eq!(result.applied_quantity, 7);
        let schedule = &result.availability.schedule;
        assert_eq!(schedule.get(DayKey::Mon).unwrap().default_quantity, 7);
        assert_eq!(schedule.get(DayKey::Wed).unwrap().default_quantity, 7);
        assert_eq!(schedule.get(DayKey::Fri).unwrap().default_quantity, 7);
        assert_eq!(schedule.get(DayKey::Tue).unwrap().default_quantity, 0);
        assert_eq!(calculate_base_bags_per_day(schedule), 7.0);

        // Persisted, not just returned
        let stored = service
            .get_availability(GetAvailabilityCommand {
                vendor_id: "deli".to_string(),
            })
            .await
            .unwrap()
            .availability
            .unwrap();
        assert_eq!(&stored.schedule, schedule);
    }

    #[tokio::test]
    async fn test_apply_bag_target_unknown_vendor() {
        let service = setup_test();
        let err = service
            .apply_bag_target(ApplyBagTargetCommand {
                vendor_id: "ghost".to_string(),
                total_bags_per_day: 3.0,
            })
            .await
            .unwrap_err();

        assert!(availability_error(&err).is_not_found());
    }

    #[tokio::test]
    async fn test_apply_bag_target_rejects_bad_targets() {
        let service = setup_test();
        store_three_day_week(&service, "deli").await;

        for target in [-1.0, f64::NAN, f64::INFINITY, 1e12, 4_294_967_295.5] {
            let err = service
                .apply_bag_target(ApplyBagTargetCommand {
                    vendor_id: "deli".to_string(),
                    total_bags_per_day: target,
                })
                .await
                .unwrap_err();

            let expected_variant = match availability_error(&err) {
                AvailabilityError::NegativeTarget(_) => target < 0.0,
                AvailabilityError::NonFiniteBags(_) => !target.is_finite(),
                AvailabilityError::TargetTooLarge(_) => target > f64::from(u32::MAX),
                _ => false,
            };
            assert!(expected_variant, "unexpected error for target {}: {}", target, err);
        }

        // Rejected targets leave the stored schedule untouched
        let stored = service
            .get_availability(GetAvailabilityCommand {
                vendor_id: "deli".to_string(),
            })
            .await
            .unwrap()
            .availability
            .unwrap();
        assert_eq!(stored.schedule, three_day_week());
    }

    #[tokio::test]
    async fn test_apply_bag_target_accepts_largest_quantity() {
        let service = setup_test();
        store_three_day_week(&service, "deli").await;

        let result = service
            .apply_bag_target(ApplyBagTargetCommand {
                vendor_id: "deli".to_string(),
                total_bags_per_day: f64::from(u32::MAX),
            })
            .await
            .unwrap();
        assert_eq!(result.applied_quantity, u32::MAX);
    }

    #[tokio::test]
    async fn test_delete_availability() {
        let service = setup_test();
        store_three_day_week(&service, "deli").await;

        assert!(service.delete_availability("deli").await.unwrap());
        assert!(!service.delete_availability("deli").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_availabilities() {
        let service = setup_test();
        store_three_day_week(&service, "b-vendor").await;
        store_three_day_week(&service, "a-vendor").await;

        let listed = service.list_availabilities().await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|a| a.vendor_id.as_str()).collect();
        assert_eq!(ids, vec!["a-vendor", "b-vendor"]);
    }
}
