use anyhow::Result;
use shared::{
    calculate_base_bags_per_day, calculate_impact, FormattedImpact, ImpactConfig,
    WeeklyAvailability,
};
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::availability::GetAvailabilityCommand;
use crate::domain::commands::impact::{ImpactPreviewCommand, ImpactResult, VendorImpactQuery};
use crate::domain::models::availability::{validate_vendor_id, AvailabilityError};
use crate::domain::AvailabilityService;
use crate::storage::ImpactConfigProvider;

/// Service that turns vendor schedules into impact estimates
#[derive(Clone)]
pub struct ImpactService {
    availability_service: AvailabilityService,
    config_provider: Arc<dyn ImpactConfigProvider>,
}

impl ImpactService {
    pub fn new(
        availability_service: AvailabilityService,
        config_provider: Arc<dyn ImpactConfigProvider>,
    ) -> Self {
        Self {
            availability_service,
            config_provider,
        }
    }

    /// Effective impact configuration for a vendor (or the default when `None`)
    pub fn impact_config(&self, vendor_id: Option<&str>) -> Result<ImpactConfig> {
        if let Some(id) = vendor_id {
            validate_vendor_id(id)?;
        }
        Ok(self.config_provider.impact_config(vendor_id))
    }

    /// Impact of a vendor's stored schedule. A vendor without a stored
    /// schedule is treated as having no active days.
    pub async fn estimate_for_vendor(&self, query: VendorImpactQuery) -> Result<ImpactResult> {
        let extra = query.extra_bags_per_day.unwrap_or(0.0);
        ensure_finite(extra)?;

        let stored = self
            .availability_service
            .get_availability(GetAvailabilityCommand {
                vendor_id: query.vendor_id.clone(),
            })
            .await?
            .availability;

        let schedule = match stored {
            Some(availability) => availability.schedule,
            None => {
                info!(
                    "Vendor {} has no stored schedule; estimating from an empty week",
                    query.vendor_id
                );
                WeeklyAvailability::new()
            }
        };

        let config = self.config_provider.impact_config(Some(&query.vendor_id));
        let result = summarize(&schedule, extra, config);

        info!(
            "Impact for vendor {}: {} bags/day -> {} bags/year",
            query.vendor_id, result.estimate.total_bags_per_day, result.estimate.bags_per_year
        );
        Ok(result)
    }

    /// Impact of a schedule that has not been stored
    pub fn preview(&self, command: ImpactPreviewCommand) -> Result<ImpactResult> {
        ensure_finite(command.extra_bags_per_day)?;
        let config = self.impact_config(command.vendor_id.as_deref())?;
        Ok(summarize(&command.schedule, command.extra_bags_per_day, config))
    }
}

fn ensure_finite(value: f64) -> Result<(), AvailabilityError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AvailabilityError::NonFiniteBags(value))
    }
}

/// Aggregate, clamp the slider delta, estimate and format.
fn summarize(schedule: &WeeklyAvailability, extra: f64, config: ImpactConfig) -> ImpactResult {
    let base_bags_per_day = calculate_base_bags_per_day(schedule);
    let extra_bags_per_day = config.clamp_extra_bags(extra);
    let estimate = calculate_impact(base_bags_per_day, extra_bags_per_day, &config);
    let formatted = FormattedImpact::from_estimate(&estimate, &config);

    ImpactResult {
        config,
        base_bags_per_day,
        extra_bags_per_day,
        estimate,
        formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::availability::UpdateAvailabilityCommand;
    use crate::storage::{InMemoryAvailabilityRepository, StaticImpactConfigProvider};
    use shared::{DayKey, DaySchedule};

    fn setup_test() -> ImpactService {
        let availability_service =
            AvailabilityService::new(Arc::new(InMemoryAvailabilityRepository::new()));
        ImpactService::new(
            availability_service,
            Arc::new(StaticImpactConfigProvider::default()),
        )
    }

    fn five_bag_weekdays() -> WeeklyAvailability {
        let mut schedule = WeeklyAvailability::every_day(DaySchedule::open("17:00", "18:00", 5));
        schedule.set(
            DayKey::Sun,
            DaySchedule {
                default_quantity: 500,
                ..DaySchedule::closed("17:00", "18:00")
            },
        );
        schedule
    }

    #[tokio::test]
    async fn test_estimate_for_stored_schedule() {
        let service = setup_test();
        service
            .availability_service
            .update_availability(UpdateAvailabilityCommand {
                vendor_id: "deli".to_string(),
                schedule: five_bag_weekdays(),
            })
            .await
            .unwrap();

        let result = service
            .estimate_for_vendor(VendorImpactQuery {
                vendor_id: "deli".to_string(),
                extra_bags_per_day: None,
            })
            .await
            .unwrap();

        assert_eq!(result.base_bags_per_day, 5.0);
        assert_eq!(result.extra_bags_per_day, 0.0);
        assert_eq!(result.estimate.bags_per_year, 1825);
        assert_eq!(result.formatted.money_saved_per_year, "$5,274.3");
        assert_eq!(result.formatted.co2e_avoided_per_year, "4.9 t of CO2e");
        assert_eq!(result.formatted.bags_per_year, "1,825");
    }

    #[tokio::test]
    async fn test_estimate_without_schedule_is_zero() {
        let service = setup_test();
        let result = service
            .estimate_for_vendor(VendorImpactQuery {
                vendor_id: "new-vendor".to_string(),
                extra_bags_per_day: None,
            })
            .await
            .unwrap();

        assert_eq!(result.base_bags_per_day, 0.0);
        assert_eq!(result.estimate.bags_per_year, 0);
        assert_eq!(result.formatted.co2e_avoided_per_year, "0 kg of CO2e");
        assert_eq!(result.formatted.hours_of_hot_showers, "0 mins");
    }

    #[tokio::test]
    async fn test_extra_bags_clamped_to_slider_range() {
        let service = setup_test();

        let high = service
            .estimate_for_vendor(VendorImpactQuery {
                vendor_id: "deli".to_string(),
                extra_bags_per_day: Some(500.0),
            })
            .await
            .unwrap();
        assert_eq!(high.extra_bags_per_day, 20.0);
        assert_eq!(high.estimate.total_bags_per_day, 20.0);

        let low = service
            .estimate_for_vendor(VendorImpactQuery {
                vendor_id: "deli".to_string(),
                extra_bags_per_day: Some(-500.0),
            })
            .await
            .unwrap();
        assert_eq!(low.extra_bags_per_day, -5.0);
        // Negative totals are passed through to the estimate
        assert_eq!(low.estimate.bags_per_year, -1825);
    }

    #[tokio::test]
    async fn test_non_finite_extra_is_rejected() {
        let service = setup_test();
        let err = service
            .estimate_for_vendor(VendorImpactQuery {
                vendor_id: "deli".to_string(),
                extra_bags_per_day: Some(f64::NAN),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AvailabilityError>(),
            Some(AvailabilityError::NonFiniteBags(_))
        ));
    }

    #[test]
    fn test_preview_uses_supplied_schedule() {
        let service = setup_test();
        let result = service
            .preview(ImpactPreviewCommand {
                vendor_id: None,
                schedule: five_bag_weekdays(),
                extra_bags_per_day: 1.0,
            })
            .unwrap();

        assert_eq!(result.base_bags_per_day, 5.0);
        assert_eq!(result.estimate.total_bags_per_day, 6.0);
        assert_eq!(result.estimate.bags_per_year, 2190);
    }

    #[test]
    fn test_preview_rejects_invalid_vendor_id() {
        let service = setup_test();
        let result = service.preview(ImpactPreviewCommand {
            vendor_id: Some("not valid".to_string()),
            schedule: WeeklyAvailability::new(),
            extra_bags_per_day: 0.0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_impact_config_is_default_constant() {
        let service = setup_test();
        assert_eq!(service.impact_config(None).unwrap(), ImpactConfig::default());
        assert_eq!(
            service.impact_config(Some("deli")).unwrap(),
            ImpactConfig::default()
        );
    }
}
