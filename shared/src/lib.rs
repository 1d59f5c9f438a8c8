pub mod format;
pub mod impact;
pub mod schedule;

use serde::{Deserialize, Serialize};

pub use format::{
    format_bags_per_year, format_co2e, format_currency, format_hours, FormattedImpact,
};
pub use impact::{calculate_impact, round_half_up, ImpactConfig, ImpactEstimate, DAYS_PER_YEAR};
pub use schedule::{
    calculate_base_bags_per_day, distribute_bags_across_schedule, DayKey, DayKeyParseError,
    DaySchedule, WeeklyAvailability,
};

/// A vendor's stored weekly availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorAvailability {
    pub vendor_id: String,
    pub schedule: WeeklyAvailability,
    /// Mean bags/day over the active days
    pub base_bags_per_day: f64,
    pub created_at: String, // RFC 3339
    pub updated_at: String, // RFC 3339
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityListResponse {
    pub availabilities: Vec<VendorAvailability>,
}

/// Create or replace a vendor's weekly availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub schedule: WeeklyAvailability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAvailabilityResponse {
    pub availability: VendorAvailability,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAvailabilityResponse {
    pub deleted: bool,
}

/// Write a bags/day target back onto every active day of the stored schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyBagTargetRequest {
    pub total_bags_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyBagTargetResponse {
    pub availability: VendorAvailability,
    /// Quantity written onto each active day
    pub applied_quantity: u32,
    pub success_message: String,
}

/// Query for the stored-schedule impact endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactQuery {
    pub extra_bags_per_day: Option<f64>,
}

/// Impact for a schedule that has not been saved yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactPreviewRequest {
    pub vendor_id: Option<String>,
    pub schedule: WeeklyAvailability,
    #[serde(default)]
    pub extra_bags_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImpactConfigQuery {
    pub vendor_id: Option<String>,
}

/// Impact estimate together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub config: ImpactConfig,
    pub base_bags_per_day: f64,
    /// Extra bags/day after clamping to the slider range
    pub extra_bags_per_day: f64,
    pub estimate: ImpactEstimate,
    pub formatted: FormattedImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
