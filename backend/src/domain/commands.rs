//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod availability {
    use crate::domain::models::availability::VendorAvailability;
    use shared::WeeklyAvailability;

    #[derive(Debug, Clone)]
    pub struct GetAvailabilityCommand {
        pub vendor_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct GetAvailabilityResult {
        pub availability: Option<VendorAvailability>,
    }

    /// Create or replace a vendor's schedule.
    #[derive(Debug, Clone)]
    pub struct UpdateAvailabilityCommand {
        pub vendor_id: String,
        pub schedule: WeeklyAvailability,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateAvailabilityResult {
        pub availability: VendorAvailability,
        pub success_message: String,
    }

    /// Write one bags/day figure onto every active day of the stored schedule.
    #[derive(Debug, Clone)]
    pub struct ApplyBagTargetCommand {
        pub vendor_id: String,
        pub total_bags_per_day: f64,
    }

    #[derive(Debug, Clone)]
    pub struct ApplyBagTargetResult {
        pub availability: VendorAvailability,
        pub applied_quantity: u32,
        pub success_message: String,
    }
}

pub mod impact {
    use shared::{FormattedImpact, ImpactConfig, ImpactEstimate, WeeklyAvailability};

    /// Impact of a vendor's stored schedule.
    #[derive(Debug, Clone)]
    pub struct VendorImpactQuery {
        pub vendor_id: String,
        pub extra_bags_per_day: Option<f64>,
    }

    /// Impact of a schedule supplied by the caller.
    #[derive(Debug, Clone)]
    pub struct ImpactPreviewCommand {
        pub vendor_id: Option<String>,
        pub schedule: WeeklyAvailability,
        pub extra_bags_per_day: f64,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct ImpactResult {
        pub config: ImpactConfig,
        pub base_bags_per_day: f64,
        /// After clamping to the slider range
        pub extra_bags_per_day: f64,
        pub estimate: ImpactEstimate,
        pub formatted: FormattedImpact,
    }
}
