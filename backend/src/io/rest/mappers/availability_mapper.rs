//! Mappers for converting between availability domain models and shared DTOs.

use crate::domain::models::availability::VendorAvailability as DomainVendorAvailability;
use shared::{calculate_base_bags_per_day, VendorAvailability as SharedVendorAvailability};

pub struct AvailabilityMapper;

impl AvailabilityMapper {
    pub fn to_dto(domain: DomainVendorAvailability) -> SharedVendorAvailability {
        let base_bags_per_day = calculate_base_bags_per_day(&domain.schedule);
        SharedVendorAvailability {
            vendor_id: domain.vendor_id,
            schedule: domain.schedule,
            base_bags_per_day,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
