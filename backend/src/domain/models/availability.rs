//! Domain model for a vendor's stored weekly availability.
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use shared::{DayKey, WeeklyAvailability};

pub const MAX_VENDOR_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorAvailability {
    pub vendor_id: String,
    pub schedule: WeeklyAvailability,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Invalid vendor id '{0}': use 1-64 letters, digits, '-' or '_'")]
    InvalidVendorId(String),
    #[error("No availability found for vendor '{0}'")]
    VendorNotFound(String),
    #[error("Invalid pickup time '{value}' on {day}: expected HH:MM")]
    InvalidPickupTime { day: DayKey, value: String },
    #[error("Pickup window on {day} must start before it ends")]
    PickupWindowNotOrdered { day: DayKey },
    #[error("Bag count must be a finite number, got {0}")]
    NonFiniteBags(f64),
    #[error("Bag target cannot be negative, got {0}")]
    NegativeTarget(f64),
    #[error("Bag target {0} exceeds the largest per-day quantity ({max})", max = u32::MAX)]
    TargetTooLarge(f64),
}

impl AvailabilityError {
    /// Whether the error refers to a missing record rather than bad input
    pub fn is_not_found(&self) -> bool {
        matches!(self, AvailabilityError::VendorNotFound(_))
    }
}

/// Vendor ids double as directory names in file-backed storage
pub fn validate_vendor_id(vendor_id: &str) -> Result<(), AvailabilityError> {
    let valid = !vendor_id.is_empty()
        && vendor_id.len() <= MAX_VENDOR_ID_LEN
        && vendor_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AvailabilityError::InvalidVendorId(vendor_id.to_string()))
    }
}

fn parse_pickup_time(day: DayKey, value: &str) -> Result<NaiveTime, AvailabilityError> {
    if value.len() != 5 {
        return Err(AvailabilityError::InvalidPickupTime {
            day,
            value: value.to_string(),
        });
    }

    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| AvailabilityError::InvalidPickupTime {
        day,
        value: value.to_string(),
    })
}

/// Check every pickup time is "HH:MM"; active days must also have start < end.
pub fn validate_schedule(schedule: &WeeklyAvailability) -> Result<(), AvailabilityError> {
    for (day, record) in schedule {
        let start = parse_pickup_time(*day, &record.pickup_start)?;
        let end = parse_pickup_time(*day, &record.pickup_end)?;

        if record.available && start >= end {
            return Err(AvailabilityError::PickupWindowNotOrdered { day: *day });
        }
    }
    Ok(())
}
