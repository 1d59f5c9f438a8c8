//! # Weekly Schedule
//!
//! A vendor's recurring weekly availability, plus the two operations that move
//! between a schedule and a single "bags per day" figure:
//!
//! - [`calculate_base_bags_per_day`] reduces a schedule to the mean quantity of
//!   its active days.
//! - [`distribute_bags_across_schedule`] writes one rounded quantity back onto
//!   every active day.
//!
//! Aggregating after distributing returns the rounded target exactly.
//! Distributing after aggregating loses any per-day variation.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::impact::round_half_up;

/// Day of the week, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    /// Short key used in storage and on the wire ("mon", "tue", ...)
    pub fn key(&self) -> &'static str {
        match self {
            DayKey::Mon => "mon",
            DayKey::Tue => "tue",
            DayKey::Wed => "wed",
            DayKey::Thu => "thu",
            DayKey::Fri => "fri",
            DayKey::Sat => "sat",
            DayKey::Sun => "sun",
        }
    }

    /// Human-readable day name
    pub fn label(&self) -> &'static str {
        match self {
            DayKey::Mon => "Monday",
            DayKey::Tue => "Tuesday",
            DayKey::Wed => "Wednesday",
            DayKey::Thu => "Thursday",
            DayKey::Fri => "Friday",
            DayKey::Sat => "Saturday",
            DayKey::Sun => "Sunday",
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayKeyParseError(pub String);

impl fmt::Display for DayKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown day key '{}'. Expected one of mon..sun", self.0)
    }
}

impl std::error::Error for DayKeyParseError {}

impl FromStr for DayKey {
    type Err = DayKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DayKey::ALL
            .iter()
            .copied()
            .find(|day| day.key() == lowered)
            .ok_or_else(|| DayKeyParseError(s.to_string()))
    }
}

/// Pickup window and default bag quantity for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub available: bool,
    /// Time of day, "HH:MM"
    pub pickup_start: String,
    /// Time of day, "HH:MM"
    pub pickup_end: String,
    /// Conventionally 0 when `available` is false, but not enforced
    pub default_quantity: u32,
}

impl DaySchedule {
    pub fn open(pickup_start: &str, pickup_end: &str, default_quantity: u32) -> Self {
        Self {
            available: true,
            pickup_start: pickup_start.to_string(),
            pickup_end: pickup_end.to_string(),
            default_quantity,
        }
    }

    pub fn closed(pickup_start: &str, pickup_end: &str) -> Self {
        Self {
            available: false,
            pickup_start: pickup_start.to_string(),
            pickup_end: pickup_end.to_string(),
            default_quantity: 0,
        }
    }
}

/// Weekly availability keyed by day. Absent days read as unavailable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability(BTreeMap<DayKey, DaySchedule>);

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a schedule with the same record on all seven days
    pub fn every_day(template: DaySchedule) -> Self {
        DayKey::ALL
            .iter()
            .map(|day| (*day, template.clone()))
            .collect()
    }

    pub fn get(&self, day: DayKey) -> Option<&DaySchedule> {
        self.0.get(&day)
    }

    /// Insert or replace the record for a day
    pub fn set(&mut self, day: DayKey, schedule: DaySchedule) -> Option<DaySchedule> {
        self.0.insert(day, schedule)
    }

    pub fn is_available(&self, day: DayKey) -> bool {
        self.0.get(&day).map(|d| d.available).unwrap_or(false)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, DayKey, DaySchedule> {
        self.0.iter()
    }

    /// Days with `available = true`, Monday first
    pub fn active_days(&self) -> impl Iterator<Item = (&DayKey, &DaySchedule)> {
        self.0.iter().filter(|(_, schedule)| schedule.available)
    }

    pub fn active_day_count(&self) -> usize {
        self.active_days().count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DayKey, DaySchedule)> for WeeklyAvailability {
    fn from_iter<T: IntoIterator<Item = (DayKey, DaySchedule)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WeeklyAvailability {
    type Item = (&'a DayKey, &'a DaySchedule);
    type IntoIter = btree_map::Iter<'a, DayKey, DaySchedule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Mean `default_quantity` over the active days, or exactly 0 when none are active.
///
/// Inactive days are excluded from both sum and count; their quantity is never read.
pub fn calculate_base_bags_per_day(schedule: &WeeklyAvailability) -> f64 {
    let (total, active) = schedule
        .active_days()
        .fold((0.0_f64, 0_u32), |(total, active), (_, day)| {
            (total + f64::from(day.default_quantity), active + 1)
        });

    if active == 0 {
        0.0
    } else {
        total / f64::from(active)
    }
}

/// Copy of `schedule` with every active day set to `round(total_bags_per_day)`.
///
/// The rounded value is replicated onto each active day, not divided between
/// them. Inactive days are untouched and a schedule with no active days comes
/// back unchanged. Targets that round below zero, or are NaN, write 0; targets
/// above `u32::MAX` write `u32::MAX`. Callers wanting those rejected must check
/// before calling.
pub fn distribute_bags_across_schedule(
    schedule: &WeeklyAvailability,
    total_bags_per_day: f64,
) -> WeeklyAvailability {
    if schedule.active_day_count() == 0 {
        return schedule.clone();
    }

    // `as` saturates at both ends; NaN becomes 0
    let quantity = round_half_up(total_bags_per_day) as u32;

    schedule
        .iter()
        .map(|(day, record)| {
            let mut record = record.clone();
            if record.available {
                record.default_quantity = quantity;
            }
            (*day, record)
        })
        .collect()
}
