//! # Impact Estimate
//!
//! Yearly money, CO2e and "hot shower" projections derived from a daily bag
//! rate. Everything here is pure arithmetic over an [`ImpactConfig`].

use serde::{Deserialize, Serialize};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Per-bag conversion factors and slider bounds.
///
/// Built once at start-up and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub money_saved_per_bag: f64,
    pub co2e_saved_per_bag_kg: f64,
    pub hours_of_showers_per_kg_co2e: f64,
    /// Lowest extra bags/day the slider offers (may be negative)
    pub slider_min: i32,
    pub slider_max: i32,
    /// ISO 4217 code
    pub currency: String,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            money_saved_per_bag: 2.89,
            co2e_saved_per_bag_kg: 2.7,
            hours_of_showers_per_kg_co2e: 2.5,
            slider_min: -5,
            slider_max: 20,
            currency: "USD".to_string(),
        }
    }
}

impl ImpactConfig {
    /// Bound an extra bags/day value to the slider range.
    ///
    /// [`calculate_impact`] never clamps; callers driving it from a slider do.
    pub fn clamp_extra_bags(&self, extra_bags_per_day: f64) -> f64 {
        extra_bags_per_day.clamp(f64::from(self.slider_min), f64::from(self.slider_max))
    }
}

/// Yearly projection for one daily bag rate.
///
/// The float fields carry NaN and infinities straight through from the input.
/// `bags_per_year` is an integer count and cannot: a NaN total reads as 0 and
/// infinite totals saturate to `i64::MIN`/`i64::MAX`. Check
/// `total_bags_per_day.is_finite()` before trusting the count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub total_bags_per_day: f64,
    /// Rounded yearly count; only meaningful for a finite total
    pub bags_per_year: i64,
    pub money_saved_per_year: f64,
    pub co2e_avoided_per_year_kg: f64,
    pub hours_of_hot_showers: f64,
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`. NaN stays NaN.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Project yearly impact for `base + extra` bags per day.
///
/// Bags per year are rounded once, and money and CO2e are computed from that
/// rounded count. Shower hours derive from the CO2e figure. Negative totals
/// produce negative projections; nothing is clamped.
pub fn calculate_impact(
    base_bags_per_day: f64,
    extra_bags_per_day: f64,
    config: &ImpactConfig,
) -> ImpactEstimate {
    let total_bags_per_day = base_bags_per_day + extra_bags_per_day;
    let bags_per_year = round_half_up(total_bags_per_day * DAYS_PER_YEAR);

    let money_saved_per_year = bags_per_year * config.money_saved_per_bag;
    let co2e_avoided_per_year_kg = bags_per_year * config.co2e_saved_per_bag_kg;
    let hours_of_hot_showers = co2e_avoided_per_year_kg * config.hours_of_showers_per_kg_co2e;

    ImpactEstimate {
        total_bags_per_day,
        bags_per_year: bags_per_year as i64,
        money_saved_per_year,
        co2e_avoided_per_year_kg,
        hours_of_hot_showers,
    }
}
