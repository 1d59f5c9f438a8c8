//! # Impact Formatting
//!
//! Display strings for [`ImpactEstimate`] figures. Output follows en-US
//! conventions: `,` thousands separators and `.` as the decimal point.

use serde::{Deserialize, Serialize};

use crate::impact::{round_half_up, ImpactConfig, ImpactEstimate};

/// Display strings for one estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedImpact {
    pub money_saved_per_year: String,
    pub co2e_avoided_per_year: String,
    pub hours_of_hot_showers: String,
    pub bags_per_year: String,
}

impl FormattedImpact {
    pub fn from_estimate(estimate: &ImpactEstimate, config: &ImpactConfig) -> Self {
        Self {
            money_saved_per_year: format_currency(estimate.money_saved_per_year, &config.currency),
            co2e_avoided_per_year: format_co2e(estimate.co2e_avoided_per_year_kg),
            hours_of_hot_showers: format_hours(estimate.hours_of_hot_showers),
            bags_per_year: format_bags_per_year(estimate.bags_per_year),
        }
    }
}

/// Currency with exactly one decimal place, e.g. `$5,274.3`.
///
/// Magnitudes are grouped through a `u64`, so the whole part saturates at
/// `u64::MAX` (about 1.8e19). NaN and infinities print as `NaN` and `∞`.
pub fn format_currency(value: f64, currency_code: &str) -> String {
    let symbol = currency_symbol(currency_code);

    if !value.is_finite() {
        let text = if value.is_nan() { "NaN" } else { "∞" };
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{}{}", sign, symbol, text);
    }

    let tenths = round_half_up(value.abs() * 10.0);
    let whole = (tenths / 10.0).trunc();
    let decimal = tenths - whole * 10.0;
    let sign = if value < 0.0 && tenths > 0.0 { "-" } else { "" };

    format!(
        "{}{}{}.{}",
        sign,
        symbol,
        group_thousands(whole as u64),
        decimal as u8
    )
}

/// CO2e mass, switching from kilograms to tonnes at 1000 kg
pub fn format_co2e(kg: f64) -> String {
    if kg.is_nan() || kg <= 0.0 {
        return "0 kg of CO2e".to_string();
    }

    if kg >= 1000.0 {
        format!("{} t of CO2e", one_decimal(kg / 1000.0))
    } else {
        format!("{} kg of CO2e", round_half_up(kg))
    }
}

/// Duration in whole hours, or in minutes when under an hour
pub fn format_hours(hours: f64) -> String {
    if hours.is_nan() || hours <= 0.0 {
        return "0 mins".to_string();
    }

    if hours >= 1.0 {
        format!("{} hrs", round_half_up(hours))
    } else {
        format!("{} mins", round_half_up(hours * 60.0))
    }
}

/// Integer with thousands separators, e.g. `1,825`
pub fn format_bags_per_year(bags: i64) -> String {
    let grouped = group_thousands(bags.unsigned_abs());
    if bags < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn currency_symbol(currency_code: &str) -> String {
    let code = currency_code.trim().to_ascii_uppercase();
    let symbol = match code.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        "CAD" => "CA$",
        "NZD" => "NZ$",
        "INR" => "₹",
        "CNY" => "CN¥",
        // Unknown codes print as the code followed by a non-breaking space
        _ => return format!("{}\u{a0}", code),
    };
    symbol.to_string()
}

/// Non-negative value to one decimal, ties rounding up
fn one_decimal(value: f64) -> String {
    let tenths = round_half_up(value * 10.0);
    format!("{:.1}", tenths / 10.0)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
