//! Delivery-cost business rules.
//!
//! Cost depends on the delivery date and the chosen time window: weekends
//! carry a flat surcharge, weekday evening windows a smaller one. The weekend
//! check takes precedence over the evening check.

use chrono::{Datelike, NaiveDate, Weekday};

/// Base delivery cost in rubles.
pub const BASE_COST: f64 = 200.0;
/// Added on top of [`BASE_COST`] for Saturday/Sunday deliveries.
pub const WEEKEND_SURCHARGE: f64 = 300.0;
/// Added on top of [`BASE_COST`] for weekday windows starting at or after
/// [`EVENING_START_HOUR`].
pub const EVENING_SURCHARGE: f64 = 200.0;
/// First hour counted as an evening delivery window.
pub const EVENING_START_HOUR: u32 = 18;

/// Parses the starting hour from a delivery interval such as `"18:00-22:00"`.
///
/// Only a strict leading `HH:MM` prefix counts; anything else returns `None`.
#[must_use]
pub fn interval_start_hour(interval: &str) -> Option<u32> {
    let bytes = interval.as_bytes();
    if bytes.len() < 5 {
        return None;
    }
    let leading_hhmm = bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit();
    if !leading_hhmm {
        return None;
    }
    interval[0..2].parse().ok()
}

/// Computes the delivery cost for a date and interval.
///
/// Returns 0 when no date has been chosen yet. A malformed interval (no
/// leading `HH:MM`) simply means no evening surcharge applies.
#[must_use]
pub fn delivery_cost(date: Option<NaiveDate>, interval: &str) -> f64 {
    let Some(date) = date else {
        return 0.0;
    };

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return BASE_COST + WEEKEND_SURCHARGE;
    }

    match interval_start_hour(interval) {
        Some(hour) if hour >= EVENING_START_HOUR => BASE_COST + EVENING_SURCHARGE,
        _ => BASE_COST,
    }
}
