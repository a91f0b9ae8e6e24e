//! Effective-price selection and money formatting.
//!
//! The goods API exposes two competing price fields, `actual_price` and
//! `discount_price`, either of which may be absent or junk. Everything that
//! shows or sums money goes through [`effective_price`] so the whole client
//! agrees on which one wins.

/// Picks the effective unit price from the two raw price fields.
///
/// The tie-break is: a positive discount price that undercuts a present
/// actual price wins; a positive discount price with no actual price at all
/// wins; otherwise the actual price is used when present; otherwise 0.
///
/// Callers pass `None` for fields that are absent or not finite numbers.
/// The result is always finite and non-negative.
#[must_use]
pub fn effective_price(discount: Option<f64>, actual: Option<f64>) -> f64 {
    let discount = discount.filter(|d| d.is_finite() && *d > 0.0);
    let actual = actual.filter(|a| a.is_finite());

    let price = match (discount, actual) {
        (Some(d), Some(a)) => {
            if d < a {
                d
            } else {
                a
            }
        }
        (Some(d), None) => d,
        (None, Some(a)) => a,
        (None, None) => 0.0,
    };
    price.max(0.0)
}

/// Formats a price for display, rounded to whole rubles.
///
/// Non-finite input renders as `"0 ₽"`.
#[must_use]
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "0 ₽".to_string();
    }
    format!("{} ₽", value.round() as i64)
}
