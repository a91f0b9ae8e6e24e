//! Normalization of the service's goods responses into one canonical model.
//!
//! The goods endpoints answer in one of several shapes depending on the
//! deployment: a paginated `{items, total}` object, a `{goods, _pagination}`
//! envelope, or a bare array. Classification is an explicit step returning a
//! [`GoodsShape`] tag so the handling is exhaustive rather than a cascade of
//! structural guesses; every shape lands in the same [`GoodsPage`].

use serde_json::Value;

use lavka_core::pricing::effective_price;

/// The recognized wire shapes of a goods-list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodsShape {
    /// `{"items": [...], "total": n}`
    Paginated,
    /// `{"goods": [...], "_pagination": {...}}`
    Enveloped,
    /// A bare top-level array of records.
    Bare,
    /// Anything else; normalizes to an empty page.
    Unrecognized,
}

/// A catalog item normalized from one raw goods record.
///
/// `raw` retains the record exactly as the server sent it, for consumers
/// that need unnormalized fields — e.g. the struck-through original price
/// next to a discounted one.
#[derive(Debug, Clone)]
pub struct Good {
    pub id: i64,
    pub title: String,
    /// Effective unit price; always finite and non-negative.
    pub price: f64,
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub raw: Value,
}

impl Good {
    #[must_use]
    pub fn actual_price(&self) -> Option<f64> {
        self.raw.get("actual_price").and_then(coerce_number)
    }

    #[must_use]
    pub fn discount_price(&self) -> Option<f64> {
        self.raw.get("discount_price").and_then(coerce_number)
    }

    /// True when a positive discount price undercuts the actual price.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        match (self.discount_price(), self.actual_price()) {
            (Some(d), Some(a)) => d > 0.0 && d < a,
            _ => false,
        }
    }
}

/// A normalized goods-list response.
#[derive(Debug, Clone)]
pub struct GoodsPage {
    pub items: Vec<Good>,
    /// Total number of matching goods on the server, not just in this page.
    pub total: u64,
}

/// Classifies a raw goods-list response body.
#[must_use]
pub fn classify(value: &Value) -> GoodsShape {
    if value.is_array() {
        return GoodsShape::Bare;
    }
    if value.get("items").is_some_and(Value::is_array) {
        return GoodsShape::Paginated;
    }
    if value.get("goods").is_some_and(Value::is_array) {
        return GoodsShape::Enveloped;
    }
    GoodsShape::Unrecognized
}

/// Normalizes any goods-list response into a [`GoodsPage`].
///
/// Unrecognized shapes produce an empty page rather than an error; list
/// rendering fails safe.
#[must_use]
pub fn normalize_goods_response(value: &Value) -> GoodsPage {
    match classify(value) {
        GoodsShape::Paginated => {
            let records = array_field(value, "items");
            let total = positive_count(value.get("total"));
            build_page(records, total)
        }
        GoodsShape::Enveloped => {
            let records = array_field(value, "goods");
            let total = pagination_total(value);
            build_page(records, total)
        }
        GoodsShape::Bare => {
            let records = value.as_array().map(Vec::as_slice).unwrap_or_default();
            build_page(records, None)
        }
        GoodsShape::Unrecognized => GoodsPage {
            items: Vec::new(),
            total: 0,
        },
    }
}

/// Normalizes one raw goods record.
///
/// Returns `None` (with a warning) for records lacking a numeric `id`;
/// callers skip those rather than failing the whole response.
#[must_use]
pub fn normalize_good(record: &Value) -> Option<Good> {
    let Some(id) = record.get("id").and_then(Value::as_i64) else {
        tracing::warn!(record = %record, "skipping goods record without a numeric id");
        return None;
    };

    let discount = record.get("discount_price").and_then(coerce_number);
    let actual = record.get("actual_price").and_then(coerce_number);

    Some(Good {
        id,
        title: str_field(record, &["name", "title"]),
        price: effective_price(discount, actual),
        image: str_field(record, &["image", "image_url"]),
        category: str_field(record, &["main_category", "category"]),
        rating: record
            .get("rating")
            .and_then(coerce_number)
            .unwrap_or(0.0),
        raw: record.clone(),
    })
}

fn build_page(records: &[Value], total: Option<u64>) -> GoodsPage {
    let items = records.iter().filter_map(normalize_good).collect();
    GoodsPage {
        items,
        total: total.unwrap_or(records.len() as u64),
    }
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Total count from the `_pagination` envelope, trying the known key names
/// in priority order.
fn pagination_total(value: &Value) -> Option<u64> {
    let pagination = value.get("_pagination")?;
    ["total_count", "total", "count"]
        .iter()
        .find_map(|key| positive_count(pagination.get(key)))
}

/// A count candidate is only usable when it coerces to a positive number;
/// zero and junk fall through to the next candidate (or the array length).
fn positive_count(value: Option<&Value>) -> Option<u64> {
    let n = value.and_then(coerce_number)?;
    if n > 0.0 {
        Some(n as u64)
    } else {
        None
    }
}

/// Coerces a JSON value to a finite number: numbers pass through, numeric
/// strings are parsed, everything else is `None`.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// First non-empty string among the given keys, else empty.
fn str_field(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: i64, actual: f64, discount: f64) -> Value {
        json!({
            "id": id,
            "name": format!("good {id}"),
            "actual_price": actual,
            "discount_price": discount,
            "image": "https://shop.example/img.jpg",
            "main_category": "tea",
            "rating": 4.5
        })
    }

    #[test]
    fn classify_recognizes_all_shapes() {
        assert_eq!(classify(&json!([])), GoodsShape::Bare);
        assert_eq!(classify(&json!({"items": []})), GoodsShape::Paginated);
        assert_eq!(
            classify(&json!({"goods": [], "_pagination": {}})),
            GoodsShape::Enveloped
        );
        assert_eq!(classify(&json!({"data": []})), GoodsShape::Unrecognized);
        assert_eq!(classify(&json!({"items": "nope"})), GoodsShape::Unrecognized);
    }

    #[test]
    fn paginated_shape_uses_explicit_total() {
        let body = json!({
            "items": (1..=5).map(|i| record(i, 100.0, 0.0)).collect::<Vec<_>>(),
            "total": 12
        });
        let page = normalize_goods_response(&body);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn paginated_shape_falls_back_to_length() {
        let body = json!({"items": [record(1, 10.0, 0.0), record(2, 20.0, 0.0)]});
        assert_eq!(normalize_goods_response(&body).total, 2);

        // A zero total is not trusted either.
        let body = json!({"items": [record(1, 10.0, 0.0)], "total": 0});
        assert_eq!(normalize_goods_response(&body).total, 1);

        let body = json!({"items": [record(1, 10.0, 0.0)], "total": "many"});
        assert_eq!(normalize_goods_response(&body).total, 1);
    }

    #[test]
    fn enveloped_shape_reads_pagination_keys_in_priority_order() {
        let body = json!({
            "goods": [record(1, 10.0, 0.0)],
            "_pagination": {"total_count": 9, "total": 4, "count": 2}
        });
        assert_eq!(normalize_goods_response(&body).total, 9);

        let body = json!({
            "goods": [record(1, 10.0, 0.0)],
            "_pagination": {"total": 4, "count": 2}
        });
        assert_eq!(normalize_goods_response(&body).total, 4);

        let body = json!({
            "goods": [record(1, 10.0, 0.0)],
            "_pagination": {"count": 2}
        });
        assert_eq!(normalize_goods_response(&body).total, 2);

        let body = json!({"goods": [record(1, 10.0, 0.0)], "_pagination": {}});
        assert_eq!(normalize_goods_response(&body).total, 1);
    }

    #[test]
    fn bare_array_total_is_its_length() {
        let body = json!([record(1, 10.0, 0.0), record(2, 20.0, 0.0), record(3, 30.0, 0.0)]);
        let page = normalize_goods_response(&body);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn unrecognized_shape_is_empty() {
        let page = normalize_goods_response(&json!({}));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        let page = normalize_goods_response(&json!("oops"));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn good_price_uses_the_discount_tie_break() {
        let good = normalize_good(&record(1, 100.0, 80.0)).unwrap();
        assert_eq!(good.price, 80.0);
        assert!(good.has_discount());

        let good = normalize_good(&record(2, 100.0, 0.0)).unwrap();
        assert_eq!(good.price, 100.0);
        assert!(!good.has_discount());
    }

    #[test]
    fn good_title_falls_back_from_name_to_title() {
        let good = normalize_good(&json!({"id": 1, "title": "fallback"})).unwrap();
        assert_eq!(good.title, "fallback");

        let good = normalize_good(&json!({"id": 1, "name": "primary", "title": "fallback"})).unwrap();
        assert_eq!(good.title, "primary");
    }

    #[test]
    fn good_image_and_category_fall_back() {
        let good =
            normalize_good(&json!({"id": 1, "image_url": "u", "category": "c"})).unwrap();
        assert_eq!(good.image, "u");
        assert_eq!(good.category, "c");
    }

    #[test]
    fn good_rating_defaults_to_zero() {
        let good = normalize_good(&json!({"id": 1})).unwrap();
        assert_eq!(good.rating, 0.0);

        let good = normalize_good(&json!({"id": 1, "rating": "4.2"})).unwrap();
        assert_eq!(good.rating, 4.2);
    }

    #[test]
    fn record_without_numeric_id_is_skipped() {
        assert!(normalize_good(&json!({"name": "no id"})).is_none());
        assert!(normalize_good(&json!({"id": "seven"})).is_none());

        let body = json!({"items": [record(1, 10.0, 0.0), json!({"name": "no id"})], "total": 2});
        let page = normalize_goods_response(&body);
        assert_eq!(page.items.len(), 1);
        // The reported total still reflects what the server claimed.
        assert_eq!(page.total, 2);
    }

    #[test]
    fn raw_record_is_retained() {
        let good = normalize_good(&record(7, 150.0, 120.0)).unwrap();
        assert_eq!(good.raw["actual_price"], json!(150.0));
        assert_eq!(good.actual_price(), Some(150.0));
        assert_eq!(good.discount_price(), Some(120.0));
    }
}
