//! Order wire types.
//!
//! Orders come back from the API with their line items in one of two forms:
//! embedded goods sub-objects, or a flat list of good identifiers where a
//! repeated identifier means quantity. [`Order::line_source`] makes that
//! distinction an explicit tagged value instead of ad hoc field sniffing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An order as returned by the API.
///
/// Fields other than `id` default when absent; different deployments omit
/// different subsets and a missing optional field must not fail the whole
/// orders listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub delivery_date: String,
    /// Time window encoded as a string, e.g. `"18:00-22:00"`.
    #[serde(default)]
    pub delivery_interval: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Newsletter opt-in as 0/1.
    #[serde(default)]
    pub subscribe: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Authoritative total when present and non-zero.
    #[serde(default)]
    pub total_sum: Option<f64>,
    /// Embedded goods sub-objects, when the server expands line items.
    #[serde(default)]
    pub goods: Option<Vec<Value>>,
    /// Flat good identifiers; repeats encode quantity.
    #[serde(default)]
    pub good_ids: Option<Vec<i64>>,
}

/// The line-item source carried by an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSource<'a> {
    /// Goods already embedded in the order, optionally with a `quantity`.
    Embedded(&'a [Value]),
    /// Bare identifiers needing secondary fetches; repeats mean quantity.
    Ids(&'a [i64]),
    /// The order carries no line items at all.
    Empty,
}

impl Order {
    /// Classifies which line-item source this order carries.
    ///
    /// Embedded goods win over an identifier list when both are present.
    #[must_use]
    pub fn line_source(&self) -> LineSource<'_> {
        if let Some(goods) = self.goods.as_deref() {
            if !goods.is_empty() {
                return LineSource::Embedded(goods);
            }
        }
        if let Some(ids) = self.good_ids.as_deref() {
            if !ids.is_empty() {
                return LineSource::Ids(ids);
            }
        }
        LineSource::Empty
    }

    /// Number of line items, computable for either source.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self.line_source() {
            LineSource::Embedded(goods) => goods.len(),
            LineSource::Ids(ids) => ids.len(),
            LineSource::Empty => 0,
        }
    }

    /// The authoritative total, when the server supplied a non-zero one.
    #[must_use]
    pub fn authoritative_total(&self) -> Option<f64> {
        self.total_sum.filter(|t| *t > 0.0)
    }
}

/// Payload for creating an order.
///
/// `delivery_date` is in the wire format `DD.MM.YYYY`; `good_ids` is the
/// flat, possibly-repeating identifier list from the cart.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub delivery_address: String,
    pub delivery_date: String,
    pub delivery_interval: String,
    pub subscribe: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub good_ids: Vec<i64>,
}

/// Payload for updating an order: a full replace of the editable fields.
///
/// Line items are not editable; the identifier list stays as created.
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdate {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub delivery_address: String,
    pub delivery_date: String,
    pub delivery_interval: String,
    pub subscribe: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_deserializes_with_minimal_fields() {
        let order: Order = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(order.id, 3);
        assert_eq!(order.item_count(), 0);
        assert_eq!(order.line_source(), LineSource::Empty);
        assert_eq!(order.authoritative_total(), None);
    }

    #[test]
    fn embedded_goods_win_over_id_list() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "goods": [{"id": 5, "quantity": 2}],
            "good_ids": [5, 5, 7]
        }))
        .unwrap();
        assert!(matches!(order.line_source(), LineSource::Embedded(g) if g.len() == 1));
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn id_list_is_used_when_goods_absent_or_empty() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "goods": [],
            "good_ids": [5, 5, 7]
        }))
        .unwrap();
        assert!(matches!(order.line_source(), LineSource::Ids(ids) if ids == [5, 5, 7]));
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn zero_total_sum_is_not_authoritative() {
        let order: Order =
            serde_json::from_value(json!({"id": 1, "total_sum": 0.0})).unwrap();
        assert_eq!(order.authoritative_total(), None);

        let order: Order =
            serde_json::from_value(json!({"id": 1, "total_sum": 250.0})).unwrap();
        assert_eq!(order.authoritative_total(), Some(250.0));
    }

    #[test]
    fn payload_omits_empty_comment_and_keeps_good_ids() {
        let payload = OrderPayload {
            full_name: "Ivanov Ivan".into(),
            email: "ivan@example.com".into(),
            phone: "+7 900 000-00-00".into(),
            delivery_address: "Moscow".into(),
            delivery_date: "08.06.2024".into(),
            delivery_interval: "18:00-22:00".into(),
            subscribe: 1,
            comment: None,
            good_ids: vec![5, 5, 7],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("comment").is_none());
        assert_eq!(value["good_ids"], json!([5, 5, 7]));
        assert_eq!(value["subscribe"], json!(1));
    }
}
