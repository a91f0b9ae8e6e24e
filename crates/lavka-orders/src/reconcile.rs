//! Best-effort resolution of order and cart line items.
//!
//! Identifier lists need one secondary fetch per distinct good; those are
//! issued concurrently and any individual failure drops that line rather
//! than failing the whole reconciliation. The dropped count is part of the
//! result so callers can say "N items could not be loaded" instead of
//! silently under-reporting.

use std::collections::HashMap;

use chrono::NaiveDate;
use futures::future::join_all;
use serde_json::Value;

use lavka_api::normalize::{normalize_good, Good};
use lavka_api::{LineSource, Order, StoreClient};
use lavka_core::delivery::delivery_cost;

/// One resolved order line.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub good_id: i64,
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
}

/// The reconciled view of an order.
#[derive(Debug)]
pub struct OrderSummary {
    pub lines: Vec<LineItem>,
    /// Σ unit price × quantity over the resolved lines.
    pub goods_total: f64,
    /// The order's authoritative total when the server supplied one,
    /// otherwise `goods_total`.
    pub total: f64,
    /// True when `total` came from the server rather than resolution.
    pub authoritative: bool,
    /// Distinct identifiers that could not be resolved.
    pub dropped: usize,
}

/// Resolves an order's line items and totals.
///
/// Never fails as a whole: unresolvable lines are dropped and counted. When
/// the order carries a non-zero `total_sum` that value is reported unchanged
/// and resolution only feeds the line-item display.
pub async fn resolve_order(client: &StoreClient, order: &Order) -> OrderSummary {
    let (lines, dropped) = match order.line_source() {
        LineSource::Embedded(goods) => embedded_lines(goods),
        LineSource::Ids(ids) => fetched_lines(client, ids).await,
        LineSource::Empty => (Vec::new(), 0),
    };

    let goods_total = lines
        .iter()
        .map(|line| line.unit_price * f64::from(line.quantity))
        .sum();

    let (total, authoritative) = match order.authoritative_total() {
        Some(total) => (total, true),
        None => (goods_total, false),
    };

    OrderSummary {
        lines,
        goods_total,
        total,
        authoritative,
        dropped,
    }
}

/// Computes display totals for a whole orders listing in one pass.
///
/// Orders with an authoritative `total_sum` use it directly. The remaining
/// identifier-list orders share one concurrent fetch over the union of their
/// distinct good ids, the way the original profile view fills in its table.
pub async fn resolve_order_totals(
    client: &StoreClient,
    orders: &[Order],
) -> HashMap<i64, f64> {
    let mut unique: Vec<i64> = Vec::new();
    for order in orders {
        if order.authoritative_total().is_some() {
            continue;
        }
        if let LineSource::Ids(ids) = order.line_source() {
            for id in ids {
                if !unique.contains(id) {
                    unique.push(*id);
                }
            }
        }
    }

    let fetches = join_all(unique.iter().map(|id| client.get_good(*id))).await;
    let prices: HashMap<i64, f64> = unique
        .iter()
        .zip(fetches)
        .filter_map(|(id, result)| match result {
            Ok(good) => Some((*id, good.price)),
            Err(e) => {
                tracing::warn!(good_id = id, error = %e, "dropping unresolvable good from totals");
                None
            }
        })
        .collect();

    let mut totals = HashMap::with_capacity(orders.len());
    for order in orders {
        let total = if let Some(total) = order.authoritative_total() {
            total
        } else {
            match order.line_source() {
                LineSource::Embedded(goods) => {
                    let (lines, _) = embedded_lines(goods);
                    lines
                        .iter()
                        .map(|line| line.unit_price * f64::from(line.quantity))
                        .sum()
                }
                // Repeats in the raw list encode quantity, so summing per
                // occurrence is already quantity-aware.
                LineSource::Ids(ids) => ids.iter().filter_map(|id| prices.get(id)).sum(),
                LineSource::Empty => 0.0,
            }
        };
        totals.insert(order.id, total);
    }
    totals
}

/// The cart's goods, resolved best-effort from the catalog.
#[derive(Debug)]
pub struct CartView {
    pub goods: Vec<Good>,
    /// Identifiers whose fetch failed.
    pub dropped: usize,
}

/// Checkout sums: goods, delivery, and their total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub goods: f64,
    pub delivery: f64,
    pub total: f64,
}

impl CartView {
    #[must_use]
    pub fn goods_sum(&self) -> f64 {
        self.goods.iter().map(|good| good.price).sum()
    }

    /// Combines the goods sum with the delivery cost for the chosen slot.
    #[must_use]
    pub fn totals(&self, date: Option<NaiveDate>, interval: &str) -> CartTotals {
        let goods = self.goods_sum();
        let delivery = delivery_cost(date, interval);
        CartTotals {
            goods,
            delivery,
            total: goods + delivery,
        }
    }
}

/// Fetches every cart good concurrently, dropping the ones that fail.
pub async fn resolve_cart(client: &StoreClient, ids: &[i64]) -> CartView {
    let fetches = join_all(ids.iter().map(|id| client.get_good(*id))).await;
    let mut goods = Vec::with_capacity(ids.len());
    let mut dropped = 0;
    for (id, result) in ids.iter().zip(fetches) {
        match result {
            Ok(good) => goods.push(good),
            Err(e) => {
                dropped += 1;
                tracing::warn!(good_id = id, error = %e, "dropping unresolvable cart good");
            }
        }
    }
    CartView { goods, dropped }
}

/// Builds lines from goods already embedded in the order.
///
/// `quantity` defaults to 1 when absent; records without a numeric id are
/// dropped and counted.
fn embedded_lines(goods: &[Value]) -> (Vec<LineItem>, usize) {
    let mut lines = Vec::with_capacity(goods.len());
    let mut dropped = 0;
    for record in goods {
        let quantity = record
            .get("quantity")
            .and_then(Value::as_u64)
            .filter(|q| *q > 0)
            .unwrap_or(1) as u32;
        match normalize_good(record) {
            Some(good) => lines.push(line_from_good(&good, quantity)),
            None => dropped += 1,
        }
    }
    (lines, dropped)
}

/// Deduplicates the identifier list, fetches each distinct good once, and
/// re-applies the repeat counts as quantities.
async fn fetched_lines(client: &StoreClient, ids: &[i64]) -> (Vec<LineItem>, usize) {
    let mut counts: HashMap<i64, u32> = HashMap::new();
    let mut unique: Vec<i64> = Vec::new();
    for id in ids {
        let count = counts.entry(*id).or_insert(0);
        if *count == 0 {
            unique.push(*id);
        }
        *count += 1;
    }

    let fetches = join_all(unique.iter().map(|id| client.get_good(*id))).await;

    let mut lines = Vec::with_capacity(unique.len());
    let mut dropped = 0;
    for (id, result) in unique.iter().zip(fetches) {
        match result {
            Ok(good) => lines.push(line_from_good(&good, counts[id])),
            Err(e) => {
                dropped += 1;
                tracing::warn!(good_id = id, error = %e, "dropping unresolvable order line");
            }
        }
    }
    (lines, dropped)
}

fn line_from_good(good: &Good, quantity: u32) -> LineItem {
    let title = if good.title.is_empty() {
        format!("good #{}", good.id)
    } else {
        good.title.clone()
    };
    LineItem {
        good_id: good.id,
        title,
        unit_price: good.price,
        quantity,
    }
}
