//! Order reconciliation and checkout for the lavka storefront client.
//!
//! Resolves an order's line items whichever way the server encoded them
//! (embedded goods or bare identifier lists needing secondary fetches),
//! computes best-effort totals, and builds validated create/update payloads
//! from cart contents and form data.

mod form;
mod reconcile;

pub use form::{
    build_payload, build_update, parse_calendar_date, validate, wire_date, MissingField,
    OrderForm, OrderFormError, WIRE_DATE_FORMAT,
};
pub use reconcile::{
    resolve_cart, resolve_order, resolve_order_totals, CartTotals, CartView, LineItem,
    OrderSummary,
};
