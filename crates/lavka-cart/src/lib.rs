//! Persistent shopping cart for the lavka storefront client.
//!
//! The cart is a deduplicated set of good identifiers, persisted as a JSON
//! array so it survives sessions, with a broadcast channel for "cart
//! changed" notifications. The store knows nothing about its observers.

mod store;

pub use store::{CartError, CartEvent, CartStore};
