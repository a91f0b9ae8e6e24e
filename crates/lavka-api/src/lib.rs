//! HTTP client for the storefront goods/orders REST API.
//!
//! Wraps `reqwest` with the service's query-parameter authentication, the
//! normalization of its several goods-list response shapes into one canonical
//! model, and classification of failures into transport and HTTP errors with
//! human-readable messages extracted from the response body.

mod client;
mod orders;

pub mod error;
pub mod key_store;
pub mod normalize;
pub mod types;

pub use client::{GoodsQuery, StoreClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use key_store::{KeyStore, DEFAULT_API_KEY};
pub use normalize::{Good, GoodsPage};
pub use types::{LineSource, Order, OrderPayload, OrderUpdate};
