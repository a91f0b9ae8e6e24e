//! Shared domain rules and configuration for the lavka storefront client.
//!
//! Holds the pure pricing/delivery business rules that every other crate
//! builds on, plus the env-var based application configuration.

pub mod app_config;
pub mod config;
pub mod delivery;
pub mod pricing;

pub use app_config::{AppConfig, ConfigError};
pub use config::{load_app_config, load_app_config_from_env};
