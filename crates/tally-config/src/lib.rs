//! tally-config
//!
//! Workspace configuration for the budget ledger: currency, alert
//! thresholds, and the immutable default category template table,
//! plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{default_categories, CategoryTemplate, Config, DEFAULT_CATEGORIES};
