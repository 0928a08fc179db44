//! tally-core
//!
//! Business logic and services for the Tally budget ledger.
//! Depends on tally-domain and tally-config. No HTTP, no terminal
//! I/O, no direct storage interactions.

pub mod alerts;
pub mod catalog;
pub mod error;
pub mod expenses;
pub mod public_api;
pub mod revision;
pub mod storage;
pub mod utilization;
pub mod utils;

pub use alerts::{AlertEvaluator, AlertEvent, AlertLevel, AlertMonitor, AlertThresholds};
pub use catalog::{BudgetCatalog, BudgetUpdate, CategoryInput, NewBudget};
pub use error::{CoreError, CoreResult};
pub use expenses::{ExpenseService, NewExpense};
pub use public_api::*;
pub use revision::{RevisionDecision, RevisionTracker};
pub use storage::{book_warnings, BookStorage};
pub use utilization::UtilizationCalculator;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally core tracing initialized.");
    });
}
