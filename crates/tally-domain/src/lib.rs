//! tally-domain
//!
//! Domain types for the Tally budget ledger: budgets, categories,
//! revisions, expense rows, and the per-workspace `BudgetBook`
//! aggregate. Pure data, no I/O.

pub mod book;
pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod revision;
pub mod summary;

pub use book::{BudgetBook, ProjectRef};
pub use budget::Budget;
pub use category::BudgetCategory;
pub use common::{BudgetStatus, Identifiable, NamedEntity, PeriodType, MAX_BUDGET_AMOUNT};
pub use expense::{Expense, ExpenseStatus};
pub use revision::{BudgetRevision, RevisionStatus};
pub use summary::{BudgetSummary, CategoryUtilization, WorkspaceSummary};
