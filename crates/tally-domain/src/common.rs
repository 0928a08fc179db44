//! Shared traits, enums, and limits for budgeting primitives.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest total a budget may carry: 999,999,999.99.
pub const MAX_BUDGET_AMOUNT: Decimal = Decimal::from_parts(1_215_752_191, 23, 0, false, 2);

/// Exposes a stable identifier for entities stored in the book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Enumerates the budgeting windows a project budget can cover.
pub enum PeriodType {
    /// One envelope spanning the whole project lifetime.
    #[default]
    Project,
    Monthly,
    Quarterly,
    Yearly,
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodType::Project => "Project",
            PeriodType::Monthly => "Monthly",
            PeriodType::Quarterly => "Quarterly",
            PeriodType::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Lifecycle states for a budget envelope.
pub enum BudgetStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl BudgetStatus {
    /// Archived budgets are excluded from workspace aggregation and
    /// from the one-budget-per-project rule.
    pub fn is_archived(self) -> bool {
        matches!(self, BudgetStatus::Archived)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::Active => "Active",
            BudgetStatus::Completed => "Completed",
            BudgetStatus::Archived => "Archived",
        };
        f.write_str(label)
    }
}
