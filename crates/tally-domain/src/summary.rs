//! Derived, non-persisted utilization views.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spend-to-allocation figures for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryUtilization {
    pub category_id: Uuid,
    pub name: String,
    pub allocated_amount: Decimal,
    pub total_spent: Decimal,
    /// Percentage of the allocation consumed, rounded to two decimal
    /// places. Values above 100 signal overspend. Zero-allocation
    /// categories report 0 by convention.
    pub utilization_percent: Decimal,
    /// May go negative once a category is overspent.
    pub remaining: Decimal,
}

impl CategoryUtilization {
    pub fn from_parts(
        category_id: Uuid,
        name: impl Into<String>,
        allocated_amount: Decimal,
        total_spent: Decimal,
    ) -> Self {
        let utilization_percent = if allocated_amount.is_zero() {
            Decimal::ZERO
        } else {
            (total_spent / allocated_amount * Decimal::ONE_HUNDRED).round_dp(2)
        };
        Self {
            category_id,
            name: name.into(),
            allocated_amount,
            total_spent,
            utilization_percent,
            remaining: allocated_amount - total_spent,
        }
    }
}

/// Aggregate figures for one budget across all of its categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetSummary {
    pub budget_id: Uuid,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining_budget: Decimal,
    /// Unweighted mean of per-category percentages; categories with a
    /// zero allocation are excluded from the mean.
    pub average_utilization: Decimal,
    pub per_category: Vec<CategoryUtilization>,
}

/// Workspace-wide rollup over every non-archived budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceSummary {
    pub workspace_id: Uuid,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub remaining_budget: Decimal,
    pub active_budgets: usize,
    pub pending_approvals: usize,
    pub per_budget: Vec<BudgetSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percentage_rounds_to_two_places() {
        let view = CategoryUtilization::from_parts(
            Uuid::new_v4(),
            "Development",
            dec!(6000),
            dec!(1000),
        );
        assert_eq!(view.utilization_percent, dec!(16.67));
        assert_eq!(view.remaining, dec!(5000));
    }

    #[test]
    fn zero_allocation_reports_zero_percent() {
        let view = CategoryUtilization::from_parts(Uuid::new_v4(), "Misc", dec!(0), dec!(50));
        assert_eq!(view.utilization_percent, Decimal::ZERO);
        assert_eq!(view.remaining, dec!(-50));
    }

    #[test]
    fn overspend_exceeds_one_hundred_percent() {
        let view = CategoryUtilization::from_parts(Uuid::new_v4(), "Ops", dec!(100), dec!(150));
        assert_eq!(view.utilization_percent, dec!(150.00));
        assert_eq!(view.remaining, dec!(-50));
    }
}
