//! Read-only derived figures over the budget book.
//!
//! Every function here is a pure read of the book it is handed;
//! callers recompute after each expense-approval transition.

use rust_decimal::Decimal;
use uuid::Uuid;

use tally_domain::{
    Budget, BudgetBook, BudgetCategory, BudgetStatus, BudgetSummary, CategoryUtilization,
    ExpenseStatus, NamedEntity, WorkspaceSummary,
};

use crate::error::{CoreError, CoreResult};

/// Stateless aggregation over [`BudgetBook`] snapshots.
pub struct UtilizationCalculator;

impl UtilizationCalculator {
    /// Spend, remaining amount, and utilization percentage for one
    /// category. Only approved expenses count.
    pub fn category_utilization(book: &BudgetBook, category: &BudgetCategory) -> CategoryUtilization {
        let total_spent: Decimal = book
            .expenses_for(category.id)
            .iter()
            .filter(|expense| expense.counts_toward_spend())
            .map(|expense| expense.amount)
            .sum();
        CategoryUtilization::from_parts(
            category.id,
            category.name(),
            category.allocated_amount,
            total_spent,
        )
    }

    /// Looks the category up by id and computes its utilization.
    pub fn category_utilization_by_id(
        book: &BudgetBook,
        category_id: Uuid,
    ) -> CoreResult<CategoryUtilization> {
        let category = book
            .category(category_id)
            .ok_or(CoreError::CategoryNotFound(category_id))?;
        Ok(Self::category_utilization(book, category))
    }

    /// Aggregates every category of one budget. The average is the
    /// unweighted mean of per-category percentages; zero-allocation
    /// categories stay out of the mean but are still listed.
    pub fn budget_summary(book: &BudgetBook, budget_id: Uuid) -> CoreResult<BudgetSummary> {
        let budget = book
            .budget(budget_id)
            .ok_or(CoreError::BudgetNotFound(budget_id))?;
        Ok(Self::summarize(book, budget))
    }

    fn summarize(book: &BudgetBook, budget: &Budget) -> BudgetSummary {
        let per_category: Vec<CategoryUtilization> = book
            .categories_for(budget.id)
            .into_iter()
            .map(|category| Self::category_utilization(book, category))
            .collect();

        let total_spent: Decimal = per_category.iter().map(|view| view.total_spent).sum();
        let counted: Vec<&CategoryUtilization> = per_category
            .iter()
            .filter(|view| !view.allocated_amount.is_zero())
            .collect();
        let average_utilization = if counted.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = counted.iter().map(|view| view.utilization_percent).sum();
            (sum / Decimal::from(counted.len())).round_dp(2)
        };

        BudgetSummary {
            budget_id: budget.id,
            total_budget: budget.total_amount,
            total_spent,
            remaining_budget: budget.total_amount - total_spent,
            average_utilization,
            per_category,
        }
    }

    /// Rolls up every non-archived budget in the workspace.
    /// `pending_approvals` counts pending expenses under those
    /// budgets' categories.
    pub fn workspace_summary(book: &BudgetBook) -> WorkspaceSummary {
        let mut per_budget = Vec::new();
        let mut total_budget = Decimal::ZERO;
        let mut total_spent = Decimal::ZERO;
        let mut active_budgets = 0usize;
        let mut pending_approvals = 0usize;

        for budget in &book.budgets {
            if budget.status.is_archived() {
                continue;
            }
            if budget.status == BudgetStatus::Active {
                active_budgets += 1;
            }
            let summary = Self::summarize(book, budget);
            total_budget += summary.total_budget;
            total_spent += summary.total_spent;
            for view in &summary.per_category {
                pending_approvals += book
                    .expenses_for(view.category_id)
                    .iter()
                    .filter(|expense| expense.status == ExpenseStatus::Pending)
                    .count();
            }
            per_budget.push(summary);
        }

        WorkspaceSummary {
            workspace_id: book.workspace_id,
            total_budget,
            total_spent,
            remaining_budget: total_budget - total_spent,
            active_budgets,
            pending_approvals,
            per_budget,
        }
    }
}
