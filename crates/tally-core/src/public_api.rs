//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! HTTP handlers and other frontends can rely on this module without
//! depending on the entire service surface area.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_config::{default_categories, CategoryTemplate};
use tally_domain::{
    Budget, BudgetBook, BudgetCategory, BudgetSummary, CategoryUtilization, ExpenseStatus,
    WorkspaceSummary,
};

use crate::{
    catalog::{BudgetCatalog, BudgetUpdate, NewBudget},
    error::CoreResult,
    expenses::{ExpenseService, NewExpense},
    revision::{RevisionDecision, RevisionTracker},
    utilization::UtilizationCalculator,
};

/// A budget plus its categories and freshly computed figures, the
/// shape a budget-detail read returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDetail {
    pub budget: Budget,
    pub categories: Vec<BudgetCategory>,
    pub summary: BudgetSummary,
}

/// Creates a budget with its categories; returns the new budget id.
pub fn api_create_budget(book: &mut BudgetBook, input: NewBudget) -> CoreResult<Uuid> {
    BudgetCatalog::create(book, input)
}

/// Edits a budget and replaces its category set.
pub fn api_update_budget(
    book: &mut BudgetBook,
    budget_id: Uuid,
    update: BudgetUpdate,
) -> CoreResult<()> {
    BudgetCatalog::update(book, budget_id, update)
}

/// Returns the budget, its ordered categories, and derived figures.
pub fn api_budget_detail(book: &BudgetBook, budget_id: Uuid) -> CoreResult<BudgetDetail> {
    let summary = UtilizationCalculator::budget_summary(book, budget_id)?;
    let budget = book
        .budget(budget_id)
        .cloned()
        .ok_or(crate::error::CoreError::BudgetNotFound(budget_id))?;
    let categories = book
        .categories_for(budget_id)
        .into_iter()
        .cloned()
        .collect();
    Ok(BudgetDetail {
        budget,
        categories,
        summary,
    })
}

/// Workspace-wide rollup across non-archived budgets.
pub fn api_workspace_summary(book: &BudgetBook) -> WorkspaceSummary {
    UtilizationCalculator::workspace_summary(book)
}

/// The static template list used to pre-populate a new budget's
/// category editor.
pub fn api_default_categories() -> &'static [CategoryTemplate] {
    default_categories()
}

/// Proposes a revision of a budget's total amount.
pub fn api_propose_revision(
    book: &mut BudgetBook,
    budget_id: Uuid,
    new_amount: Decimal,
    reason: impl Into<String>,
    proposed_by: Uuid,
) -> CoreResult<Uuid> {
    RevisionTracker::propose(book, budget_id, new_amount, reason, proposed_by)
}

/// Approves or rejects a pending revision.
pub fn api_resolve_revision(
    book: &mut BudgetBook,
    revision_id: Uuid,
    decision: RevisionDecision,
    approver_id: Uuid,
) -> CoreResult<()> {
    RevisionTracker::resolve(book, revision_id, decision, approver_id)
}

/// Records an expense row fed in by the expense collaborator.
pub fn api_record_expense(book: &mut BudgetBook, input: NewExpense) -> CoreResult<Uuid> {
    ExpenseService::record(book, input)
}

/// Mirrors an expense status transition and returns the affected
/// category's recomputed utilization, ready for alert evaluation.
pub fn api_set_expense_status(
    book: &mut BudgetBook,
    expense_id: Uuid,
    status: ExpenseStatus,
) -> CoreResult<CategoryUtilization> {
    let category_id = ExpenseService::set_status(book, expense_id, status)?;
    UtilizationCalculator::category_utilization_by_id(book, category_id)
}
