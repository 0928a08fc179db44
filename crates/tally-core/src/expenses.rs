//! Ingestion seam for the external expense collaborator.
//!
//! The ledger records expense rows and mirrors their approval status;
//! the approval workflow itself lives outside this crate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tally_domain::{BudgetBook, Expense, ExpenseStatus};

use crate::error::{CoreError, CoreResult};

/// Payload for recording an expense against a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub category_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub submitted_by: Uuid,
    pub incurred_on: NaiveDate,
}

/// Records expense rows and mirrors status transitions from the
/// collaborator that owns approvals.
pub struct ExpenseService;

impl ExpenseService {
    /// Records a pending expense. The referenced category must exist.
    pub fn record(book: &mut BudgetBook, input: NewExpense) -> CoreResult<Uuid> {
        if book.category(input.category_id).is_none() {
            return Err(CoreError::CategoryNotFound(input.category_id));
        }
        if input.amount <= Decimal::ZERO {
            return Err(CoreError::validation(
                "amount",
                "expense amount must be positive",
            ));
        }
        let expense = Expense::new(
            input.category_id,
            input.amount,
            input.currency,
            input.submitted_by,
            input.incurred_on,
        );
        let expense_id = book.add_expense(expense);
        Ok(expense_id)
    }

    /// Mirrors a status transition and returns the affected category
    /// id so callers can recompute utilization and re-run alert
    /// evaluation.
    pub fn set_status(
        book: &mut BudgetBook,
        expense_id: Uuid,
        status: ExpenseStatus,
    ) -> CoreResult<Uuid> {
        let expense = book
            .expense_mut(expense_id)
            .ok_or(CoreError::ExpenseNotFound(expense_id))?;
        expense.status = status;
        let category_id = expense.category_id;
        book.touch();
        info!(%expense_id, %category_id, %status, "expense status mirrored");
        Ok(category_id)
    }
}
