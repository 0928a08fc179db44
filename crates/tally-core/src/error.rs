use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for ledger operations. Every invariant check
/// runs before any mutation, so a returned error means the book is
/// unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed on `{field}`: {message}")]
    Validation { field: &'static str, message: String },
    #[error("Project {0} already has a budget covering this period")]
    DuplicateBudget(Uuid),
    #[error("Category `{name}` has {expense_count} recorded expense(s) and cannot be deleted")]
    CategoryInUse {
        category_id: Uuid,
        name: String,
        expense_count: usize,
    },
    #[error("Category allocations ({allocated}) exceed the revised total ({new_total})")]
    AllocationExceedsRevisedTotal {
        allocated: Decimal,
        new_total: Decimal,
    },
    #[error("Revision {0} is already resolved")]
    AlreadyResolved(Uuid),
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),
    #[error("Budget not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Revision not found: {0}")]
    RevisionNotFound(Uuid),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            message: message.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
