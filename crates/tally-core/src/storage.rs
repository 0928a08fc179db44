//! Persistence abstraction for budget book snapshots.

use tally_domain::BudgetBook;

use crate::error::CoreError;

/// Abstraction over backends capable of storing whole book snapshots.
/// The core never writes partially; a book is saved as one unit.
pub trait BookStorage: Send + Sync {
    fn save_book(&self, name: &str, book: &BudgetBook) -> Result<(), CoreError>;
    fn load_book(&self, name: &str) -> Result<BudgetBook, CoreError>;
    fn list_books(&self) -> Result<Vec<String>, CoreError>;
    fn delete_book(&self, name: &str) -> Result<(), CoreError>;
}

/// Detects dangling references within a book snapshot, typically
/// after loading data produced elsewhere.
pub fn book_warnings(book: &BudgetBook) -> Vec<String> {
    let mut warnings = Vec::new();

    for budget in &book.budgets {
        if book.project(budget.project_id).is_none() {
            warnings.push(format!(
                "budget {} references unknown project {}",
                budget.id, budget.project_id
            ));
        }
    }
    for category in &book.categories {
        if book.budget(category.budget_id).is_none() {
            warnings.push(format!(
                "category {} references unknown budget {}",
                category.id, category.budget_id
            ));
        }
    }
    for revision in &book.revisions {
        if book.budget(revision.budget_id).is_none() {
            warnings.push(format!(
                "revision {} references unknown budget {}",
                revision.id, revision.budget_id
            ));
        }
    }
    for expense in &book.expenses {
        if book.category(expense.category_id).is_none() {
            warnings.push(format!(
                "expense {} references unknown category {}",
                expense.id, expense.category_id
            ));
        }
    }
    warnings
}
