//! Create and update a budget together with its category set.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tally_config::CategoryTemplate;
use tally_domain::{
    Budget, BudgetBook, BudgetCategory, BudgetStatus, PeriodType, MAX_BUDGET_AMOUNT,
};

use crate::error::{CoreError, CoreResult};

/// Payload for creating a budget with its full category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub project_id: Uuid,
    pub total_amount: Decimal,
    pub currency: String,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: Uuid,
    pub categories: Vec<CategoryInput>,
}

/// One category row in a create/update payload. A present `id` means
/// update-in-place; an absent `id` means create. Existing categories
/// missing from an update payload are deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub allocated_amount: Decimal,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryInput {
    pub fn new(
        name: impl Into<String>,
        allocated_amount: Decimal,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            allocated_amount,
            color: color.into(),
            description: None,
        }
    }

    /// Keeps an existing category, identified by id, in the payload.
    pub fn existing(
        id: Uuid,
        name: impl Into<String>,
        allocated_amount: Decimal,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name, allocated_amount, color)
        }
    }

    /// Seeds a payload row from a configured template.
    pub fn from_template(template: &CategoryTemplate, allocated_amount: Decimal) -> Self {
        Self {
            id: None,
            name: template.name.clone(),
            allocated_amount,
            color: template.color.clone(),
            description: Some(template.description.clone()),
        }
    }
}

/// Payload for editing a budget. Start and end dates are immutable
/// after creation; a direct `total_amount` change is only allowed
/// while the budget has no recorded expenses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetUpdate {
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<BudgetStatus>,
    pub categories: Vec<CategoryInput>,
}

/// Validated create/update/archive operations over budget envelopes.
pub struct BudgetCatalog;

impl BudgetCatalog {
    /// Creates a budget and its categories as one atomic operation.
    /// Nothing is written unless every invariant holds.
    pub fn create(book: &mut BudgetBook, input: NewBudget) -> CoreResult<Uuid> {
        if book.project(input.project_id).is_none() {
            return Err(CoreError::ProjectNotFound(input.project_id));
        }
        Self::check_period_conflicts(
            book,
            input.project_id,
            input.period_type,
            input.start_date,
            input.end_date,
            None,
        )?;
        Self::validate_total(input.total_amount)?;
        if let Some(end) = input.end_date {
            if end <= input.start_date {
                return Err(CoreError::validation(
                    "end_date",
                    "end date must be after start date",
                ));
            }
        }
        Self::validate_categories(&input.categories)?;
        Self::validate_allocation_sum(&input.categories, input.total_amount)?;

        let mut budget = Budget::new(
            input.project_id,
            input.total_amount,
            input.currency,
            input.period_type,
            input.start_date,
            input.created_by,
        );
        budget.end_date = input.end_date;
        budget.description = input.description;
        let budget_id = book.add_budget(budget);

        for (index, row) in input.categories.into_iter().enumerate() {
            let mut category = BudgetCategory::new(
                budget_id,
                row.name,
                row.allocated_amount,
                row.color,
                index as u32,
            );
            category.description = row.description;
            book.add_category(category);
        }

        info!(%budget_id, project_id = %input.project_id, "budget created");
        Ok(budget_id)
    }

    /// Applies an edit to a budget and replaces its category set
    /// wholesale. Rejected as a whole if any category slated for
    /// deletion still has expenses. Archived budgets only accept
    /// updates that restore them to a live status, and restoration
    /// repeats the period-conflict check against live siblings.
    pub fn update(book: &mut BudgetBook, budget_id: Uuid, update: BudgetUpdate) -> CoreResult<()> {
        let budget = book
            .budget(budget_id)
            .ok_or(CoreError::BudgetNotFound(budget_id))?;
        let current_total = budget.total_amount;

        let restoring = budget.status.is_archived()
            && matches!(update.status, Some(status) if !status.is_archived());
        if budget.status.is_archived() && !restoring {
            return Err(CoreError::validation(
                "status",
                "budget is archived; restore it before editing",
            ));
        }
        if restoring {
            Self::check_period_conflicts(
                book,
                budget.project_id,
                budget.period_type,
                budget.start_date,
                budget.end_date,
                Some(budget_id),
            )?;
        }

        Self::validate_categories(&update.categories)?;

        // Payload rows carrying an id must reference categories of
        // this budget.
        for row in &update.categories {
            if let Some(id) = row.id {
                match book.category(id) {
                    Some(category) if category.budget_id == budget_id => {}
                    _ => return Err(CoreError::CategoryNotFound(id)),
                }
            }
        }

        let existing = book.categories_for(budget_id);
        let kept: Vec<Uuid> = update.categories.iter().filter_map(|row| row.id).collect();
        let mut deletions = Vec::new();
        for category in &existing {
            if !kept.contains(&category.id) {
                let expense_count = book.expenses_for(category.id).len();
                if expense_count > 0 {
                    return Err(CoreError::CategoryInUse {
                        category_id: category.id,
                        name: category.name.clone(),
                        expense_count,
                    });
                }
                deletions.push(category.id);
            }
        }

        let new_total = update.total_amount.unwrap_or(current_total);
        if let Some(total) = update.total_amount {
            Self::validate_total(total)?;
            if total != current_total {
                let recorded: usize = existing
                    .iter()
                    .map(|category| book.expenses_for(category.id).len())
                    .sum();
                if recorded > 0 {
                    return Err(CoreError::validation(
                        "total_amount",
                        "budget has recorded expenses; propose a revision instead",
                    ));
                }
            }
        }
        Self::validate_allocation_sum(&update.categories, new_total)?;

        // All invariants hold; apply the edit.
        for id in deletions {
            book.remove_category(id);
        }
        for (index, row) in update.categories.into_iter().enumerate() {
            match row.id {
                Some(id) => {
                    let category = book
                        .category_mut(id)
                        .ok_or(CoreError::CategoryNotFound(id))?;
                    category.name = row.name;
                    category.allocated_amount = row.allocated_amount;
                    category.color = row.color;
                    category.description = row.description;
                    category.sort_order = index as u32;
                }
                None => {
                    let mut category = BudgetCategory::new(
                        budget_id,
                        row.name,
                        row.allocated_amount,
                        row.color,
                        index as u32,
                    );
                    category.description = row.description;
                    book.add_category(category);
                }
            }
        }

        let budget = book
            .budget_mut(budget_id)
            .ok_or(CoreError::BudgetNotFound(budget_id))?;
        budget.total_amount = new_total;
        if let Some(description) = update.description {
            budget.description = Some(description);
        }
        if let Some(status) = update.status {
            budget.status = status;
        }
        budget.updated_at = chrono::Utc::now();
        book.touch();

        info!(%budget_id, "budget updated");
        Ok(())
    }

    /// Soft-archives a budget instead of deleting it; its categories
    /// and their expense history stay in place.
    pub fn archive(book: &mut BudgetBook, budget_id: Uuid) -> CoreResult<()> {
        let budget = book
            .budget_mut(budget_id)
            .ok_or(CoreError::BudgetNotFound(budget_id))?;
        budget.status = BudgetStatus::Archived;
        budget.updated_at = chrono::Utc::now();
        book.touch();
        info!(%budget_id, "budget archived");
        Ok(())
    }

    /// A project-period budget tolerates no live sibling at all;
    /// other periods reject date-range overlap within the same
    /// project and never coexist with a live project-period budget.
    /// `exclude` skips the budget being restored so it does not
    /// conflict with itself.
    fn check_period_conflicts(
        book: &BudgetBook,
        project_id: Uuid,
        period_type: PeriodType,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        exclude: Option<Uuid>,
    ) -> CoreResult<()> {
        let siblings = book.budgets_for_project(project_id);
        let mut live = siblings
            .iter()
            .filter(|budget| !budget.status.is_archived())
            .filter(|budget| Some(budget.id) != exclude);
        match period_type {
            PeriodType::Project => {
                if live.next().is_some() {
                    return Err(CoreError::DuplicateBudget(project_id));
                }
            }
            _ => {
                for budget in live {
                    if budget.period_type == PeriodType::Project
                        || budget.overlaps(start_date, end_date)
                    {
                        return Err(CoreError::DuplicateBudget(project_id));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_total(total: Decimal) -> CoreResult<()> {
        if total <= Decimal::ZERO {
            return Err(CoreError::validation(
                "total_amount",
                "total amount must be positive",
            ));
        }
        if total > MAX_BUDGET_AMOUNT {
            return Err(CoreError::validation(
                "total_amount",
                format!("total amount must not exceed {MAX_BUDGET_AMOUNT}"),
            ));
        }
        Ok(())
    }

    fn validate_categories(categories: &[CategoryInput]) -> CoreResult<()> {
        for (index, row) in categories.iter().enumerate() {
            if row.name.trim().is_empty() {
                return Err(CoreError::validation(
                    "categories",
                    format!("category #{} has an empty name", index + 1),
                ));
            }
            if row.allocated_amount < Decimal::ZERO {
                return Err(CoreError::validation(
                    "categories",
                    format!("category `{}` has a negative allocation", row.name),
                ));
            }
            let normalized = row.name.trim().to_ascii_lowercase();
            let duplicate = categories
                .iter()
                .skip(index + 1)
                .any(|other| other.name.trim().to_ascii_lowercase() == normalized);
            if duplicate {
                return Err(CoreError::validation(
                    "categories",
                    format!("category `{}` appears more than once", row.name),
                ));
            }
            if let Some(id) = row.id {
                let duplicate_id = categories
                    .iter()
                    .skip(index + 1)
                    .any(|other| other.id == Some(id));
                if duplicate_id {
                    return Err(CoreError::validation(
                        "categories",
                        format!("category id {id} appears more than once"),
                    ));
                }
            }
        }
        Ok(())
    }

    fn validate_allocation_sum(categories: &[CategoryInput], total: Decimal) -> CoreResult<()> {
        let allocated: Decimal = categories.iter().map(|row| row.allocated_amount).sum();
        if allocated > total {
            return Err(CoreError::validation(
                "categories",
                format!("category allocations ({allocated}) exceed the total amount ({total})"),
            ));
        }
        Ok(())
    }
}
