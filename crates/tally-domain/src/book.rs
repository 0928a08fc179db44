//! The per-workspace aggregate holding all budget ledger state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    budget::Budget, category::BudgetCategory, common::Identifiable, expense::Expense,
    revision::BudgetRevision,
};

/// Reference to an externally-owned project the catalog validates
/// budgets against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectRef {
    pub id: Uuid,
    pub name: String,
}

impl ProjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// One workspace's complete budget ledger: projects, budgets, their
/// categories, revision history, and the expense rows fed in by the
/// expense collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetBook {
    pub workspace_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
    #[serde(default)]
    pub revisions: Vec<BudgetRevision>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetBook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            workspace_id: Uuid::new_v4(),
            name: name.into(),
            projects: Vec::new(),
            budgets: Vec::new(),
            categories: Vec::new(),
            revisions: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bumps the modification timestamp after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn add_project(&mut self, project: ProjectRef) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        self.touch();
        id
    }

    pub fn project(&self, id: Uuid) -> Option<&ProjectRef> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        self.touch();
        id
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        find_by_id(&self.budgets, id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        self.budgets.iter_mut().find(|budget| budget.id == id)
    }

    /// Budgets attached to the given project, in insertion order.
    pub fn budgets_for_project(&self, project_id: Uuid) -> Vec<&Budget> {
        self.budgets
            .iter()
            .filter(|budget| budget.project_id == project_id)
            .collect()
    }

    pub fn add_category(&mut self, category: BudgetCategory) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn category(&self, id: Uuid) -> Option<&BudgetCategory> {
        find_by_id(&self.categories, id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut BudgetCategory> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    /// Categories of one budget, ordered by `sort_order`.
    pub fn categories_for(&self, budget_id: Uuid) -> Vec<&BudgetCategory> {
        let mut categories: Vec<&BudgetCategory> = self
            .categories
            .iter()
            .filter(|category| category.budget_id == budget_id)
            .collect();
        categories.sort_by_key(|category| category.sort_order);
        categories
    }

    pub fn remove_category(&mut self, id: Uuid) -> bool {
        let before = self.categories.len();
        self.categories.retain(|category| category.id != id);
        let removed = self.categories.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn add_revision(&mut self, revision: BudgetRevision) -> Uuid {
        let id = revision.id;
        self.revisions.push(revision);
        self.touch();
        id
    }

    pub fn revision(&self, id: Uuid) -> Option<&BudgetRevision> {
        find_by_id(&self.revisions, id)
    }

    pub fn revision_mut(&mut self, id: Uuid) -> Option<&mut BudgetRevision> {
        self.revisions.iter_mut().find(|revision| revision.id == id)
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        find_by_id(&self.expenses, id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    /// Expense rows recorded against one category.
    pub fn expenses_for(&self, category_id: Uuid) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| expense.category_id == category_id)
            .collect()
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}
