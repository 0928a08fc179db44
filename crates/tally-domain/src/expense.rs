//! Expense rows consumed from the expense collaborator.
//!
//! The ledger does not own expense approval; it records the rows it
//! is fed and reads their status when computing utilization.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// A single expense charged against a budget category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub status: ExpenseStatus,
    pub submitted_by: Uuid,
    pub incurred_on: NaiveDate,
}

impl Expense {
    pub fn new(
        category_id: Uuid,
        amount: Decimal,
        currency: impl Into<String>,
        submitted_by: Uuid,
        incurred_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            amount,
            currency: currency.into(),
            status: ExpenseStatus::Pending,
            submitted_by,
            incurred_on,
        }
    }

    /// Only approved expenses contribute to spend figures.
    pub fn counts_toward_spend(&self) -> bool {
        matches!(self.status, ExpenseStatus::Approved)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Approval states mirrored from the expense collaborator.
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
    RequiresInfo,
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseStatus::Pending => "Pending",
            ExpenseStatus::Approved => "Approved",
            ExpenseStatus::Rejected => "Rejected",
            ExpenseStatus::RequiresInfo => "Requires Info",
        };
        f.write_str(label)
    }
}
