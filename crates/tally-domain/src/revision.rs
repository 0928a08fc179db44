//! Approval-gated amendments to a budget's total amount.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// A proposed change to a budget's total, pending until an approver
/// resolves it. `previous_amount` is captured at proposal time and
/// never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetRevision {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub proposed_by: Uuid,
    pub previous_amount: Decimal,
    pub new_amount: Decimal,
    pub reason: String,
    pub status: RevisionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    pub proposed_at: DateTime<Utc>,
}

impl BudgetRevision {
    pub fn new(
        budget_id: Uuid,
        previous_amount: Decimal,
        new_amount: Decimal,
        reason: impl Into<String>,
        proposed_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            budget_id,
            proposed_by,
            previous_amount,
            new_amount,
            reason: reason.into(),
            status: RevisionStatus::Pending,
            approved_by: None,
            resolved_at: None,
            proposed_at: Utc::now(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, RevisionStatus::Pending)
    }
}

impl Identifiable for BudgetRevision {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Resolution states for a revision. `Pending` transitions exactly
/// once, to `Approved` or `Rejected`.
pub enum RevisionStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RevisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RevisionStatus::Pending => "Pending",
            RevisionStatus::Approved => "Approved",
            RevisionStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}
