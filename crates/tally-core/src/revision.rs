//! Approval-gated amendments to a budget's total amount.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use tally_domain::{BudgetBook, BudgetRevision, RevisionStatus, MAX_BUDGET_AMOUNT};

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevisionDecision {
    Approve,
    Reject,
}

/// Gates changes to a budget total behind a single-transition
/// approval step.
pub struct RevisionTracker;

impl RevisionTracker {
    /// Records a pending revision, capturing the budget's current
    /// total as the immutable `previous_amount`.
    pub fn propose(
        book: &mut BudgetBook,
        budget_id: Uuid,
        new_amount: Decimal,
        reason: impl Into<String>,
        proposed_by: Uuid,
    ) -> CoreResult<Uuid> {
        let budget = book
            .budget(budget_id)
            .ok_or(CoreError::BudgetNotFound(budget_id))?;
        if budget.status.is_archived() {
            return Err(CoreError::validation(
                "budget",
                "archived budgets cannot be revised",
            ));
        }
        if new_amount <= Decimal::ZERO {
            return Err(CoreError::validation(
                "new_amount",
                "proposed amount must be positive",
            ));
        }
        if new_amount > MAX_BUDGET_AMOUNT {
            return Err(CoreError::validation(
                "new_amount",
                format!("proposed amount must not exceed {MAX_BUDGET_AMOUNT}"),
            ));
        }
        if new_amount == budget.total_amount {
            return Err(CoreError::validation(
                "new_amount",
                "proposed amount equals the current total",
            ));
        }

        let revision = BudgetRevision::new(
            budget_id,
            budget.total_amount,
            new_amount,
            reason,
            proposed_by,
        );
        let revision_id = book.add_revision(revision);
        info!(%revision_id, %budget_id, "budget revision proposed");
        Ok(revision_id)
    }

    /// Resolves a pending revision. Approval re-validates the
    /// allocation-sum invariant against the new total and applies the
    /// budget write together with the status stamp; on violation the
    /// revision stays pending and the budget is untouched.
    pub fn resolve(
        book: &mut BudgetBook,
        revision_id: Uuid,
        decision: RevisionDecision,
        approver_id: Uuid,
    ) -> CoreResult<()> {
        let revision = book
            .revision(revision_id)
            .ok_or(CoreError::RevisionNotFound(revision_id))?;
        if !revision.is_pending() {
            return Err(CoreError::AlreadyResolved(revision_id));
        }
        let budget_id = revision.budget_id;
        let new_amount = revision.new_amount;

        if decision == RevisionDecision::Approve {
            if book.budget(budget_id).is_none() {
                return Err(CoreError::BudgetNotFound(budget_id));
            }
            let allocated: Decimal = book
                .categories_for(budget_id)
                .iter()
                .map(|category| category.allocated_amount)
                .sum();
            if allocated > new_amount {
                warn!(
                    %revision_id,
                    %budget_id,
                    %allocated,
                    %new_amount,
                    "revision approval rejected: allocations exceed revised total"
                );
                return Err(CoreError::AllocationExceedsRevisedTotal {
                    allocated,
                    new_total: new_amount,
                });
            }
        }

        let now = Utc::now();
        let revision = book
            .revision_mut(revision_id)
            .ok_or(CoreError::RevisionNotFound(revision_id))?;
        revision.status = match decision {
            RevisionDecision::Approve => RevisionStatus::Approved,
            RevisionDecision::Reject => RevisionStatus::Rejected,
        };
        revision.approved_by = Some(approver_id);
        revision.resolved_at = Some(now);

        if decision == RevisionDecision::Approve {
            let budget = book
                .budget_mut(budget_id)
                .ok_or(CoreError::BudgetNotFound(budget_id))?;
            budget.total_amount = new_amount;
            budget.updated_at = now;
        }
        book.touch();
        info!(%revision_id, %budget_id, ?decision, "budget revision resolved");
        Ok(())
    }
}
