//! Domain type for a project's budget envelope.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{BudgetStatus, Identifiable, PeriodType};

/// The monetary envelope allocated to one project for a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub project_id: Uuid,
    pub total_amount: Decimal,
    pub currency: String,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: BudgetStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        project_id: Uuid,
        total_amount: Decimal,
        currency: impl Into<String>,
        period_type: PeriodType,
        start_date: NaiveDate,
        created_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            total_amount,
            currency: currency.into(),
            period_type,
            start_date,
            end_date: None,
            description: None,
            status: BudgetStatus::Active,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` when this budget's date range touches the given
    /// range. An absent end date means the range is open-ended.
    pub fn overlaps(&self, start: NaiveDate, end: Option<NaiveDate>) -> bool {
        let starts_before_other_ends = end.map_or(true, |e| self.start_date <= e);
        let other_starts_before_end = self.end_date.map_or(true, |e| start <= e);
        starts_before_other_ends && other_starts_before_end
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}
