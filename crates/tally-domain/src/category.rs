//! Domain type for a budget's named sub-allocations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity};

/// A named slice of a budget's total amount.
///
/// Categories are owned exclusively by one budget and are replaced
/// wholesale when the budget is edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetCategory {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub name: String,
    pub allocated_amount: Decimal,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sort_order: u32,
}

impl BudgetCategory {
    pub fn new(
        budget_id: Uuid,
        name: impl Into<String>,
        allocated_amount: Decimal,
        color: impl Into<String>,
        sort_order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            budget_id,
            name: name.into(),
            allocated_amount,
            color: color.into(),
            description: None,
            sort_order,
        }
    }
}

impl Identifiable for BudgetCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for BudgetCategory {
    fn name(&self) -> &str {
        &self.name
    }
}
