use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seed templates offered when a new budget's category editor opens.
/// Reference data only; never derived from any persisted budget.
pub static DEFAULT_CATEGORIES: Lazy<Vec<CategoryTemplate>> = Lazy::new(|| {
    vec![
        CategoryTemplate::new("Development", "#3B82F6", "Engineering and implementation work"),
        CategoryTemplate::new("Design", "#8B5CF6", "UX, UI, and visual design"),
        CategoryTemplate::new("Marketing", "#F59E0B", "Promotion, content, and campaigns"),
        CategoryTemplate::new("Operations", "#10B981", "Project management and coordination"),
        CategoryTemplate::new("Infrastructure", "#06B6D4", "Hosting, licenses, and tooling"),
        CategoryTemplate::new("Contingency", "#EF4444", "Reserve for unplanned costs"),
    ]
});

/// Returns the static category template table.
pub fn default_categories() -> &'static [CategoryTemplate] {
    &DEFAULT_CATEGORIES
}

/// A named, colored category seed used to pre-populate new budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTemplate {
    pub name: String,
    pub color: String,
    pub description: String,
}

impl CategoryTemplate {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: description.into(),
        }
    }
}

/// Stores workspace-level ledger preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    pub locale: String,
    /// Utilization percentage at which a category turns `Warning`.
    #[serde(default = "Config::default_warning_threshold")]
    pub warning_threshold: Decimal,
    /// Utilization percentage at which a category turns `Critical`.
    #[serde(default = "Config::default_critical_threshold")]
    pub critical_threshold: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            locale: "en-US".into(),
            warning_threshold: Self::default_warning_threshold(),
            critical_threshold: Self::default_critical_threshold(),
        }
    }
}

impl Config {
    pub fn default_warning_threshold() -> Decimal {
        Decimal::from(75)
    }

    pub fn default_critical_threshold() -> Decimal {
        Decimal::from(90)
    }
}
