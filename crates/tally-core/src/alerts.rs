//! Utilization-threshold alerting.
//!
//! Classification is stateless; event emission happens only on a
//! level transition so downstream notification dispatch never sees
//! duplicates for an unchanged state.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use tally_config::Config;
use tally_domain::CategoryUtilization;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Alert state derived from a category's utilization percentage.
pub enum AlertLevel {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::Ok => "Ok",
            AlertLevel::Warning => "Warning",
            AlertLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Percentage cut-offs for the warning and critical levels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlertThresholds {
    pub warning: Decimal,
    pub critical: Decimal,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            warning: Decimal::from(75),
            critical: Decimal::from(90),
        }
    }
}

impl AlertThresholds {
    pub fn new(warning: Decimal, critical: Decimal) -> CoreResult<Self> {
        if warning >= critical {
            return Err(CoreError::validation(
                "thresholds",
                "warning threshold must be below the critical threshold",
            ));
        }
        Ok(Self { warning, critical })
    }

    pub fn from_config(config: &Config) -> CoreResult<Self> {
        Self::new(config.warning_threshold, config.critical_threshold)
    }
}

/// Emitted when a category's alert level changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEvent {
    pub category_id: Uuid,
    pub category_name: String,
    pub previous: AlertLevel,
    pub current: AlertLevel,
    pub utilization_percent: Decimal,
}

/// Classifies utilization percentages against fixed thresholds.
pub struct AlertEvaluator {
    thresholds: AlertThresholds,
}

impl AlertEvaluator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn level(&self, utilization_percent: Decimal) -> AlertLevel {
        if utilization_percent >= self.thresholds.critical {
            AlertLevel::Critical
        } else if utilization_percent >= self.thresholds.warning {
            AlertLevel::Warning
        } else {
            AlertLevel::Ok
        }
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}

/// Tracks last-known alert levels per category and surfaces an event
/// only when a level changes. Callers that cache alert state
/// externally can use [`AlertEvaluator::level`] directly instead.
pub struct AlertMonitor {
    evaluator: AlertEvaluator,
    last_seen: HashMap<Uuid, AlertLevel>,
}

impl AlertMonitor {
    pub fn new(evaluator: AlertEvaluator) -> Self {
        Self {
            evaluator,
            last_seen: HashMap::new(),
        }
    }

    /// Feeds a freshly computed utilization view through the
    /// evaluator. Categories start at `Ok`.
    pub fn observe(&mut self, view: &CategoryUtilization) -> Option<AlertEvent> {
        let current = self.evaluator.level(view.utilization_percent);
        let previous = self
            .last_seen
            .insert(view.category_id, current)
            .unwrap_or_default();
        if previous == current {
            return None;
        }
        let event = AlertEvent {
            category_id: view.category_id,
            category_name: view.name.clone(),
            previous,
            current,
            utilization_percent: view.utilization_percent,
        };
        if current == AlertLevel::Critical {
            warn!(
                category = %event.category_name,
                percent = %event.utilization_percent,
                "category crossed the critical utilization threshold"
            );
        } else {
            info!(
                category = %event.category_name,
                %previous,
                %current,
                "category alert level changed"
            );
        }
        Some(event)
    }
}

impl Default for AlertMonitor {
    fn default() -> Self {
        Self::new(AlertEvaluator::default())
    }
}
