use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::types::Percent;
use crate::StatsResult;

/// Points below target that still count as "near" (75 % target, 70 % near).
pub const NEAR_TARGET_MARGIN: Percent = dec!(5);

/// Other-channel share the region aims for in a given year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub year: i32,
    pub value: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How a share compares with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Met,
    Near,
    Below,
}

/// Yearly targets, at least one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TargetConfig>", into = "Vec<TargetConfig>")]
pub struct TargetTable {
    targets: Vec<TargetConfig>,
}

impl TargetTable {
    pub fn new(targets: Vec<TargetConfig>) -> StatsResult<Self> {
        if targets.is_empty() {
            return Err(StatsError::InvalidInput {
                field: "targets".to_string(),
                reason: "At least one yearly target is required".to_string(),
            });
        }
        if let Some(bad) = targets
            .iter()
            .find(|t| t.value < Decimal::ZERO || t.value > dec!(100))
        {
            return Err(StatsError::InvalidInput {
                field: format!("targets[{}].value", bad.year),
                reason: format!("Target {} is outside 0..=100", bad.value),
            });
        }
        Ok(TargetTable { targets })
    }

    pub fn find(&self, year: i32) -> Option<&TargetConfig> {
        self.targets.iter().find(|t| t.year == year)
    }

    /// The target for `year`, or the most recent configured year's target
    /// when `year` has none.
    pub fn target_for_year(&self, year: i32) -> Percent {
        self.find(year)
            .or_else(|| self.targets.iter().max_by_key(|t| t.year))
            .map(|t| t.value)
            .unwrap_or_default()
    }

    /// All targets, latest year first.
    pub fn sorted_desc(&self) -> Vec<TargetConfig> {
        let mut out = self.targets.clone();
        out.sort_by(|a, b| b.year.cmp(&a.year));
        out
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        TargetTable {
            targets: vec![
                TargetConfig {
                    year: 2024,
                    value: dec!(75.0),
                    description: Some("เป้าหมายปี 2567".to_string()),
                },
                TargetConfig {
                    year: 2023,
                    value: dec!(72.0),
                    description: Some("เป้าหมายปี 2566".to_string()),
                },
            ],
        }
    }
}

impl TryFrom<Vec<TargetConfig>> for TargetTable {
    type Error = StatsError;

    fn try_from(targets: Vec<TargetConfig>) -> StatsResult<Self> {
        TargetTable::new(targets)
    }
}

impl From<TargetTable> for Vec<TargetConfig> {
    fn from(table: TargetTable) -> Self {
        table.targets
    }
}

/// Classify a share against its target.
pub fn assess(value: Percent, target: Percent) -> TargetStatus {
    if value >= target {
        TargetStatus::Met
    } else if value >= target - NEAR_TARGET_MARGIN {
        TargetStatus::Near
    } else {
        TargetStatus::Below
    }
}
