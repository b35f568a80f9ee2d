//! Advisory data-quality checks. Nothing here blocks a computation; the
//! verdicts are surfaced next to the numbers they concern.

pub mod chart;
pub mod record;

use serde::{Deserialize, Serialize};

/// Verdict plus human-readable issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub(crate) fn from_issues(issues: Vec<String>) -> Self {
        ValidationReport {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}
