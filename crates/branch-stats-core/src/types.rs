use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary amounts (outstanding water bills). Never f64.
pub type Money = Decimal;

/// Percentages on the 0..100 scale (40 means 40 %), not fractions.
pub type Percent = Decimal;

/// Non-negative record counts.
pub type Count = u64;

/// Label of the synthetic region-wide row appended to every series.
pub const REGION_TOTAL_LABEL: &str = "ภาพรวมเขต";

/// How two records are recognised as the same branch.
///
/// Snapshot files carry both a numeric code and a display name, and the
/// dashboard has historically grouped by either depending on the view.
/// Names are not guaranteed unique, so `Code` is the safer key when both
/// datasets come from the same source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchIdentity {
    Code,
    Name,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
