use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::percent::{percent_of, safe_ratio};
use crate::format::format_count;
use crate::records::{BranchKey, BranchRecord};
use crate::types::{BranchIdentity, Percent};

/// Growth reported when the previous period had no other-channel share.
///
/// A branch going from 0 % to any positive share shows this value instead
/// of an unbounded rate. This understates real growth; revisit together
/// with the growth table's colouring.
pub const GROWTH_WITHOUT_PRIOR_ACTIVITY: Percent = Decimal::ZERO;

/// Placeholder detail for a branch with no previous-period record.
pub const MISSING_DETAIL: &str = "-";

/// Month-over-month comparison for one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub branch_code: u64,
    pub branch_name: String,
    pub current_percentage: Percent,
    /// "other/invoices", e.g. "1,234/5,678"
    pub current_detail: String,
    pub previous_percentage: Percent,
    pub previous_detail: String,
    pub growth_percent: Percent,
}

/// Compare two periods, matching branches by code.
///
/// One row per `current` record, in `current` order. Branches missing from
/// `previous` get a zero previous share and [`MISSING_DETAIL`].
pub fn compare_growth(current: &[BranchRecord], previous: &[BranchRecord]) -> Vec<GrowthRow> {
    compare_growth_by(current, previous, BranchIdentity::Code)
}

/// [`compare_growth`] with an explicit matching key.
pub fn compare_growth_by(
    current: &[BranchRecord],
    previous: &[BranchRecord],
    identity: BranchIdentity,
) -> Vec<GrowthRow> {
    // First match wins when a key repeats in `previous`.
    let mut lookup: HashMap<BranchKey, &BranchRecord> = HashMap::with_capacity(previous.len());
    for record in previous {
        lookup.entry(record.key(identity)).or_insert(record);
    }

    current
        .iter()
        .map(|cur| {
            let prev = lookup.get(&cur.key(identity)).copied();
            let current_percentage = percent_of(cur.other_channel_count, cur.invoice_count);
            let previous_percentage = prev
                .map(|p| percent_of(p.other_channel_count, p.invoice_count))
                .unwrap_or(Decimal::ZERO);

            GrowthRow {
                branch_code: cur.branch_code,
                branch_name: cur.branch_name.clone(),
                current_percentage,
                current_detail: detail(cur),
                previous_percentage,
                previous_detail: prev
                    .map(detail)
                    .unwrap_or_else(|| MISSING_DETAIL.to_string()),
                growth_percent: growth_percent(current_percentage, previous_percentage),
            }
        })
        .collect()
}

/// `(current - previous) / previous * 100`, or
/// [`GROWTH_WITHOUT_PRIOR_ACTIVITY`] when `previous` is not positive.
pub fn growth_percent(current: Percent, previous: Percent) -> Percent {
    if previous > Decimal::ZERO {
        safe_ratio(current - previous, previous) * dec!(100)
    } else {
        GROWTH_WITHOUT_PRIOR_ACTIVITY
    }
}

fn detail(record: &BranchRecord) -> String {
    format!(
        "{}/{}",
        format_count(record.other_channel_count),
        format_count(record.invoice_count)
    )
}
