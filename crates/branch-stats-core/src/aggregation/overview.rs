use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::percent::{percent_of, trend};
use crate::records::BranchRecord;
use crate::types::{Count, Money, Percent, REGION_TOTAL_LABEL};

// ---------------------------------------------------------------------------
// Region overview
// ---------------------------------------------------------------------------

/// Sums of every numeric field across a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionTotals {
    pub counter_count: Count,
    pub other_channel_count: Count,
    pub paid_count: Count,
    pub invoice_count: Count,
    pub debt_count: Count,
    pub debt_amount: Money,
}

impl RegionTotals {
    fn add(&mut self, record: &BranchRecord) {
        self.counter_count += record.counter_count;
        self.other_channel_count += record.other_channel_count;
        self.paid_count += record.paid_count;
        self.invoice_count += record.invoice_count;
        self.debt_count += record.debt_count;
        self.debt_amount += record.debt_amount;
    }
}

/// Region-wide totals and shares of invoices, one per record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOverview {
    pub name: String,
    /// Snapshot date of the first record; `None` when the set is empty or
    /// the first record has no date.
    pub as_of_date: Option<String>,
    #[serde(flatten)]
    pub totals: RegionTotals,
    pub counter_percentage: Percent,
    pub other_percentage: Percent,
    pub paid_percentage: Percent,
    pub debt_percentage: Percent,
}

/// Fold a record set into region totals and the four invoice shares.
///
/// Summation is order independent; only `as_of_date` depends on which
/// record comes first.
pub fn calculate_region_overview(records: &[BranchRecord]) -> RegionOverview {
    let mut totals = RegionTotals::default();
    for record in records {
        totals.add(record);
    }

    RegionOverview {
        name: REGION_TOTAL_LABEL.to_string(),
        as_of_date: records
            .first()
            .and_then(|r| r.reported_date())
            .map(str::to_string),
        counter_percentage: percent_of(totals.counter_count, totals.invoice_count),
        other_percentage: percent_of(totals.other_channel_count, totals.invoice_count),
        paid_percentage: percent_of(totals.paid_count, totals.invoice_count),
        debt_percentage: percent_of(totals.debt_count, totals.invoice_count),
        totals,
    }
}

// ---------------------------------------------------------------------------
// Stats overview (daily vs month-to-date cards)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewCard {
    pub total_invoices: Count,
    pub total_counter: Count,
    pub total_other: Count,
    pub counter_percentage: Percent,
    pub other_percentage: Percent,
    /// Daily other-channel share relative to the monthly share, in percent
    pub trend: Percent,
    pub as_of_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStats {
    pub total_paid: Count,
    pub total_debt: Count,
    pub paid_percentage: Percent,
    pub debt_percentage: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBill {
    pub total: Money,
    pub paid: Count,
    pub debt: Count,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBranch {
    pub name: String,
    pub percentage: Percent,
    pub total_invoices: Count,
}

/// Headline cards for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsOverview {
    pub overview: OverviewCard,
    pub payment_stats: PaymentStats,
    pub water_bill: WaterBill,
    /// Branch with the highest other-channel share today; `None` when there
    /// is no daily data.
    pub top_branch: Option<TopBranch>,
}

/// Build the headline cards from today's snapshot and the month-to-date
/// snapshot.
pub fn calculate_stats_overview(daily: &[BranchRecord], monthly: &[BranchRecord]) -> StatsOverview {
    let day = calculate_region_overview(daily);
    let month = calculate_region_overview(monthly);

    StatsOverview {
        overview: OverviewCard {
            total_invoices: day.totals.invoice_count,
            total_counter: day.totals.counter_count,
            total_other: day.totals.other_channel_count,
            counter_percentage: day.counter_percentage,
            other_percentage: day.other_percentage,
            trend: trend(day.other_percentage, month.other_percentage),
            as_of_date: day.as_of_date.clone(),
        },
        payment_stats: PaymentStats {
            total_paid: day.totals.paid_count,
            total_debt: day.totals.debt_count,
            paid_percentage: day.paid_percentage,
            debt_percentage: day.debt_percentage,
        },
        water_bill: WaterBill {
            total: day.totals.debt_amount,
            paid: day.totals.paid_count,
            debt: day.totals.debt_count,
        },
        top_branch: find_top_branch(daily),
    }
}

/// Highest other-channel share; the earliest record wins a tie.
fn find_top_branch(records: &[BranchRecord]) -> Option<TopBranch> {
    let mut best: Option<(&BranchRecord, Decimal)> = None;
    for record in records {
        let pct = percent_of(record.other_channel_count, record.invoice_count);
        match best {
            Some((_, best_pct)) if pct <= best_pct => {}
            _ => best = Some((record, pct)),
        }
    }

    best.map(|(record, percentage)| TopBranch {
        name: record.branch_name.clone(),
        percentage,
        total_invoices: record.invoice_count,
    })
}
