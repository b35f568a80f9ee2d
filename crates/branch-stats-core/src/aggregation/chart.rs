use serde::{Deserialize, Serialize};

use super::overview::calculate_region_overview;
use super::percent::percent_of;
use crate::records::BranchRecord;
use crate::types::{Count, Percent, REGION_TOTAL_LABEL};

/// One bar of a performance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    /// Other-channel share of invoices, in percent
    pub value: Percent,
    pub total_invoices: Count,
    pub other_channel: Count,
    pub counter_service: Count,
    pub total_paid: Count,
    pub total_debt: Count,
}

/// A chart bar tagged by origin.
///
/// The region row is told apart by variant, so a real branch that happens
/// to be named like the region label is still a `Branch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartPoint {
    Branch(SeriesPoint),
    RegionTotal(SeriesPoint),
}

impl ChartPoint {
    pub fn point(&self) -> &SeriesPoint {
        match self {
            ChartPoint::Branch(p) | ChartPoint::RegionTotal(p) => p,
        }
    }

    pub fn name(&self) -> &str {
        &self.point().name
    }

    pub fn value(&self) -> Percent {
        self.point().value
    }

    pub fn is_region_total(&self) -> bool {
        matches!(self, ChartPoint::RegionTotal(_))
    }
}

/// Build a region-total point from summed counts.
pub(crate) fn region_point(
    value: Percent,
    total_invoices: Count,
    other_channel: Count,
    counter_service: Count,
    total_paid: Count,
    total_debt: Count,
) -> ChartPoint {
    ChartPoint::RegionTotal(SeriesPoint {
        name: REGION_TOTAL_LABEL.to_string(),
        value,
        total_invoices,
        other_channel,
        counter_service,
        total_paid,
        total_debt,
    })
}

fn branch_point(record: &BranchRecord) -> ChartPoint {
    ChartPoint::Branch(SeriesPoint {
        name: record.branch_name.clone(),
        value: percent_of(record.other_channel_count, record.invoice_count),
        total_invoices: record.invoice_count,
        other_channel: record.other_channel_count,
        counter_service: record.counter_count,
        total_paid: record.paid_count,
        total_debt: record.debt_count,
    })
}

/// One point per record, in input order, followed by the region total.
/// Always returns `records.len() + 1` points.
pub fn build_chart_series(records: &[BranchRecord]) -> Vec<ChartPoint> {
    let region = calculate_region_overview(records);

    let mut series: Vec<ChartPoint> = Vec::with_capacity(records.len() + 1);
    series.extend(records.iter().map(branch_point));
    series.push(region_point(
        region.other_percentage,
        region.totals.invoice_count,
        region.totals.other_channel_count,
        region.totals.counter_count,
        region.totals.paid_count,
        region.totals.debt_count,
    ));
    series
}
