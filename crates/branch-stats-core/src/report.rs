//! JSON-facing entry points used by the CLI and the Node bindings.
//!
//! Each function runs one engine operation, attaches the advisory
//! validation issues as warnings and wraps the result in the standard
//! [`ComputationOutput`] envelope. None of them fail on inconsistent data.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregation::chart::{build_chart_series, ChartPoint};
use crate::aggregation::cumulative::accumulate_periods_by;
use crate::aggregation::growth::{compare_growth_by, GrowthRow};
use crate::aggregation::overview::{
    calculate_region_overview, calculate_stats_overview, RegionOverview, StatsOverview,
};
use crate::error::StatsError;
use crate::export::{build_export_rows, ExportRow};
use crate::format::{format_thai_datetime, period_range, reported_or, PeriodRange};
use crate::records::{BranchKey, BranchRecord};
use crate::targets::{assess, TargetStatus};
use crate::types::{with_metadata, BranchIdentity, ComputationOutput, Percent};
use crate::validation::chart::validate_chart_series;
use crate::validation::record::validate_dataset;
use crate::StatsResult;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One period's records, e.g. today's snapshot or one month file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotInput {
    /// "Daily", "October", ...
    #[serde(default)]
    pub label: String,
    pub records: Vec<BranchRecord>,
    /// Target share to assess each bar against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeInput {
    /// Periods in reporting order, oldest first
    pub periods: Vec<SnapshotInput>,
    #[serde(default = "default_cumulative_identity")]
    pub identity: BranchIdentity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInput {
    pub current: Vec<BranchRecord>,
    pub previous: Vec<BranchRecord>,
    #[serde(default = "default_growth_identity")]
    pub identity: BranchIdentity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOverviewInput {
    pub daily: Vec<BranchRecord>,
    pub monthly: Vec<BranchRecord>,
}

fn default_cumulative_identity() -> BranchIdentity {
    BranchIdentity::Name
}

fn default_growth_identity() -> BranchIdentity {
    BranchIdentity::Code
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointAssessment {
    pub name: String,
    pub value: Percent,
    pub status: TargetStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartReport {
    pub series: Vec<ChartPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Percent>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub assessments: Vec<PointAssessment>,
}

/// Headline cards plus the header date line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOverviewReport {
    #[serde(flatten)]
    pub cards: StatsOverview,
    /// "20 กุมภาพันธ์ 2567 เวลา 15:30 น."; the current time when the
    /// snapshot carries no date
    pub as_of_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeReport {
    pub series: Vec<ChartPoint>,
    /// `None` when no periods were supplied
    pub period_range: Option<PeriodRange>,
}

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

pub fn overview_report(input: &SnapshotInput) -> StatsResult<ComputationOutput<RegionOverview>> {
    let start = Instant::now();
    let warnings = validate_dataset(&input.records).issues;

    let overview = calculate_region_overview(&input.records);
    debug!(records = input.records.len(), "region overview computed");

    Ok(with_metadata(
        "Region totals and invoice shares",
        &serde_json::json!({
            "label": input.label,
            "records": input.records.len(),
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        overview,
    ))
}

pub fn chart_report(input: &SnapshotInput) -> StatsResult<ComputationOutput<ChartReport>> {
    let start = Instant::now();

    if let Some(target) = input.target {
        if target < Percent::ZERO || target > Percent::ONE_HUNDRED {
            return Err(StatsError::InvalidInput {
                field: "target".to_string(),
                reason: format!("Target share {} is outside 0..=100", target),
            });
        }
    }
    let mut warnings = validate_dataset(&input.records).issues;

    let series = build_chart_series(&input.records);
    warnings.extend(validate_chart_series(&series).issues);

    let assessments = match input.target {
        Some(target) => assess_series(&series, target),
        None => Vec::new(),
    };
    debug!(points = series.len(), "chart series built");

    Ok(with_metadata(
        "Other-channel share per branch with region total",
        &serde_json::json!({
            "label": input.label,
            "records": input.records.len(),
            "target": input.target.map(|t| t.to_string()),
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        ChartReport {
            series,
            target: input.target,
            assessments,
        },
    ))
}

pub fn cumulative_report(
    input: &CumulativeInput,
) -> StatsResult<ComputationOutput<CumulativeReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for period in &input.periods {
        if period.records.is_empty() {
            warnings.push(format!("Period '{}' has no records", period.label));
        }
        warnings.extend(
            validate_dataset(&period.records)
                .issues
                .into_iter()
                .map(|issue| format!("{}: {}", period.label, issue)),
        );
    }

    let record_sets: Vec<&[BranchRecord]> =
        input.periods.iter().map(|p| p.records.as_slice()).collect();
    let series = accumulate_periods_by(&record_sets, input.identity);

    let range = match (input.periods.first(), input.periods.last()) {
        (Some(first), Some(last)) => Some(period_range(
            &first.label,
            first.records.first().and_then(|r| r.reported_date()),
            &last.label,
            last.records.first().and_then(|r| r.reported_date()),
            Local::now().naive_local(),
        )),
        _ => None,
    };
    debug!(periods = input.periods.len(), branches = series.len() - 1, "cumulative series built");

    Ok(with_metadata(
        "Cumulative other-channel share across periods",
        &serde_json::json!({
            "periods": input.periods.iter().map(|p| p.label.as_str()).collect::<Vec<_>>(),
            "identity": input.identity,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        CumulativeReport {
            series,
            period_range: range,
        },
    ))
}

pub fn growth_report(input: &GrowthInput) -> StatsResult<ComputationOutput<Vec<GrowthRow>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rows = compare_growth_by(&input.current, &input.previous, input.identity);
    let previous_keys: HashSet<BranchKey> =
        input.previous.iter().map(|r| r.key(input.identity)).collect();
    let unmatched = input
        .current
        .iter()
        .filter(|r| !previous_keys.contains(&r.key(input.identity)))
        .count();
    if unmatched > 0 {
        warnings.push(format!(
            "{} branch(es) have no previous-period record; growth shown as 0",
            unmatched
        ));
    }
    debug!(rows = rows.len(), unmatched, "growth rows built");

    Ok(with_metadata(
        "Month-over-month change in other-channel share",
        &serde_json::json!({
            "current_records": input.current.len(),
            "previous_records": input.previous.len(),
            "identity": input.identity,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        rows,
    ))
}

pub fn stats_overview_report(
    input: &StatsOverviewInput,
) -> StatsResult<ComputationOutput<StatsOverviewReport>> {
    stats_overview_report_at(input, Local::now().naive_local())
}

/// [`stats_overview_report`] with an explicit "now" for the header date.
pub fn stats_overview_report_at(
    input: &StatsOverviewInput,
    now: NaiveDateTime,
) -> StatsResult<ComputationOutput<StatsOverviewReport>> {
    let start = Instant::now();
    let mut warnings = validate_dataset(&input.daily).issues;
    if input.daily.is_empty() {
        warnings.push("No daily records; top branch unavailable".to_string());
    }

    let cards = calculate_stats_overview(&input.daily, &input.monthly);
    if cards.overview.as_of_date.is_none() {
        warnings.push("Daily snapshot has no date; header shows the current time".to_string());
    }
    let as_of_display =
        format_thai_datetime(&reported_or(cards.overview.as_of_date.as_deref(), now));

    Ok(with_metadata(
        "Daily headline cards with trend against month-to-date",
        &serde_json::json!({
            "daily_records": input.daily.len(),
            "monthly_records": input.monthly.len(),
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        StatsOverviewReport {
            cards,
            as_of_display,
        },
    ))
}

pub fn export_report(input: &SnapshotInput) -> StatsResult<ComputationOutput<Vec<ExportRow>>> {
    let start = Instant::now();
    let warnings = validate_dataset(&input.records).issues;
    let rows = build_export_rows(&input.records);

    Ok(with_metadata(
        "Per-branch export rows with formatted shares",
        &serde_json::json!({ "label": input.label, "records": rows.len() }),
        warnings,
        start.elapsed().as_micros() as u64,
        rows,
    ))
}

fn assess_series(series: &[ChartPoint], target: Percent) -> Vec<PointAssessment> {
    series
        .iter()
        .map(|p| PointAssessment {
            name: p.name().to_string(),
            value: p.value(),
            status: assess(p.value(), target),
        })
        .collect()
}
