use branch_stats_core::report;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::prelude::ToPrimitive;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Single snapshot
// ---------------------------------------------------------------------------

#[napi]
pub fn region_overview(input_json: String) -> NapiResult<String> {
    let input: report::SnapshotInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::overview_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn chart_series(input_json: String) -> NapiResult<String> {
    let input: report::SnapshotInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::chart_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn export_rows(input_json: String) -> NapiResult<String> {
    let input: report::SnapshotInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::export_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes a bare record array, as served from `DailyData.json`.
#[napi]
pub fn validate_records(records_json: String) -> NapiResult<String> {
    let records: Vec<branch_stats_core::BranchRecord> =
        serde_json::from_str(&records_json).map_err(to_napi_error)?;
    let output = branch_stats_core::validation::record::validate_dataset(&records);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Multi-period
// ---------------------------------------------------------------------------

#[napi]
pub fn cumulative_stats(input_json: String) -> NapiResult<String> {
    let input: report::CumulativeInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::cumulative_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn monthly_growth(input_json: String) -> NapiResult<String> {
    let input: report::GrowthInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::growth_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn stats_overview(input_json: String) -> NapiResult<String> {
    let input: report::StatsOverviewInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::stats_overview_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Order month names (`["March", "January"]`) by calendar month.
#[napi]
pub fn sort_months(months_json: String) -> NapiResult<String> {
    let mut months: Vec<String> = serde_json::from_str(&months_json).map_err(to_napi_error)?;
    branch_stats_core::format::sort_month_names(&mut months);
    serde_json::to_string(&months).map_err(to_napi_error)
}

#[napi]
pub fn target_for_year(year: i32, targets_json: Option<String>) -> NapiResult<f64> {
    let table: branch_stats_core::targets::TargetTable = match targets_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => branch_stats_core::targets::TargetTable::default(),
    };
    Ok(table.target_for_year(year).to_f64().unwrap_or_default())
}
