use branch_stats_core::export::EXPORT_HEADERS;
use branch_stats_core::report::{self, SnapshotInput};
use branch_stats_core::validation::record::validate_record;
use branch_stats_core::BranchRecord;
use chrono::{Datelike, Local};
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use tracing::{debug, info};

use super::Context;
use crate::input;

/// Where a single period's records come from. Without `--input` or
/// `--month`, piped stdin is used, then the daily snapshot.
#[derive(Args)]
pub struct SnapshotArgs {
    /// Path to a JSON file: a record array or `{"label", "records"}`
    #[arg(long, conflicts_with = "month")]
    pub input: Option<String>,
    /// Read `monthly/<MONTH>_Data.json` from the data directory
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,
    /// Target share to assess each branch against (0-100)
    #[arg(long)]
    pub target: Option<Decimal>,
    /// Take the target for this year from the config table
    #[arg(long, conflicts_with = "target")]
    pub year: Option<i32>,
    /// Skip the target assessment
    #[arg(long, conflicts_with_all = ["target", "year"])]
    pub no_target: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,
    /// Write a spreadsheet-ready CSV here instead of printing the rows
    #[arg(long)]
    pub out: Option<String>,
}

/// Snapshot files hold a bare array; saved report inputs hold an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Records(Vec<BranchRecord>),
    Labelled(SnapshotInput),
}

impl SnapshotFile {
    fn into_input(self, fallback_label: &str) -> SnapshotInput {
        match self {
            SnapshotFile::Records(records) => SnapshotInput {
                label: fallback_label.to_string(),
                records,
                target: None,
            },
            SnapshotFile::Labelled(mut input) => {
                if input.label.is_empty() {
                    input.label = fallback_label.to_string();
                }
                input
            }
        }
    }
}

pub fn load_snapshot(
    args: &SnapshotArgs,
    ctx: &Context,
) -> Result<SnapshotInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let file: SnapshotFile = input::file::read_json(path)?;
        return Ok(file.into_input(path));
    }
    if let Some(ref month) = args.month {
        let records = input::snapshot::read_month(&ctx.data_dir, month)?;
        return Ok(SnapshotFile::Records(records).into_input(month));
    }
    if let Some(data) = input::stdin::read_stdin()? {
        let file: SnapshotFile = serde_json::from_value(data)?;
        return Ok(file.into_input("stdin"));
    }
    let records = input::snapshot::read_daily(&ctx.data_dir)?;
    Ok(SnapshotFile::Records(records).into_input("Daily"))
}

pub fn run_overview(args: SnapshotArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&args, ctx)?;
    let result = report::overview_report(&snapshot)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_chart(args: ChartArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let mut snapshot = load_snapshot(&args.source, ctx)?;
    snapshot.target = if args.no_target {
        None
    } else if let Some(target) = args.target {
        Some(target)
    } else {
        let year = args.year.unwrap_or_else(|| Local::now().year());
        let target = ctx.config.targets.target_for_year(year);
        debug!(year, %target, "using configured target");
        Some(target)
    };
    let result = report::chart_report(&snapshot)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: SnapshotArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&args, ctx)?;
    let rows: Vec<Value> = snapshot
        .records
        .iter()
        .map(|r| {
            let verdict = validate_record(r);
            serde_json::json!({
                "ba_code": r.branch_code,
                "org_name": r.branch_name,
                "is_valid": verdict.is_valid,
                "issues": verdict.issues,
            })
        })
        .collect();
    let invalid = rows.iter().filter(|r| r["is_valid"] == false).count();
    info!(records = rows.len(), invalid, "validated snapshot");

    let mut warnings: Vec<String> = Vec::new();
    if invalid > 0 {
        warnings.push(format!("{} of {} records are inconsistent", invalid, rows.len()));
    }

    Ok(serde_json::json!({
        "result": rows,
        "methodology": "Advisory count identity checks per record",
        "assumptions": { "label": snapshot.label },
        "warnings": warnings,
    }))
}

pub fn run_export(args: ExportArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(&args.source, ctx)?;
    let result = report::export_report(&snapshot)?;

    let Some(ref path) = args.out else {
        return Ok(serde_json::to_value(result)?);
    };

    let mut file = File::create(path).map_err(|e| format!("Failed to create '{}': {}", path, e))?;
    // Spreadsheet apps need the BOM to pick UTF-8 for the Thai headers.
    file.write_all("\u{feff}".as_bytes())?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(EXPORT_HEADERS)?;
    for row in &result.result {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    info!(path = %path, rows = result.result.len(), "wrote export");

    Ok(serde_json::json!({
        "result": { "path": path, "rows": result.result.len() },
        "warnings": result.warnings,
    }))
}
