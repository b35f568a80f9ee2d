use branch_stats_core::format::thai_month_name;
use chrono::{Datelike, Local};
use clap::Args;
use serde_json::Value;

use super::Context;
use crate::input;

#[derive(Args)]
pub struct TargetsArgs {
    /// Show only the target that applies to this year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Months with a snapshot file, in calendar order.
pub fn run_months(ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let months = input::snapshot::available_months(&ctx.data_dir)?;
    let rows: Vec<Value> = months
        .iter()
        .map(|m| serde_json::json!({ "month": m, "thai": thai_month_name(m) }))
        .collect();
    Ok(serde_json::json!({ "result": rows }))
}

pub fn run_targets(args: TargetsArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let table = &ctx.config.targets;
    match args.year {
        Some(year) => Ok(serde_json::json!({
            "result": {
                "year": year,
                "value": table.target_for_year(year),
                "configured": table.find(year).is_some(),
            }
        })),
        None => Ok(serde_json::json!({
            "result": table.sorted_desc(),
            "assumptions": { "current_year": Local::now().year() },
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    fn context(dir: &std::path::Path) -> Context {
        Context {
            data_dir: dir.to_path_buf(),
            config: DashboardConfig::default(),
        }
    }

    #[test]
    fn test_targets_fallback_year() {
        let ctx = context(std::path::Path::new("."));
        let value = run_targets(TargetsArgs { year: Some(2031) }, &ctx).unwrap();
        assert_eq!(value["result"]["configured"], false);
        assert_eq!(value["result"]["value"], "75.0");

        let value = run_targets(TargetsArgs { year: None }, &ctx).unwrap();
        assert_eq!(value["result"][0]["year"], 2024);
    }

    #[test]
    fn test_months_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_months(&context(dir.path())).is_err());
    }

    #[test]
    fn test_months_with_thai_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("monthly")).unwrap();
        std::fs::write(dir.path().join("monthly").join("May_Data.json"), "[]").unwrap();
        let value = run_months(&context(dir.path())).unwrap();
        assert_eq!(value["result"][0]["month"], "May");
        assert_eq!(value["result"][0]["thai"], "พฤษภาคม");
    }
}
