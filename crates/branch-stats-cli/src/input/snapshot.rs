//! Layout of the snapshot directory written by the nightly export job:
//!
//! ```text
//! <data_dir>/daily/DailyData.json
//! <data_dir>/monthly/<MonthName>_Data.json
//! ```

use branch_stats_core::format::sort_month_names;
use branch_stats_core::BranchRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::file::read_json_path;

const DAILY_FILE: &str = "DailyData.json";
const MONTHLY_SUFFIX: &str = "_Data.json";

pub fn daily_path(data_dir: &Path) -> PathBuf {
    data_dir.join("daily").join(DAILY_FILE)
}

pub fn month_path(data_dir: &Path, month: &str) -> PathBuf {
    data_dir
        .join("monthly")
        .join(format!("{}{}", month, MONTHLY_SUFFIX))
}

pub fn read_daily(data_dir: &Path) -> Result<Vec<BranchRecord>, Box<dyn std::error::Error>> {
    let path = daily_path(data_dir);
    let records: Vec<BranchRecord> = read_json_path(&path)?;
    debug!(path = %path.display(), records = records.len(), "read daily snapshot");
    Ok(records)
}

pub fn read_month(
    data_dir: &Path,
    month: &str,
) -> Result<Vec<BranchRecord>, Box<dyn std::error::Error>> {
    if month.contains(['/', '\\']) || month.contains("..") {
        return Err(format!("Invalid month name '{}'", month).into());
    }
    let path = month_path(data_dir, month);
    if !path.is_file() {
        return Err(format!("No snapshot for month '{}' ({})", month, path.display()).into());
    }
    let records: Vec<BranchRecord> = read_json_path(&path)?;
    debug!(month, records = records.len(), "read monthly snapshot");
    Ok(records)
}

/// Month names with a snapshot file, in calendar order.
pub fn available_months(data_dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let dir = data_dir.join("monthly");
    let entries = fs::read_dir(&dir)
        .map_err(|e| format!("Failed to list '{}': {}", dir.display(), e))?;

    let mut months: Vec<String> = Vec::new();
    for entry in entries {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            warn!(?name, "skipping non UTF-8 file name");
            continue;
        };
        if let Some(month) = name.strip_suffix(MONTHLY_SUFFIX) {
            months.push(month.to_string());
        }
    }
    // read_dir order is platform dependent
    months.sort();
    sort_month_names(&mut months);
    Ok(months)
}
