use branch_stats_core::targets::TargetTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "bstats.yaml";

/// Dashboard settings, read from YAML. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Root holding `daily/DailyData.json` and `monthly/<Month>_Data.json`
    pub data_dir: PathBuf,
    /// How often the dashboard re-polls the snapshots
    pub refresh_interval_minutes: u64,
    pub targets: TargetTable,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "PWA Always On Statistics Dashboard".to_string(),
            data_dir: PathBuf::from("public/data"),
            refresh_interval_minutes: 15,
            targets: TargetTable::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from an explicit path, else from `bstats.yaml` if present, else
    /// defaults. An explicit path that does not exist is an error.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => Self::from_file(Path::new(p)),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        let config = Self::from_yaml(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", path.display(), e))?;
        info!(path = %path.display(), data_dir = %config.data_dir.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }
}
