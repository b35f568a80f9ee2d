pub mod catalog;
pub mod period;
pub mod snapshot;

use branch_stats_core::BranchIdentity;
use clap::ValueEnum;
use std::path::PathBuf;

use crate::config::DashboardConfig;

/// Settings resolved once in `main` and shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: DashboardConfig,
}

/// How records from different files are matched to the same branch.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IdentityArg {
    Code,
    Name,
}

impl From<IdentityArg> for BranchIdentity {
    fn from(arg: IdentityArg) -> Self {
        match arg {
            IdentityArg::Code => BranchIdentity::Code,
            IdentityArg::Name => BranchIdentity::Name,
        }
    }
}
