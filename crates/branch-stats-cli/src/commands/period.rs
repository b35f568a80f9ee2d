use branch_stats_core::report::{
    self, CumulativeInput, GrowthInput, SnapshotInput, StatsOverviewInput,
};
use branch_stats_core::BranchIdentity;
use clap::Args;
use serde_json::Value;
use tracing::debug;

use super::{Context, IdentityArg};
use crate::input;

#[derive(Args)]
pub struct CumulativeArgs {
    /// Path to a JSON file with `{"periods": [...], "identity"}`
    #[arg(long, conflicts_with = "months")]
    pub input: Option<String>,
    /// Months to accumulate, oldest first (default: every available month)
    #[arg(long, value_delimiter = ',')]
    pub months: Vec<String>,
    /// Branch matching across months [default: name]
    #[arg(long, value_enum)]
    pub identity: Option<IdentityArg>,
}

#[derive(Args)]
pub struct GrowthArgs {
    /// Path to a JSON file with `{"current", "previous", "identity"}`
    #[arg(long, conflicts_with_all = ["current", "previous"])]
    pub input: Option<String>,
    /// Current month (default: latest available)
    #[arg(long)]
    pub current: Option<String>,
    /// Previous month (default: the one before the current month)
    #[arg(long)]
    pub previous: Option<String>,
    /// Branch matching across months [default: code]
    #[arg(long, value_enum)]
    pub identity: Option<IdentityArg>,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Path to a JSON file with `{"daily", "monthly"}`
    #[arg(long, conflicts_with = "month")]
    pub input: Option<String>,
    /// Month the daily figures are trended against (default: latest available)
    #[arg(long)]
    pub month: Option<String>,
}

pub fn run_cumulative(args: CumulativeArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cum_input: CumulativeInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else {
        let months = if args.months.is_empty() {
            input::snapshot::available_months(&ctx.data_dir)?
        } else {
            args.months.clone()
        };
        if months.is_empty() {
            return Err("No monthly snapshots found; pass --months or --input".into());
        }
        let periods = months
            .iter()
            .map(|month| {
                Ok(SnapshotInput {
                    label: month.clone(),
                    records: input::snapshot::read_month(&ctx.data_dir, month)?,
                    target: None,
                })
            })
            .collect::<Result<Vec<_>, Box<dyn std::error::Error>>>()?;
        CumulativeInput {
            periods,
            identity: BranchIdentity::Name,
        }
    };
    if let Some(identity) = args.identity {
        cum_input.identity = identity.into();
    }

    let result = report::cumulative_report(&cum_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_growth(args: GrowthArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let mut growth_input: GrowthInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else {
        let (current, previous) = growth_months(&args, ctx)?;
        debug!(%current, %previous, "comparing months");
        GrowthInput {
            current: input::snapshot::read_month(&ctx.data_dir, &current)?,
            previous: input::snapshot::read_month(&ctx.data_dir, &previous)?,
            identity: BranchIdentity::Code,
        }
    };
    if let Some(identity) = args.identity {
        growth_input.identity = identity.into();
    }

    let result = report::growth_report(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Explicit months win; otherwise the latest available month and the one
/// listed before it.
fn growth_months(
    args: &GrowthArgs,
    ctx: &Context,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    if let (Some(current), Some(previous)) = (&args.current, &args.previous) {
        return Ok((current.clone(), previous.clone()));
    }

    let available = input::snapshot::available_months(&ctx.data_dir)?;
    let current = match &args.current {
        Some(month) => month.clone(),
        None => available
            .last()
            .cloned()
            .ok_or("No monthly snapshots found")?,
    };
    let previous = match &args.previous {
        Some(month) => month.clone(),
        None => {
            let pos = available
                .iter()
                .position(|m| *m == current)
                .ok_or_else(|| format!("Month '{}' has no snapshot", current))?;
            if pos == 0 {
                return Err(format!("No month before '{}' to compare against", current).into());
            }
            available[pos - 1].clone()
        }
    };
    Ok((current, previous))
}

pub fn run_stats(args: StatsArgs, ctx: &Context) -> Result<Value, Box<dyn std::error::Error>> {
    let stats_input: StatsOverviewInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else {
        let month = match args.month {
            Some(month) => month,
            None => input::snapshot::available_months(&ctx.data_dir)?
                .pop()
                .ok_or("No monthly snapshots found; pass --month or --input")?,
        };
        StatsOverviewInput {
            daily: input::snapshot::read_daily(&ctx.data_dir)?,
            monthly: input::snapshot::read_month(&ctx.data_dir, &month)?,
        }
    };

    let result = report::stats_overview_report(&stats_input)?;
    Ok(serde_json::to_value(result)?)
}
