pub mod error;
pub mod format;
pub mod records;
pub mod types;

#[cfg(feature = "aggregation")]
pub mod aggregation;

#[cfg(feature = "validation")]
pub mod validation;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "targets")]
pub mod targets;

#[cfg(feature = "report")]
pub mod report;

pub use error::StatsError;
pub use records::BranchRecord;
pub use types::*;

/// Standard result type for all branch-stats operations
pub type StatsResult<T> = Result<T, StatsError>;
