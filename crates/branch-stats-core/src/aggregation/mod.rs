pub mod chart;
pub mod cumulative;
pub mod growth;
pub mod overview;
pub mod percent;
