use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ValidationReport;
use crate::aggregation::chart::ChartPoint;

/// Sanity checks before a series is plotted: non-empty, every share within
/// 0..=100, and a region-total bar present.
pub fn validate_chart_series(series: &[ChartPoint]) -> ValidationReport {
    if series.is_empty() {
        return ValidationReport::from_issues(vec!["No data to chart".to_string()]);
    }

    let mut issues: Vec<String> = series
        .iter()
        .filter(|p| p.value() < Decimal::ZERO || p.value() > dec!(100))
        .map(|p| format!("Share out of range at {}: {}%", p.name(), p.value()))
        .collect();

    if !series.iter().any(ChartPoint::is_region_total) {
        issues.push("Region total is missing".to_string());
    }

    ValidationReport::from_issues(issues)
}
