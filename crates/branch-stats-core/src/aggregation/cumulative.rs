use std::collections::HashMap;

use super::chart::{region_point, ChartPoint, SeriesPoint};
use super::percent::percent_of;
use crate::records::{BranchKey, BranchRecord};
use crate::types::BranchIdentity;

/// Running totals per branch across several periods (e.g. the months of a
/// fiscal year), followed by the region total.
///
/// Branches are grouped by display name. Output order is the order in which
/// each branch is first seen, scanning periods then records.
pub fn accumulate_periods<P: AsRef<[BranchRecord]>>(periods: &[P]) -> Vec<ChartPoint> {
    accumulate_periods_by(periods, BranchIdentity::Name)
}

/// [`accumulate_periods`] with an explicit grouping key. Under
/// `BranchIdentity::Code` the first name seen for a code is displayed.
pub fn accumulate_periods_by<P: AsRef<[BranchRecord]>>(
    periods: &[P],
    identity: BranchIdentity,
) -> Vec<ChartPoint> {
    let mut index: HashMap<BranchKey, usize> = HashMap::new();
    let mut branches: Vec<SeriesPoint> = Vec::new();

    for record in periods.iter().flat_map(|p| p.as_ref()) {
        let slot = *index.entry(record.key(identity)).or_insert_with(|| {
            branches.push(SeriesPoint {
                name: record.branch_name.clone(),
                value: Default::default(),
                total_invoices: 0,
                other_channel: 0,
                counter_service: 0,
                total_paid: 0,
                total_debt: 0,
            });
            branches.len() - 1
        });

        let entry = &mut branches[slot];
        entry.total_invoices += record.invoice_count;
        entry.other_channel += record.other_channel_count;
        entry.counter_service += record.counter_count;
        entry.total_paid += record.paid_count;
        entry.total_debt += record.debt_count;
        entry.value = percent_of(entry.other_channel, entry.total_invoices);
    }

    let (mut invoices, mut other, mut counter, mut paid, mut debt) = (0, 0, 0, 0, 0);
    for b in &branches {
        invoices += b.total_invoices;
        other += b.other_channel;
        counter += b.counter_service;
        paid += b.total_paid;
        debt += b.total_debt;
    }

    let mut series: Vec<ChartPoint> = branches.into_iter().map(ChartPoint::Branch).collect();
    series.push(region_point(
        percent_of(other, invoices),
        invoices,
        other,
        counter,
        paid,
        debt,
    ));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(code: u64, name: &str, other: u64, invoice: u64) -> BranchRecord {
        BranchRecord {
            branch_code: code,
            branch_name: name.to_string(),
            counter_count: invoice - other,
            other_channel_count: other,
            paid_count: invoice,
            invoice_count: invoice,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_periods_single_branch() {
        let periods = vec![vec![record(1, "A", 10, 100)], vec![record(1, "A", 50, 200)]];
        let series = accumulate_periods(&periods);
        assert_eq!(series.len(), 2);
        let a = series[0].point();
        assert_eq!(a.total_invoices, 300);
        assert_eq!(a.other_channel, 60);
        assert_eq!(a.value, dec!(20));
        assert!(series[1].is_region_total());
        assert_eq!(series[1].value(), dec!(20));
    }

    #[test]
    fn test_first_seen_order_not_sorted() {
        let periods = vec![
            vec![record(2, "Zeta", 1, 10)],
            vec![record(1, "Alpha", 1, 10), record(2, "Zeta", 1, 10)],
            vec![record(3, "Mid", 1, 10)],
        ];
        let names: Vec<String> = accumulate_periods(&periods)
            .iter()
            .filter(|p| !p.is_region_total())
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_totals_independent_of_period_order() {
        let p1 = vec![record(1, "A", 10, 100), record(2, "B", 5, 10)];
        let p2 = vec![record(2, "B", 7, 30), record(1, "A", 90, 100)];
        let forward = accumulate_periods(&[p1.clone(), p2.clone()]);
        let backward = accumulate_periods(&[p2, p1]);

        let find = |s: &[ChartPoint], n: &str| s.iter().find(|p| p.name() == n).cloned().unwrap();
        for name in ["A", "B"] {
            assert_eq!(find(forward.as_slice(), name), find(backward.as_slice(), name));
        }
        assert_eq!(forward.last(), backward.last());
        // Positions follow first sight
        assert_eq!(forward[0].name(), "A");
        assert_eq!(backward[0].name(), "B");
    }

    #[test]
    fn test_zero_invoices_guarded() {
        let periods = vec![vec![record(1, "Idle", 0, 0)]];
        let series = accumulate_periods(&periods);
        assert_eq!(series[0].value(), Decimal::ZERO);
        assert_eq!(series[1].value(), Decimal::ZERO);
    }

    #[test]
    fn test_no_periods_gives_region_only() {
        let series = accumulate_periods::<Vec<BranchRecord>>(&[]);
        assert_eq!(series.len(), 1);
        assert!(series[0].is_region_total());
    }

    #[test]
    fn test_group_by_code_keeps_first_name() {
        let periods = vec![
            vec![record(1, "Old Name", 10, 100)],
            vec![record(1, "New Name", 30, 100)],
        ];
        let by_name = accumulate_periods(&periods);
        assert_eq!(by_name.len(), 3);

        let by_code = accumulate_periods_by(&periods, BranchIdentity::Code);
        assert_eq!(by_code.len(), 2);
        assert_eq!(by_code[0].name(), "Old Name");
        assert_eq!(by_code[0].value(), dec!(20));
    }
}
