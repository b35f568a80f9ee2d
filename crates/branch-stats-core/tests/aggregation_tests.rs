use branch_stats_core::aggregation::{chart, cumulative, growth, overview};
use branch_stats_core::{BranchRecord, REGION_TOTAL_LABEL};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

/// A record that satisfies both count identities.
fn branch(code: u64, name: &str, counter: u64, other: u64, debt: u64) -> BranchRecord {
    BranchRecord {
        branch_code: code,
        branch_name: name.to_string(),
        counter_count: counter,
        other_channel_count: other,
        paid_count: counter + other,
        invoice_count: counter + other + debt,
        debt_count: debt,
        debt_amount: Decimal::from(debt) * dec!(212.25),
        period_year_month: "256801".to_string(),
        as_of_date: "31/01/2025 23:59:00".to_string(),
    }
}

fn region_snapshot() -> Vec<BranchRecord> {
    vec![
        branch(1101, "Central", 1200, 3400, 400),
        branch(1102, "North", 800, 900, 300),
        branch(1103, "Lakeside", 150, 2250, 100),
        branch(1104, "Harbour", 0, 0, 0),
    ]
}

// ===========================================================================
// Record reducer
// ===========================================================================

#[test]
fn test_reducer_totals_equal_field_sums() {
    let records = region_snapshot();
    let ov = overview::calculate_region_overview(&records);

    let sum = |f: fn(&BranchRecord) -> u64| records.iter().map(f).sum::<u64>();
    assert_eq!(ov.totals.counter_count, sum(|r| r.counter_count));
    assert_eq!(ov.totals.other_channel_count, sum(|r| r.other_channel_count));
    assert_eq!(ov.totals.paid_count, sum(|r| r.paid_count));
    assert_eq!(ov.totals.invoice_count, sum(|r| r.invoice_count));
    assert_eq!(ov.totals.debt_count, sum(|r| r.debt_count));
    assert_eq!(
        ov.totals.debt_amount,
        records.iter().map(|r| r.debt_amount).sum::<Decimal>()
    );
}

#[test]
fn test_reducer_percentages_within_bounds_for_consistent_data() {
    let ov = overview::calculate_region_overview(&region_snapshot());
    for p in [
        ov.counter_percentage,
        ov.other_percentage,
        ov.paid_percentage,
        ov.debt_percentage,
    ] {
        assert!(p >= Decimal::ZERO && p <= dec!(100), "out of range: {}", p);
    }
    // paid + debt covers every invoice
    assert!((ov.paid_percentage + ov.debt_percentage - dec!(100)).abs() < dec!(0.0001));
}

#[test]
fn test_reducer_all_zero_invoices() {
    let records = vec![branch(1, "A", 0, 0, 0), branch(2, "B", 0, 0, 0)];
    let ov = overview::calculate_region_overview(&records);
    assert_eq!(ov.counter_percentage, Decimal::ZERO);
    assert_eq!(ov.other_percentage, Decimal::ZERO);
    assert_eq!(ov.paid_percentage, Decimal::ZERO);
    assert_eq!(ov.debt_percentage, Decimal::ZERO);
}

#[test]
fn test_reducer_worked_example() {
    let r = BranchRecord {
        counter_count: 10,
        other_channel_count: 20,
        paid_count: 30,
        invoice_count: 50,
        debt_count: 20,
        debt_amount: dec!(0),
        ..Default::default()
    };
    let ov = overview::calculate_region_overview(&[r]);
    assert_eq!(ov.other_percentage, dec!(40));
    assert_eq!(ov.paid_percentage, dec!(60));
    assert_eq!(ov.debt_percentage, dec!(40));
}

// ===========================================================================
// Chart series builder
// ===========================================================================

#[test]
fn test_chart_series_shape() {
    let records = region_snapshot();
    let series = chart::build_chart_series(&records);
    assert_eq!(series.len(), records.len() + 1);
    let last = series.last().unwrap();
    assert!(last.is_region_total());
    assert_eq!(last.name(), REGION_TOTAL_LABEL);
    assert!(series[..records.len()].iter().all(|p| !p.is_region_total()));
}

#[test]
fn test_chart_region_value_matches_reducer() {
    let records = region_snapshot();
    let ov = overview::calculate_region_overview(&records);
    let series = chart::build_chart_series(&records);
    assert_eq!(series.last().unwrap().value(), ov.other_percentage);
    // 0/0 branch stays at zero
    assert_eq!(series[3].value(), Decimal::ZERO);
}

// ===========================================================================
// Cumulative accumulator
// ===========================================================================

#[test]
fn test_cumulative_worked_example() {
    let oct = vec![branch(1, "A", 90, 10, 0)];
    let nov = vec![branch(1, "A", 150, 50, 0)];
    let series = cumulative::accumulate_periods(&[oct, nov]);
    let a = series[0].point();
    assert_eq!(a.total_invoices, 300);
    assert_eq!(a.other_channel, 60);
    assert_eq!(a.value, dec!(20.0));
}

#[test]
fn test_cumulative_region_sums_everything() {
    let months = vec![region_snapshot(), region_snapshot(), region_snapshot()];
    let series = cumulative::accumulate_periods(&months);
    assert_eq!(series.len(), 5);

    let single = overview::calculate_region_overview(&region_snapshot());
    let region = series.last().unwrap();
    assert!(region.is_region_total());
    assert_eq!(region.point().total_invoices, single.totals.invoice_count * 3);
    assert!((region.value() - single.other_percentage).abs() < dec!(0.000001));
}

#[test]
fn test_cumulative_period_order_changes_positions_only() {
    let jan = vec![branch(1, "A", 10, 10, 0)];
    let feb = vec![branch(2, "B", 5, 15, 0), branch(1, "A", 0, 20, 0)];

    let forward = cumulative::accumulate_periods(&[jan.clone(), feb.clone()]);
    let backward = cumulative::accumulate_periods(&[feb, jan]);

    assert_eq!(forward[0].name(), "A");
    assert_eq!(backward[0].name(), "B");
    assert_eq!(forward[0], backward[1]);
    assert_eq!(forward[1], backward[0]);
    assert_eq!(forward[2], backward[2]);
}

// ===========================================================================
// Growth comparator
// ===========================================================================

#[test]
fn test_growth_worked_example() {
    let current = vec![BranchRecord {
        branch_code: 1,
        other_channel_count: 80,
        invoice_count: 100,
        ..Default::default()
    }];
    let previous = vec![BranchRecord {
        branch_code: 1,
        other_channel_count: 40,
        invoice_count: 100,
        ..Default::default()
    }];
    let rows = growth::compare_growth(&current, &previous);
    assert_eq!(rows[0].current_percentage, dec!(80));
    assert_eq!(rows[0].previous_percentage, dec!(40));
    assert_eq!(rows[0].growth_percent, dec!(100));
}

#[test]
fn test_growth_row_count_and_missing_branches() {
    let current = region_snapshot();
    let previous = vec![branch(1101, "Central", 1300, 3000, 700)];
    let rows = growth::compare_growth(&current, &previous);
    assert_eq!(rows.len(), current.len());
    for row in &rows[1..] {
        assert_eq!(row.previous_percentage, Decimal::ZERO);
        assert_eq!(row.previous_detail, growth::MISSING_DETAIL);
        assert_eq!(row.growth_percent, Decimal::ZERO);
    }
    assert_eq!(rows[0].previous_detail, "3,000/5,000");
    assert_eq!(rows[0].current_detail, "3,400/5,000");
}

#[test]
fn test_growth_zero_previous_is_always_zero() {
    let current = vec![branch(7, "X", 0, 999, 1)];
    let previous = vec![branch(7, "X", 100, 0, 0)];
    let rows = growth::compare_growth(&current, &previous);
    assert!(rows[0].current_percentage > Decimal::ZERO);
    assert_eq!(rows[0].growth_percent, growth::GROWTH_WITHOUT_PRIOR_ACTIVITY);
}
