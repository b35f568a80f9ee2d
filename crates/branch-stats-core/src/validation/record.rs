use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::ValidationReport;
use crate::aggregation::percent::percent_of;
use crate::records::BranchRecord;

/// Largest accepted gap, in percentage points, between the percentage forms
/// of the two count identities.
const PERCENT_TOLERANCE: Decimal = dec!(0.01);

/// Check the cross-field identities of one record.
///
/// Counts are unsigned, so only the money amount can be negative.
pub fn validate_record(record: &BranchRecord) -> ValidationReport {
    let mut issues: Vec<String> = Vec::new();

    if record.debt_amount < Decimal::ZERO {
        issues.push(format!(
            "{}: outstanding amount is negative ({})",
            record.branch_name, record.debt_amount
        ));
    }

    let channels = record.counter_count + record.other_channel_count;
    if channels != record.paid_count {
        issues.push(format!(
            "{}: counter ({}) + other channel ({}) = {} but paid is {}",
            record.branch_name,
            record.counter_count,
            record.other_channel_count,
            channels,
            record.paid_count
        ));
    }

    let billed = record.paid_count + record.debt_count;
    if billed != record.invoice_count {
        issues.push(format!(
            "{}: paid ({}) + unpaid ({}) = {} but invoices are {}",
            record.branch_name, record.paid_count, record.debt_count, billed, record.invoice_count
        ));
    }

    ValidationReport::from_issues(issues)
}

/// Whether the record's shares add up: counter % + other % == paid % and
/// paid % + debt % == 100, within [`PERCENT_TOLERANCE`].
///
/// A record without invoices has no meaningful shares and fails.
pub fn validate_percentages(record: &BranchRecord) -> bool {
    if record.invoice_count == 0 {
        return false;
    }
    let inv = record.invoice_count;
    let counter = percent_of(record.counter_count, inv);
    let other = percent_of(record.other_channel_count, inv);
    let paid = percent_of(record.paid_count, inv);
    let debt = percent_of(record.debt_count, inv);

    (counter + other - paid).abs() < PERCENT_TOLERANCE
        && (paid + debt - dec!(100)).abs() < PERCENT_TOLERANCE
}

/// Run both checks over a whole snapshot.
pub fn validate_dataset(records: &[BranchRecord]) -> ValidationReport {
    let mut issues: Vec<String> = Vec::new();
    for record in records {
        issues.extend(validate_record(record).issues);
        if record.invoice_count == 0 {
            issues.push(format!("{}: no invoices, shares undefined", record.branch_name));
        } else if !validate_percentages(record) {
            issues.push(format!("{}: percentages are inconsistent", record.branch_name));
        }
    }
    ValidationReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consistent() -> BranchRecord {
        BranchRecord {
            branch_code: 1,
            branch_name: "A".into(),
            counter_count: 10,
            other_channel_count: 20,
            paid_count: 30,
            invoice_count: 50,
            debt_count: 20,
            debt_amount: dec!(1500),
            ..Default::default()
        }
    }

    #[test]
    fn test_consistent_record_passes() {
        let r = consistent();
        assert!(validate_record(&r).is_valid);
        assert!(validate_percentages(&r));
        assert!(validate_dataset(&[r]).is_valid);
    }

    #[test]
    fn test_channel_mismatch_reported() {
        let r = BranchRecord {
            paid_count: 31,
            invoice_count: 51,
            ..consistent()
        };
        let report = validate_record(&r);
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("paid is 31"));
        assert!(!validate_percentages(&r));
    }

    #[test]
    fn test_invoice_mismatch_reported() {
        let r = BranchRecord {
            invoice_count: 60,
            ..consistent()
        };
        let report = validate_record(&r);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("invoices are 60"));
    }

    #[test]
    fn test_negative_amount_reported() {
        let r = BranchRecord {
            debt_amount: dec!(-1),
            ..consistent()
        };
        assert!(!validate_record(&r).is_valid);
    }

    #[test]
    fn test_zero_invoices_fail_percentages() {
        let r = BranchRecord::default();
        assert!(validate_record(&r).is_valid);
        assert!(!validate_percentages(&r));
        let report = validate_dataset(&[r]);
        assert!(!report.is_valid);
        assert!(report.issues[0].contains("no invoices"));
    }

    #[test]
    fn test_dataset_collects_every_issue() {
        let bad = BranchRecord {
            branch_name: "B".into(),
            paid_count: 0,
            ..consistent()
        };
        let report = validate_dataset(&[consistent(), bad]);
        assert!(!report.is_valid);
        // channel sum, invoice sum, percentages
        assert_eq!(report.issues.len(), 3);
        assert!(report.issues.iter().all(|i| i.starts_with("B:")));
    }
}
