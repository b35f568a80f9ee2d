use serde::{Deserialize, Serialize};

use crate::aggregation::percent::percent_of;
use crate::format::format_percent;
use crate::records::BranchRecord;
use crate::types::{Count, Money};

/// Spreadsheet column titles, in [`ExportRow`] field order.
pub const EXPORT_HEADERS: [&str; 12] = [
    "รหัสสาขา",
    "ชื่อสาขา",
    "เคาท์เตอร์ประปา",
    "ช่องทางอื่นๆ",
    "รวมชำระ",
    "รวมใบแจ้งหนี้",
    "ค้างชำระ",
    "รวมค่าน้ำ",
    "% เคาท์เตอร์ประปา",
    "% ช่องทางอื่นๆ",
    "% รวมชำระ",
    "% ค้างชำระ",
];

/// One spreadsheet row: the raw record plus its four shares as "12.34%".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub ba_code: u64,
    pub org_name: String,
    pub cnt_count: Count,
    pub cnt_other: Count,
    pub cnt_paid: Count,
    pub cnt_inv: Count,
    pub cnt_debt: Count,
    pub sm_debt: Money,
    pub counter_percentage: String,
    pub other_percentage: String,
    pub paid_percentage: String,
    pub debt_percentage: String,
}

impl ExportRow {
    /// Cell values in header order.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.ba_code.to_string(),
            self.org_name.clone(),
            self.cnt_count.to_string(),
            self.cnt_other.to_string(),
            self.cnt_paid.to_string(),
            self.cnt_inv.to_string(),
            self.cnt_debt.to_string(),
            self.sm_debt.to_string(),
            self.counter_percentage.clone(),
            self.other_percentage.clone(),
            self.paid_percentage.clone(),
            self.debt_percentage.clone(),
        ]
    }
}

pub fn build_export_rows(records: &[BranchRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|r| ExportRow {
            ba_code: r.branch_code,
            org_name: r.branch_name.clone(),
            cnt_count: r.counter_count,
            cnt_other: r.other_channel_count,
            cnt_paid: r.paid_count,
            cnt_inv: r.invoice_count,
            cnt_debt: r.debt_count,
            sm_debt: r.debt_amount,
            counter_percentage: format_percent(percent_of(r.counter_count, r.invoice_count)),
            other_percentage: format_percent(percent_of(r.other_channel_count, r.invoice_count)),
            paid_percentage: format_percent(percent_of(r.paid_count, r.invoice_count)),
            debt_percentage: format_percent(percent_of(r.debt_count, r.invoice_count)),
        })
        .collect()
}
