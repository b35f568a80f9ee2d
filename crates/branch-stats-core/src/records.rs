use serde::{Deserialize, Serialize};

use crate::types::{BranchIdentity, Count, Money};

/// One branch's counts for one reporting period, as found in the
/// `DailyData.json` / `<Month>_Data.json` snapshot files.
///
/// Expected (not enforced): `counter_count + other_channel_count == paid_count`
/// and `paid_count + debt_count == invoice_count`. See
/// [`crate::validation`] for the advisory checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchRecord {
    #[serde(rename = "ba_code")]
    pub branch_code: u64,
    #[serde(rename = "org_name")]
    pub branch_name: String,
    /// Bills paid in person at a branch counter
    #[serde(rename = "cnt_count")]
    pub counter_count: Count,
    /// Bills paid through any other channel (bank, app, agents)
    #[serde(rename = "cnt_other")]
    pub other_channel_count: Count,
    #[serde(rename = "cnt_paid")]
    pub paid_count: Count,
    #[serde(rename = "cnt_inv")]
    pub invoice_count: Count,
    #[serde(rename = "cnt_debt")]
    pub debt_count: Count,
    /// Outstanding amount across unpaid bills
    #[serde(rename = "sm_debt")]
    pub debt_amount: Money,
    /// Billing period token, e.g. "256710". Never parsed here.
    #[serde(rename = "debt_ym", default)]
    pub period_year_month: String,
    /// Snapshot timestamp, ISO-8601 or `dd/mm/yyyy[ HH:mm:ss]`
    #[serde(rename = "data_date", default)]
    pub as_of_date: String,
}

/// Grouping key derived from a record under a given [`BranchIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BranchKey {
    Code(u64),
    Name(String),
}

impl BranchRecord {
    pub fn key(&self, identity: BranchIdentity) -> BranchKey {
        match identity {
            BranchIdentity::Code => BranchKey::Code(self.branch_code),
            BranchIdentity::Name => BranchKey::Name(self.branch_name.clone()),
        }
    }

    /// The snapshot date, if the record actually carries one.
    pub fn reported_date(&self) -> Option<&str> {
        let trimmed = self.as_of_date.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_snapshot_field_names() {
        let json = r#"{
            "ba_code": 1102,
            "org_name": "Branch A",
            "cnt_count": 10,
            "cnt_other": 20,
            "cnt_paid": 30,
            "cnt_inv": 50,
            "cnt_debt": 20,
            "sm_debt": 4512.75,
            "debt_ym": "256710",
            "data_date": "20/02/2024 15:30:00"
        }"#;
        let record: BranchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.branch_code, 1102);
        assert_eq!(record.branch_name, "Branch A");
        assert_eq!(record.other_channel_count, 20);
        assert_eq!(record.invoice_count, 50);
        assert_eq!(record.debt_amount, dec!(4512.75));
        assert_eq!(record.reported_date(), Some("20/02/2024 15:30:00"));
    }

    #[test]
    fn test_missing_dates_default_to_blank() {
        let json = r#"{
            "ba_code": 1, "org_name": "B", "cnt_count": 0, "cnt_other": 0,
            "cnt_paid": 0, "cnt_inv": 0, "cnt_debt": 0, "sm_debt": 0
        }"#;
        let record: BranchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.period_year_month, "");
        assert_eq!(record.reported_date(), None);
    }

    #[test]
    fn test_key_by_identity() {
        let record = BranchRecord {
            branch_code: 7,
            branch_name: "North".into(),
            ..Default::default()
        };
        assert_eq!(record.key(BranchIdentity::Code), BranchKey::Code(7));
        assert_eq!(
            record.key(BranchIdentity::Name),
            BranchKey::Name("North".into())
        );
    }
}
