//! Display helpers shared by the CLI, the export rows and the growth table.

use chrono::{Datelike, DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::StatsResult;

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Offset between the Buddhist Era and the Gregorian calendar.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Group digits in threes with commas: 1234567 -> "1,234,567".
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals and a percent sign: 33.333 -> "33.33%".
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// Parse a snapshot timestamp.
///
/// Accepts ISO-8601 (`2024-02-20T15:30:00`, with or without offset; the
/// wall-clock time is kept as written), `dd/mm/yyyy HH:mm[:ss]`,
/// `dd/mm/yyyy` and `yyyy-mm-dd`.
pub fn parse_snapshot_date(raw: &str) -> StatsResult<NaiveDateTime> {
    let raw = raw.trim();
    let bad = || StatsError::DateError(format!("Unrecognised snapshot date '{}'", raw));

    if raw.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.naive_local());
        }
        return NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .map_err(|_| bad());
    }

    if raw.contains('/') {
        let mut parts = raw.split_whitespace();
        let date_part = parts.next().ok_or_else(bad)?;
        let date = NaiveDate::parse_from_str(date_part, "%d/%m/%Y").map_err(|_| bad())?;
        let time = match parts.next() {
            Some(t) => NaiveTime::parse_from_str(t, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
                .map_err(|_| bad())?,
            None => NaiveTime::MIN,
        };
        return Ok(date.and_time(time));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| bad())
}

/// "20 กุมภาพันธ์ 2567"
pub fn format_thai_date(date: &NaiveDateTime) -> String {
    format!(
        "{} {} {}",
        date.day(),
        THAI_MONTHS[date.month0() as usize],
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

/// "20 กุมภาพันธ์ 2567 เวลา 15:30 น."
pub fn format_thai_datetime(date: &NaiveDateTime) -> String {
    format!("{} เวลา {} น.", format_thai_date(date), date.format("%H:%M"))
}

/// Resolve a reported snapshot date, falling back to `now` when the date is
/// absent or unreadable. The fallback is logged so it never goes unnoticed.
pub fn reported_or(raw: Option<&str>, now: NaiveDateTime) -> NaiveDateTime {
    match raw {
        None => now,
        Some(r) => parse_snapshot_date(r).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to current time");
            now
        }),
    }
}

/// Thai name for an English month name; unknown names pass through.
pub fn thai_month_name(english: &str) -> &str {
    month_number(english)
        .map(|m| THAI_MONTHS[(m - 1) as usize])
        .unwrap_or(english)
}

/// 1-based month number for an English month name.
pub fn month_number(english: &str) -> Option<u32> {
    ENGLISH_MONTHS
        .iter()
        .position(|m| *m == english)
        .map(|i| i as u32 + 1)
}

/// Calendar order, as the month-listing endpoint returns them. Names that
/// are not months sort first, keeping their relative order.
pub fn sort_month_names(months: &mut [String]) {
    months.sort_by_key(|m| month_number(m).unwrap_or(0));
}

/// Labels for the first and last month of a cumulative chart, e.g.
/// "ตุลาคม 2566" to "มกราคม 2567".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRange {
    pub start: String,
    pub end: String,
}

/// Build the period labels from the month names and each month's first
/// snapshot date (for the Buddhist year).
pub fn period_range(
    first_month: &str,
    first_date: Option<&str>,
    last_month: &str,
    last_date: Option<&str>,
    now: NaiveDateTime,
) -> PeriodRange {
    let label = |month: &str, date: Option<&str>| {
        let year = reported_or(date, now).year() + BUDDHIST_ERA_OFFSET;
        format!("{} {}", thai_month_name(month), year)
    };
    PeriodRange {
        start: label(first_month, first_date),
        end: label(last_month, last_date),
    }
}
