use serde_json::Value;

use super::{format_cell, result_rows};

/// Fields worth printing on their own, best first.
const PRIORITY_KEYS: [&str; 5] = ["other_percentage", "value", "path", "paid_percentage", "month"];

/// Print just the headline number from the output.
///
/// For a series this is the region total's share; for an object the first
/// priority key present; for a plain row list the number of rows.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

pub(crate) fn minimal_line(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        if let Some(series) = map.get("series").and_then(Value::as_array) {
            let region = series
                .iter()
                .rev()
                .find(|p| p.get("kind").and_then(Value::as_str) == Some("region_total"));
            if let Some(v) = region.and_then(|p| p.get("value")) {
                return format_cell(v);
            }
        }
        if let Some(v) = PRIORITY_KEYS
            .iter()
            .filter_map(|k| map.get(*k))
            .find(|v| !v.is_null())
        {
            return format_cell(v);
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_cell(val));
        }
    }

    match result_rows(result) {
        Some(rows) => rows.len().to_string(),
        None => format_cell(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_region_total_from_series() {
        let value = json!({"result": {"series": [
            {"kind": "branch", "name": "A", "value": "80"},
            {"kind": "region_total", "name": "ภาพรวมเขต", "value": "65"}
        ]}});
        assert_eq!(minimal_line(&value), "65");
    }

    #[test]
    fn test_priority_key_and_row_count() {
        let value = json!({"result": {"name": "x", "other_percentage": "40"}});
        assert_eq!(minimal_line(&value), "40");
        assert_eq!(minimal_line(&json!({"result": [{}, {}, {}]})), "3");
    }
}
