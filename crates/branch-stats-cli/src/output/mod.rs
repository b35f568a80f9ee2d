pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The row list a report carries, if any: a result array, or the
/// `series` of a chart-shaped result.
pub(crate) fn result_rows(result: &Value) -> Option<&Vec<Value>> {
    match result {
        Value::Array(rows) => Some(rows),
        Value::Object(map) => map.get("series").and_then(Value::as_array),
        _ => None,
    }
}

pub(crate) fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_cell).collect::<Vec<_>>().join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_rows_shapes() {
        assert_eq!(result_rows(&json!([1, 2])).map(Vec::len), Some(2));
        assert_eq!(result_rows(&json!({"series": [1]})).map(Vec::len), Some(1));
        assert!(result_rows(&json!({"other_percentage": "40"})).is_none());
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&json!("40.00%")), "40.00%");
        assert_eq!(format_cell(&json!(null)), "");
        assert_eq!(format_cell(&json!(["a", 1])), "a; 1");
    }
}
