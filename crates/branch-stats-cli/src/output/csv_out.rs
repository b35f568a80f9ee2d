use serde_json::Value;
use std::io::{self, Write};

use super::{format_cell, result_rows};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {}", e);
    }
}

pub(crate) fn write_csv<W: Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(rows) = result_rows(result) {
        write_array_csv(&mut wtr, rows)?;
    } else if let Value::Object(map) = result {
        wtr.write_record(["field", "value"])?;
        for (key, val) in map {
            wtr.write_record([key.as_str(), &format_cell(val)])?;
        }
    } else {
        wtr.write_record([format_cell(result)])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_array_csv<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([format_cell(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_cell).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_series_written_as_rows() {
        let value = json!({
            "result": {
                "series": [
                    {"kind": "branch", "name": "A", "value": "80"},
                    {"kind": "region_total", "name": "ภาพรวมเขต", "value": "65"}
                ],
                "target": "75"
            },
            "warnings": []
        });
        let text = render(&value);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "region_total,ภาพรวมเขต,65");
    }

    #[test]
    fn test_object_written_as_field_value() {
        let text = render(&json!({"result": {"other_percentage": "40"}}));
        assert_eq!(text, "field,value\nother_percentage,40\n");
    }
}
