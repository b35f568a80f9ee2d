use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, result_rows};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_field_table(map),
        },
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Some(rows) = result_rows(result) {
        print_array_table(rows);
        // Chart reports carry extra fields next to the series.
        if let Value::Object(res_map) = result {
            let rest: Map<String, Value> = res_map
                .iter()
                .filter(|(k, v)| k.as_str() != "series" && !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            for (key, val) in &rest {
                match val {
                    Value::Array(items) if !items.is_empty() => {
                        println!("\n{}:", key);
                        print_array_table(items);
                    }
                    Value::Object(inner) => {
                        println!("\n{}:", key);
                        print_field_table(inner);
                    }
                    Value::Array(_) => {}
                    other => println!("\n{}: {}", key, format_cell(other)),
                }
            }
        }
    } else if let Value::Object(res_map) = result {
        print_field_table(res_map);
    } else {
        println!("{}", format_cell(result));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    let Some(first) = arr.first() else {
        println!("(empty)");
        return;
    };

    if let Value::Object(first) = first {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_cell(item));
        }
    }
}
