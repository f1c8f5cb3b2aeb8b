use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_value, flatten};

/// Format output as tables: one field/value table plus one table per row list.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => print_object(value),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", display_value(value, true)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    print_object(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_object(value: &Value) {
    let flat = flatten(value, false);

    if !flat.fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &flat.fields {
            builder.push_record([key.as_str(), &display_value(val, true)]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in flat.sections {
        println!("\n{}:", name);
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        if rows.is_empty() {
            println!("(empty)");
        }
        for item in rows {
            println!("{}", display_value(item, true));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(headers.iter().map(|h| {
            row.get(h.as_str())
                .map(|v| display_value(v, true))
                .unwrap_or_default()
        }));
    }

    println!("{}", Table::from(builder));
}
