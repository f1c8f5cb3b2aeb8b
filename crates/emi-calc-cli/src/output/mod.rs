pub mod csv_out;
pub mod minimal;
pub mod table;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Leaves of a JSON tree keyed by dotted path.
///
/// Arrays of objects (schedules, scheme lists) are either kept aside as
/// sections or expanded with `[i]` indices into the field list.
#[derive(Debug, Default)]
pub struct Flattened<'a> {
    pub fields: Vec<(String, &'a Value)>,
    pub sections: Vec<(String, &'a [Value])>,
}

pub fn flatten(value: &Value, expand_arrays: bool) -> Flattened<'_> {
    let mut out = Flattened::default();
    walk("", value, expand_arrays, &mut out);
    out
}

fn walk<'a>(prefix: &str, value: &'a Value, expand_arrays: bool, out: &mut Flattened<'a>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                walk(&path, child, expand_arrays, out);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            if expand_arrays {
                for (i, item) in items.iter().enumerate() {
                    walk(&format!("{prefix}[{i}]"), item, expand_arrays, out);
                }
            } else {
                out.sections.push((prefix.to_string(), items));
            }
        }
        _ => out.fields.push((prefix.to_string(), value)),
    }
}

/// Render a leaf as text. With `round_money`, decimal strings are cut to two places.
pub fn display_value(value: &Value, round_money: bool) -> String {
    match value {
        Value::String(s) if round_money => match s.parse::<Decimal>() {
            Ok(d) if d.scale() > 2 => d
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .to_string(),
            _ => s.clone(),
        },
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(|v| display_value(v, round_money))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
