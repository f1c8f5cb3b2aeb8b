use serde_json::Value;
use std::io;

use super::{display_value, flatten};

/// Write output as CSV to stdout.
///
/// Row lists become one record per row; anything else becomes `field,value`
/// records over the dotted paths of the result, at full precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Err(e) = write_csv(&mut wtr, body).and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> Result<(), csv::Error> {
    match value {
        Value::Array(rows) => write_rows(wtr, rows),
        Value::Object(_) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in flatten(value, true).fields {
                wtr.write_record([key.as_str(), &display_value(val, false)])?;
            }
            Ok(())
        }
        _ => wtr.write_record([display_value(value, false)]),
    }
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([display_value(item, false)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(headers.iter().map(|h| {
            row.get(*h)
                .map(|v| display_value(v, false))
                .unwrap_or_default()
        }))?;
    }
    Ok(())
}
