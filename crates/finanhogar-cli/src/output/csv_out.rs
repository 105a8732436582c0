use serde_json::Value;
use std::io;

use super::{flatten_fields, render_scalar};

/// Write output as two-column `field,value` CSV to stdout. Nested sections
/// use dotted field names.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in flatten_fields(fields) {
                let _ = wtr.write_record([key, render_scalar(&val)]);
            }
        }
        other => {
            let _ = wtr.write_record([render_scalar(other)]);
        }
    }

    let _ = wtr.flush();
}
