use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten_fields, render_scalar};

/// Format output as a two-column Field / Value table, followed by warnings
/// and methodology when the value is a computation envelope.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => {
                println!("{}", field_table(result));
                print_envelope_notes(map);
            }
            _ => println!("{}", field_table(map)),
        },
        other => println!("{}", render_scalar(other)),
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten_fields(map) {
        builder.push_record([key, render_scalar(&val)]);
    }
    builder.build()
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
