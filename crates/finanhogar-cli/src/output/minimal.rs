use serde_json::Value;

use super::{flatten_fields, render_scalar};

/// Headline figure of each command, in priority order. Matched against the
/// last segment of flattened field names so `mortgage.monthly_payment` in a
/// simulation is found too.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "total",
    "recommendation",
    "resolved_rate",
    "annual_yield_pct",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return render_scalar(result_obj);
    };

    let rows = flatten_fields(map);
    for key in PRIORITY_KEYS {
        let hit = rows
            .iter()
            .find(|(name, val)| !val.is_null() && name.rsplit('.').next() == Some(key));
        if let Some((_, val)) = hit {
            return render_scalar(val);
        }
    }

    match rows.first() {
        Some((key, val)) => format!("{}: {}", key, render_scalar(val)),
        None => String::new(),
    }
}
