use serde_json::{Number, Value as JsonValue};
use std::cmp::Ordering;

/// Text shown inside a container cell.
///
/// Strings are unquoted, nested arrays and `{key, value}` objects use brace notation.
pub(crate) fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_owned(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => number_text(n),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => {
            let inner: Vec<String> = items.iter().map(cell_text).collect();
            format!("{{{}}}", inner.join(", "))
        }
        JsonValue::Object(fields) => match (fields.get("key"), fields.get("value")) {
            (Some(k), Some(v)) if fields.len() == 2 => {
                format!("{{{}, {}}}", cell_text(k), cell_text(v))
            }
            _ => value.to_string(),
        },
    }
}

/// Highlight addressing key for a value-keyed container (sets, maps).
pub(crate) fn key_text(value: &JsonValue) -> String {
    cell_text(value)
}

/// Shortest number text, as JavaScript prints it.
///
/// Integral floats drop the `.0`. Magnitudes of at least `1e21` or below `1e-6` use exponent
/// notation with an explicit sign (`1e+21`, `1.5e-7`).
pub(crate) fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    let abs = f.abs();
    if abs >= 1e21 || (abs != 0.0 && abs < 1e-6) {
        let exp = format!("{f:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    if f.fract() == 0.0 {
        return format!("{f:.0}");
    }
    f.to_string()
}

fn kind_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Bool(_) => 1,
        JsonValue::Number(_) => 2,
        JsonValue::String(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Object(_) => 5,
    }
}

/// Total order used for display sorting.
///
/// Kinds order as null < bool < number < string < array < object; numbers compare by value,
/// strings lexicographically, arrays element-wise.
pub(crate) fn display_cmp(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        (JsonValue::Number(x), JsonValue::Number(y)) => {
            let fx = x.as_f64().unwrap_or(f64::NAN);
            let fy = y.as_f64().unwrap_or(f64::NAN);
            fx.total_cmp(&fy)
        }
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (JsonValue::Array(x), JsonValue::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ord = display_cmp(l, r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (JsonValue::Object(_), JsonValue::Object(_)) => cell_text(a).cmp(&cell_text(b)),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
