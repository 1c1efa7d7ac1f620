//! Loose coercions for props written by hand in markup.
//!
//! Props arrive as arbitrary JSON: a seed may be `3` or `"3"`, a key may be
//! missing or empty. These helpers read them the way page scripts always
//! have, so existing markup keeps working.

use chirp_protocol::Props;
use serde_json::Value;

/// Whether a value counts as set: not missing, null, false, zero, NaN or "".
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// String form of a value.
pub(crate) fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => number_string(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// `props[key]` as a string, or `default` when it is not set.
pub(crate) fn prop_string(props: &Props, key: &str, default: &str) -> String {
    let value = props.get(key);
    match value {
        Some(value) if truthy(Some(value)) => js_string(value),
        _ => default.to_owned(),
    }
}

/// Numeric reading of a value that defaults to zero when unset.
/// Unparseable text reads as NaN.
pub(crate) fn to_number(value: Option<&Value>) -> f64 {
    if !truthy(value) {
        return 0.0;
    }
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::Bool(_)) => 1.0,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

/// JSON form of a number: integral values as integers, non-finite as null.
pub(crate) fn number_value(n: f64) -> Value {
    if is_safe_integer(n) {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Display form of a number: `3`, `2.5`, `NaN`.
pub(crate) fn number_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_owned()
    } else if is_safe_integer(n) {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

fn is_safe_integer(n: f64) -> bool {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE
}
