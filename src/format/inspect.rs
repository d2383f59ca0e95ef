//! Debugger-style rendering of argument values.
//!
//! Produces single-line dumps in the shape of node's `util.inspect`:
//! `{ id: 7, tags: [ 'a', 'b' ], 'x-key': null }`.

use serde_json::{Map, Value};

use super::args::{Arg, UNSERIALIZABLE};

/// Default nesting depth for non-string arguments and `%O`.
pub const DEFAULT_DEPTH: usize = 2;

const MAX_ARRAY_ITEMS: usize = 100;

/// Render an argument, descending at most `depth` levels into containers.
pub fn inspect(arg: &Arg, depth: usize) -> String {
    match arg {
        Arg::Text(s) => quote(s),
        Arg::Int(i) => i.to_string(),
        Arg::Float(f) => number_to_string(*f),
        Arg::Bool(b) => b.to_string(),
        Arg::Null => "null".to_string(),
        Arg::Undefined => "undefined".to_string(),
        Arg::Json(value) => inspect_value(value, 0, depth),
        Arg::Opaque(text) => text.clone(),
        Arg::Unserializable => UNSERIALIZABLE.to_string(),
    }
}

fn inspect_value(value: &Value, level: usize, depth: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => number_to_string(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => quote(s),
        Value::Array(items) => inspect_array(items, level, depth),
        Value::Object(map) => inspect_object(map, level, depth),
    }
}

fn inspect_array(items: &[Value], level: usize, depth: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    if level > depth {
        return "[Array]".to_string();
    }
    let mut parts: Vec<String> = items
        .iter()
        .take(MAX_ARRAY_ITEMS)
        .map(|item| inspect_value(item, level + 1, depth))
        .collect();
    if items.len() > MAX_ARRAY_ITEMS {
        let more = items.len() - MAX_ARRAY_ITEMS;
        parts.push(format!("... {} more item{}", more, if more == 1 { "" } else { "s" }));
    }
    format!("[ {} ]", parts.join(", "))
}

fn inspect_object(map: &Map<String, Value>, level: usize, depth: usize) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }
    if level > depth {
        return "[Object]".to_string();
    }
    let parts: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}: {}", object_key(key), inspect_value(value, level + 1, depth)))
        .collect();
    format!("{{ {} }}", parts.join(", "))
}

fn object_key(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Quote a string with single quotes, switching to double quotes when that avoids escaping.
pub fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Format a float the way JavaScript's `String(number)` does for common values.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() < 1e-6 || n.abs() >= 1e21 {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// `1e-7`, `1.5e+21`: JavaScript always signs the exponent.
fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}
