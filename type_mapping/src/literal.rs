//! Literal rendering
//!
//! Converts opaque JSON values into inline SQL literals. Used where a value
//! has to appear in the statement text itself (e.g. `CASE ... WHEN` ranking)
//! rather than being bound as a parameter.

use serde_json::Value;

/// Render a value as an inline SQL literal
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Null => "NULL".to_string(),
        other => quote(&other.to_string()),
    }
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
