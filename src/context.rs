//! Execution context shared between the orchestrator and its units.
//!
//! A context is an ordered mapping of string keys to JSON values. The initial
//! context of a run is merged with the results accumulated so far before
//! each step is checked, rendered, and executed.

use std::collections::BTreeMap;

use serde_json::Value;

/// Mapping of variable names to values.
pub type Context = BTreeMap<String, Value>;

/// Merge step results over an initial context.
///
/// Results take precedence on key collision.
pub fn merge(initial: &Context, results: &BTreeMap<String, String>) -> Context {
    let mut merged = initial.clone();
    for (name, text) in results {
        merged.insert(name.clone(), Value::String(text.clone()));
    }
    merged
}

/// Render a context value as plain text.
///
/// Strings are inserted verbatim; everything else uses its JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Whether a value counts as "set" for conditional checks.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
