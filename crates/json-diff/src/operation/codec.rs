//! JSON encoding for diff operations.
//!
//! Operations are encoded as JSON Patch-shaped objects:
//! `{"op": "replace", "path": "/a", "value": 2, "oldValue": 1}`.
//! Paths are already escaped strings and pass through unchanged.

use serde_json::{json, Value};

use super::types::Operation;

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize an [`Operation`] to a `serde_json::Value`.
pub fn to_json(op: &Operation) -> Value {
    match op {
        Operation::Ignore { path } => json!({"op": "ignore", "path": path}),
        Operation::Add { path, value } => json!({
            "op": "add",
            "path": path,
            "value": value
        }),
        Operation::Replace {
            path,
            value,
            old_value,
        } => json!({
            "op": "replace",
            "path": path,
            "value": value,
            "oldValue": old_value
        }),
        Operation::Remove { path, old_value } => json!({
            "op": "remove",
            "path": path,
            "oldValue": old_value
        }),
        Operation::Move { from, path } => json!({
            "op": "move",
            "from": from,
            "path": path
        }),
        Operation::Update { path } => json!({"op": "update", "path": path}),
    }
}

/// Serialize a list of operations to a JSON array.
pub fn to_json_patch<'a, I>(ops: I) -> Value
where
    I: IntoIterator<Item = &'a Operation>,
{
    Value::Array(ops.into_iter().map(to_json).collect())
}
