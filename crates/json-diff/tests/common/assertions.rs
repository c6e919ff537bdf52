#![allow(dead_code)]

use json_diff::{Diff, DiffOptions, OpKind, Operation};
use serde_json::Value;

pub fn diff(old: &Value, new: &Value) -> Diff {
    diff_with(old, new, DiffOptions::default())
}

pub fn diff_with(old: &Value, new: &Value, options: DiffOptions) -> Diff {
    match Diff::new(old, new, options) {
        Ok(diff) => diff,
        Err(err) => panic!("diff failed: {err}"),
    }
}

pub fn kinds_at(diff: &Diff, path: &str) -> Vec<OpKind> {
    diff.operations_at(path).iter().map(Operation::kind).collect()
}

/// Every `(path, kinds)` listed, and nothing else.
pub fn assert_only(diff: &Diff, expected: &[(&str, &[OpKind])]) {
    let actual: Vec<(String, Vec<OpKind>)> = diff
        .operations()
        .map(|(path, ops)| (path.to_string(), ops.iter().map(Operation::kind).collect()))
        .collect();
    let expected: Vec<(String, Vec<OpKind>)> = expected
        .iter()
        .map(|(path, kinds)| (path.to_string(), kinds.to_vec()))
        .collect();
    assert_eq!(actual, expected);
}

pub fn moved(from: &str, to: &str) -> Operation {
    Operation::Move {
        from: from.to_string(),
        path: to.to_string(),
    }
}
