#![allow(dead_code)]

use proptest::prelude::*;
use serde_json::{json, Map, Value};

pub fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..5).prop_map(|n| json!(n)),
        "[a-c/~]{0,3}".prop_map(Value::String),
    ]
}

/// Small documents with repeated values, so arrays produce moves.
pub fn document() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-d]{1,2}", inner), 0..5)
                .prop_map(|members| Value::Object(members.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

pub fn catalog(items: &[(u64, &str)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    json!({"items": items})
}
