//! Content fingerprints for JSON values.
//!
//! Algorithm: djb2-style mixing (`state * 33 + input`) with 64-bit wrapping
//! arithmetic and a distinct discriminator per value type. Object members
//! are mixed in sorted key order, so two objects that compare equal always
//! share a fingerprint regardless of member order.
//!
//! Fingerprints are a fast inequality check only; equal fingerprints are
//! confirmed with a full value comparison before two values are treated as
//! the same.

use serde_json::{Number, Value};

// ── Type discriminators ────────────────────────────────────────────────────

pub const START_STATE: u64 = 5381;

pub const NULL_CONST: u64 = 982_452_847;
pub const TRUE_CONST: u64 = 982_453_247;
pub const FALSE_CONST: u64 = 982_454_243;
pub const NUMBER_CONST: u64 = 982_451_653;
pub const ARRAY_CONST: u64 = 982_452_259;
pub const STRING_CONST: u64 = 982_453_601;
pub const OBJECT_CONST: u64 = 982_454_533;

// ── Mixing ────────────────────────────────────────────────────────────────

/// Mix a single integer into the state.
pub fn update_num(state: u64, num: u64) -> u64 {
    state.wrapping_shl(5).wrapping_add(state).wrapping_add(num)
}

/// Mix a string (length first, then bytes) into the state.
pub fn update_str(mut state: u64, s: &str) -> u64 {
    state = update_num(state, STRING_CONST);
    state = update_num(state, s.len() as u64);
    for &b in s.as_bytes() {
        state = update_num(state, u64::from(b));
    }
    state
}

/// Mix a number's text into the state. Float zeros compare equal whatever
/// their sign, so `-0.0` is mixed as `0.0`.
pub fn update_number(state: u64, n: &Number) -> u64 {
    if n.is_f64() && n.as_f64() == Some(0.0) {
        update_str(state, "0.0")
    } else {
        update_str(state, &n.to_string())
    }
}

/// Fingerprint any JSON value.
///
/// Numbers are mixed through their canonical text, which keeps `1` and
/// `1.0` apart exactly as `serde_json::Number` equality does.
pub fn fingerprint(value: &Value) -> u64 {
    match value {
        Value::Null => update_num(START_STATE, NULL_CONST),
        Value::Bool(true) => update_num(START_STATE, TRUE_CONST),
        Value::Bool(false) => update_num(START_STATE, FALSE_CONST),
        Value::Number(n) => update_number(update_num(START_STATE, NUMBER_CONST), n),
        Value::String(s) => update_str(START_STATE, s),
        Value::Array(items) => array(items.iter().map(fingerprint)),
        Value::Object(map) => object(map.iter().map(|(k, v)| (k.as_str(), fingerprint(v)))),
    }
}

/// Combine element fingerprints (in index order) into an array fingerprint.
pub fn array<I: IntoIterator<Item = u64>>(elements: I) -> u64 {
    elements
        .into_iter()
        .fold(update_num(START_STATE, ARRAY_CONST), update_num)
}

/// Combine member fingerprints (in any order) into an object fingerprint.
pub fn object<'a, I: IntoIterator<Item = (&'a str, u64)>>(members: I) -> u64 {
    let mut members: Vec<(&str, u64)> = members.into_iter().collect();
    members.sort_unstable_by(|a, b| a.0.cmp(b.0));
    members
        .into_iter()
        .fold(update_num(START_STATE, OBJECT_CONST), |state, (key, fp)| {
            update_num(update_str(state, key), fp)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_differ_by_type() {
        assert_ne!(fingerprint(&json!(null)), fingerprint(&json!(false)));
        assert_ne!(fingerprint(&json!(0)), fingerprint(&json!("0")));
        assert_ne!(fingerprint(&json!(true)), fingerprint(&json!(false)));
        assert_ne!(fingerprint(&json!([])), fingerprint(&json!({})));
    }

    #[test]
    fn different_values_differ() {
        assert_ne!(fingerprint(&json!(1)), fingerprint(&json!(2)));
        assert_ne!(fingerprint(&json!("a")), fingerprint(&json!("b")));
        assert_ne!(fingerprint(&json!([1, 2])), fingerprint(&json!([2, 1])));
    }

    #[test]
    fn object_member_order_is_irrelevant() {
        let v1 = json!({"a": 1, "b": [1, {"c": 2, "d": 3}]});
        let v2 = json!({"b": [1, {"d": 3, "c": 2}], "a": 1});
        assert_eq!(v1, v2);
        assert_eq!(fingerprint(&v1), fingerprint(&v2));
    }

    #[test]
    fn integer_and_float_follow_value_equality() {
        assert_ne!(json!(1), json!(1.0));
        assert_ne!(fingerprint(&json!(1)), fingerprint(&json!(1.0)));
    }

    #[test]
    fn signed_float_zeros_share_a_fingerprint() {
        let (pos, neg) = (json!(0.0), json!(-0.0));
        assert_eq!(pos, neg);
        assert_eq!(fingerprint(&pos), fingerprint(&neg));
        assert_eq!(fingerprint(&json!([-0.0])), fingerprint(&json!([0.0])));
        assert_ne!(fingerprint(&json!(0)), fingerprint(&neg));
    }

    #[test]
    fn combinators_agree_with_fingerprint() {
        let doc = json!({"k": [1, "x"]});
        let items = [json!(1), json!("x")];
        let arr = array(items.iter().map(fingerprint));
        assert_eq!(arr, fingerprint(&json!([1, "x"])));
        assert_eq!(object([("k", arr)]), fingerprint(&doc));
    }

    #[test]
    fn update_num_basic() {
        assert_eq!(
            update_num(START_STATE, NULL_CONST),
            (5381_u64 << 5) + 5381 + NULL_CONST
        );
    }
}
