mod common;

use common::assertions::{diff, diff_with};
use json_diff::{CountRule, DiffOptions, OpKind};
use serde_json::json;

fn documents() -> (serde_json::Value, serde_json::Value) {
    (
        json!({"meta": {"v": 1}, "items": [1, 2, 3], "extra": true}),
        json!({"meta": {"v": 2}, "items": [3, 2, 1, 4], "added": "x"}),
    )
}

#[test]
fn default_counts_every_kind() {
    let (old, new) = documents();
    let diff = diff(&old, &new);
    let counts = diff.counts();
    assert_eq!(counts.replace, 1);
    assert_eq!(counts.moves, 2);
    assert_eq!(counts.add, 2);
    assert_eq!(counts.remove, 1);
    assert_eq!(counts.ignore, 0);
    assert_eq!(counts.update, 0);
    assert_eq!(diff.total_count(), 6);
}

#[test]
fn rules_filter_by_path_and_kind() {
    let (old, new) = documents();
    let options = DiffOptions::new()
        .with_count_rule(CountRule::new("/items/*", [OpKind::Move]))
        .with_count_rule(CountRule::new("/meta/**", [OpKind::Replace]));
    let diff = diff_with(&old, &new, options);
    assert_eq!(diff.count(OpKind::Move), 2);
    // The add at /items/3 is governed by the first rule, which excludes adds.
    assert_eq!(diff.count(OpKind::Add), 0);
    assert_eq!(diff.count(OpKind::Replace), 1);
    // Top-level keys match no rule.
    assert_eq!(diff.count(OpKind::Remove), 0);
    assert_eq!(diff.total_count(), 3);
}

#[test]
fn earlier_rules_shadow_later_ones() {
    let (old, new) = documents();
    let options = DiffOptions::new()
        .with_count_rule(CountRule::new("/items/*", Vec::new()))
        .with_count_rule(CountRule::new("/items/*", OpKind::ALL));
    let diff = diff_with(&old, &new, options);
    assert_eq!(diff.total_count(), 0);
}

#[test]
fn ignores_and_updates_count_when_allowed() {
    let (old, new) = documents();
    let options = DiffOptions::new()
        .with_ignore_paths(["/meta"])
        .with_track_structure_updates(true)
        .with_count_rule(CountRule::new("", [OpKind::Update]))
        .with_count_rule(CountRule::new("/*", [OpKind::Ignore, OpKind::Update]));
    let diff = diff_with(&old, &new, options);
    assert_eq!(diff.count(OpKind::Ignore), 1);
    // Root and /items.
    assert_eq!(diff.count(OpKind::Update), 2);
    assert_eq!(diff.total_count(), 3);
}

#[test]
fn move_destinations_do_not_count() {
    let diff = diff(&json!([1, 2]), &json!([2, 1]));
    assert_eq!(diff.operations_at("/0").len(), 2);
    assert_eq!(diff.operations_at("/1").len(), 2);
    assert_eq!(diff.count(OpKind::Move), 2);
}
