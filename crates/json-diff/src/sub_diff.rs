//! Sub-diffs: nested diffs over fragments paired by an identifier field.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::diff::Diff;
use crate::error::{DiffError, DiffResult, Side};
use crate::log::{log_at, Logger};
use crate::mapping::TreeMap;
use crate::options::{CompiledSubDiff, Settings};

/// Separator between pattern and identifier in sub-diff keys.
pub const KEY_SEPARATOR: &str = "::";

/// Build every configured sub-diff, keyed `"pattern::identifier"`.
///
/// Rules run in configuration order. Within a rule, identifiers seen in the
/// old document come first, then identifiers only present in the new one.
pub(crate) fn generate(
    old: &TreeMap,
    new: &TreeMap,
    paths: &[String],
    settings: &Settings,
) -> DiffResult<IndexMap<String, Diff>> {
    let mut sub_diffs = IndexMap::new();
    let empty = Value::Object(Map::new());

    for rule in &settings.sub_diffs {
        let old_group = group(old, paths, rule, &settings.logger, Side::Old);
        let new_group = group(new, paths, rule, &settings.logger, Side::New);

        let identifiers = old_group
            .keys()
            .chain(new_group.keys().filter(|id| !old_group.contains_key(*id)));
        for id in identifiers {
            let before = old_group.get(id).copied();
            let after = new_group.get(id).copied();
            if before == after {
                continue;
            }
            let key = format!("{}{KEY_SEPARATOR}{id}", rule.pattern);
            log_at!(settings.logger, Debug, "sub-diff {key:?}");
            let diff = Diff::with_settings(
                before.unwrap_or(&empty),
                after.unwrap_or(&empty),
                rule.options.clone(),
                &rule.settings,
            )
            .map_err(|source| DiffError::SubDiff {
                key: key.clone(),
                source: Box::new(source),
            })?;
            sub_diffs.insert(key, diff);
        }
    }
    Ok(sub_diffs)
}

/// Matched values of one document by identifier. Later matches overwrite
/// earlier ones.
fn group<'a>(
    map: &'a TreeMap,
    paths: &[String],
    rule: &CompiledSubDiff,
    logger: &Logger,
    side: Side,
) -> IndexMap<String, &'a Value> {
    let mut grouped = IndexMap::new();
    for path in rule.pattern.filter(paths.iter()) {
        let Some(meta) = map.get(path) else {
            continue;
        };
        match meta.value.as_object().and_then(|obj| obj.get(&rule.key)) {
            Some(id) => {
                grouped.insert(identifier(id), &meta.value);
            }
            None => log_at!(
                logger,
                Debug,
                "sub-diff {}: skipping {side} value at {path:?} without field {:?}",
                rule.pattern,
                rule.key
            ),
        }
    }
    grouped
}

/// Strings are used verbatim; anything else as compact JSON.
fn identifier(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifiers() {
        assert_eq!(identifier(&json!("abc")), "abc");
        assert_eq!(identifier(&json!(7)), "7");
        assert_eq!(identifier(&json!(null)), "null");
        assert_eq!(identifier(&json!({"a": [1]})), r#"{"a":[1]}"#);
    }
}
