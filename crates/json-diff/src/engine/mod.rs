//! Diff engine: compares two mapped documents into path → operations.
//!
//! The walk is driven by paths, not values: every comparison looks both
//! sides up in their [`TreeMap`], so fingerprints and element classes
//! computed by the mapper are reused instead of recomputed.

mod moves;

use json_diff_path::{child_index, child_key, Pattern};
use serde_json::{Map, Value};

use crate::log::log_at;
use crate::mapping::{ElementClass, NodeMeta, TreeMap};
use crate::operation::{Operation, OperationMap};
use crate::options::Settings;

use moves::{detect_moves, Elements, IndexMove};

// ── Public API ────────────────────────────────────────────────────────────

/// Compare two mapped documents.
pub(crate) fn diff(old: &TreeMap, new: &TreeMap, settings: &Settings) -> OperationMap {
    let mut engine = Engine {
        old,
        new,
        settings,
        ops: OperationMap::new(),
    };
    if settings.is_ignored("") {
        engine.push("", Operation::Ignore { path: String::new() });
    } else {
        engine.compare_at("");
    }
    engine.ops
}

// ── Core recursive differ ─────────────────────────────────────────────────

struct Engine<'a> {
    old: &'a TreeMap,
    new: &'a TreeMap,
    settings: &'a Settings,
    ops: OperationMap,
}

impl<'a> Engine<'a> {
    fn push(&mut self, at: &str, op: Operation) {
        self.ops.entry(at.to_string()).or_default().push(op);
    }

    fn ignore(&mut self, path: &str) {
        self.push(path, Operation::Ignore { path: path.to_string() });
    }

    fn compare_at(&mut self, path: &str) {
        let (old_map, new_map) = (self.old, self.new);
        let (Some(old), Some(new)) = (old_map.get(path), new_map.get(path)) else {
            return;
        };
        if old.fingerprint == new.fingerprint && old.value == new.value {
            return;
        }
        log_at!(self.settings.logger, Trace, "compare {path:?}");

        let start = self.ops.len();
        match (&old.value, &new.value) {
            (Value::Object(o), Value::Object(n)) => self.compare_objects(path, o, n),
            (Value::Array(o), Value::Array(n)) => self.compare_arrays(path, old, new, o, n),
            _ => {
                self.push(
                    path,
                    Operation::Replace {
                        path: path.to_string(),
                        value: new.value.clone(),
                        old_value: old.value.clone(),
                    },
                );
                return;
            }
        }

        if self.settings.track_structure_updates {
            let children = Pattern::children_of(path);
            if self.ops.keys().skip(start).any(|p| children.matches(p)) {
                self.push(path, Operation::Update { path: path.to_string() });
            }
        }
    }

    fn compare_objects(&mut self, path: &str, old: &Map<String, Value>, new: &Map<String, Value>) {
        for key in old.keys().filter(|k| new.contains_key(*k)) {
            let child = child_key(path, key);
            if self.settings.is_ignored(&child) {
                self.ignore(&child);
            } else {
                self.compare_at(&child);
            }
        }

        for (key, value) in new.iter().filter(|(k, _)| !old.contains_key(*k)) {
            let child = child_key(path, key);
            if self.settings.is_ignored(&child) {
                self.ignore(&child);
            } else {
                let op = Operation::Add {
                    path: child.clone(),
                    value: value.clone(),
                };
                self.push(&child, op);
            }
        }

        for (key, value) in old.iter().filter(|(k, _)| !new.contains_key(*k)) {
            let child = child_key(path, key);
            if self.settings.is_ignored(&child) {
                self.ignore(&child);
            } else {
                let op = Operation::Remove {
                    path: child.clone(),
                    old_value: value.clone(),
                };
                self.push(&child, op);
            }
        }
    }

    fn compare_arrays(
        &mut self,
        path: &str,
        old_meta: &NodeMeta,
        new_meta: &NodeMeta,
        old: &[Value],
        new: &[Value],
    ) {
        if self.settings.replace_primitives_arrays
            && old_meta.element_class == Some(ElementClass::Primitives)
            && new_meta.element_class == Some(ElementClass::Primitives)
        {
            self.push(
                path,
                Operation::Replace {
                    path: path.to_string(),
                    value: new_meta.value.clone(),
                    old_value: old_meta.value.clone(),
                },
            );
            return;
        }

        let moves = if self.settings.tracks_moves(old.len(), new.len()) {
            detect_moves(
                Elements::new(old, &old_meta.element_fingerprints),
                Elements::new(new, &new_meta.element_fingerprints),
            )
        } else {
            Vec::new()
        };
        log_at!(
            self.settings.logger,
            Debug,
            "array {path:?}: {} -> {} elements, {} moves",
            old.len(),
            new.len(),
            moves.len()
        );

        let common = old.len().min(new.len());

        for i in 0..common {
            let child = child_index(path, i);
            let touching = self.push_moves(path, &child, &moves, |m| m.touches(i));
            if self.settings.is_ignored(&child) {
                self.ignore(&child);
                continue;
            }
            match touching {
                0 => self.compare_at(&child),
                1 => {
                    let op = Operation::Replace {
                        path: child.clone(),
                        value: new[i].clone(),
                        old_value: old[i].clone(),
                    };
                    self.push(&child, op);
                }
                _ => {}
            }
        }

        for (j, value) in new.iter().enumerate().skip(common) {
            let child = child_index(path, j);
            if self.settings.is_ignored(&child) {
                self.ignore(&child);
            } else {
                let op = Operation::Add {
                    path: child.clone(),
                    value: value.clone(),
                };
                self.push(&child, op);
            }
            self.push_moves(path, &child, &moves, |m| m.to == j);
        }

        for (i, value) in old.iter().enumerate().skip(common) {
            let child = child_index(path, i);
            if self.settings.is_ignored(&child) {
                self.ignore(&child);
            } else {
                let op = Operation::Remove {
                    path: child.clone(),
                    old_value: value.clone(),
                };
                self.push(&child, op);
            }
            self.push_moves(path, &child, &moves, |m| m.from == i);
        }
    }

    /// Emit at `at` every move selected by `select`; returns how many.
    fn push_moves<F>(&mut self, array: &str, at: &str, moves: &[IndexMove], select: F) -> usize
    where
        F: Fn(&IndexMove) -> bool,
    {
        let mut count = 0;
        for m in moves.iter().filter(|m| select(*m)) {
            let op = Operation::Move {
                from: child_index(array, m.from),
                path: child_index(array, m.to),
            };
            self.push(at, op);
            count += 1;
        }
        count
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
