//! The diff facade.

use indexmap::IndexMap;
use json_diff_path::sorted_union;
use serde::Serialize;
use serde_json::Value;

use crate::count::{count_operations, Counts};
use crate::engine;
use crate::error::{DiffError, DiffResult, Side};
use crate::log::log_at;
use crate::mapping::{map_document, TreeMap};
use crate::operation::{to_json_patch, OpKind, Operation, OperationMap};
use crate::options::{DiffOptions, Settings};
use crate::sub_diff;

/// A computed, immutable structural diff between two JSON documents.
///
/// Everything (mapping, operations, counts, sub-diffs) is computed inside
/// the constructor.
///
/// ```
/// use json_diff::{Diff, DiffOptions, OpKind};
/// use serde_json::json;
///
/// let diff = Diff::new(&json!({"x": 1}), &json!({"x": 1, "y": 2}), DiffOptions::default()).unwrap();
/// assert_eq!(diff.count(OpKind::Add), 1);
/// assert_eq!(diff.operations_at("/y")[0].value(), Some(&json!(2)));
/// assert!(diff.operations_at("/x").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Diff {
    options: DiffOptions,
    old_map: TreeMap,
    new_map: TreeMap,
    paths: Vec<String>,
    old_paths: Vec<String>,
    new_paths: Vec<String>,
    operations: OperationMap,
    counts: Counts,
    sub_diffs: IndexMap<String, Diff>,
}

impl Diff {
    /// Diff two documents.
    ///
    /// # Errors
    ///
    /// Configuration errors are reported before either document is mapped.
    /// Documents nested deeper than [`MAX_DEPTH`](crate::mapping::MAX_DEPTH)
    /// and failing sub-diffs are errors too.
    pub fn new(old: &Value, new: &Value, options: DiffOptions) -> DiffResult<Self> {
        let settings = Settings::compile(&options, None)?;
        Self::with_settings(old, new, options, &settings)
    }

    /// Diff two JSON texts.
    pub fn from_json_str(old: &str, new: &str, options: DiffOptions) -> DiffResult<Self> {
        let settings = Settings::compile(&options, None)?;
        let old: Value = serde_json::from_str(old).map_err(|source| DiffError::InvalidDocument {
            side: Side::Old,
            source,
        })?;
        let new: Value = serde_json::from_str(new).map_err(|source| DiffError::InvalidDocument {
            side: Side::New,
            source,
        })?;
        Self::with_settings(&old, &new, options, &settings)
    }

    /// Diff any two serializable values through their JSON form.
    pub fn from_serializable<A, B>(old: &A, new: &B, options: DiffOptions) -> DiffResult<Self>
    where
        A: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let settings = Settings::compile(&options, None)?;
        let old = serde_json::to_value(old).map_err(|source| DiffError::InvalidDocument {
            side: Side::Old,
            source,
        })?;
        let new = serde_json::to_value(new).map_err(|source| DiffError::InvalidDocument {
            side: Side::New,
            source,
        })?;
        Self::with_settings(&old, &new, options, &settings)
    }

    pub(crate) fn with_settings(
        old: &Value,
        new: &Value,
        options: DiffOptions,
        settings: &Settings,
    ) -> DiffResult<Self> {
        let old_map = map_document(old).map_err(|source| DiffError::Mapping {
            side: Side::Old,
            source,
        })?;
        let new_map = map_document(new).map_err(|source| DiffError::Mapping {
            side: Side::New,
            source,
        })?;

        let old_paths = old_map.sorted_paths();
        let new_paths = new_map.sorted_paths();
        let paths = sorted_union(old_paths.iter(), new_paths.iter());

        let operations = engine::diff(&old_map, &new_map, settings);
        let counts = count_operations(&operations, &paths, &settings.count_rules);
        let sub_diffs = sub_diff::generate(&old_map, &new_map, &paths, settings)?;

        log_at!(
            settings.logger,
            Debug,
            "diff: {} paths, {} with operations, {} sub-diffs; {counts}",
            paths.len(),
            operations.len(),
            sub_diffs.len()
        );

        Ok(Diff {
            options,
            old_map,
            new_map,
            paths,
            old_paths,
            new_paths,
            operations,
            counts,
            sub_diffs,
        })
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// `(path, operations)` pairs in path-sequence order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &[Operation])> {
        self.paths.iter().filter_map(move |path| {
            self.operations
                .get(path)
                .map(|ops| (path.as_str(), ops.as_slice()))
        })
    }

    /// Operations listed at `path`; empty when there are none.
    pub fn operations_at(&self, path: &str) -> &[Operation] {
        self.operations.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The raw path → operations mapping, in emission order.
    pub fn operation_map(&self) -> &OperationMap {
        &self.operations
    }

    /// Document-changing operations in path order, each move once at its
    /// source.
    pub fn patch(&self) -> Vec<&Operation> {
        self.operations()
            .flat_map(|(path, ops)| {
                ops.iter()
                    .filter(move |op| op.kind().is_patch() && op.attributed_path() == path)
            })
            .collect()
    }

    /// [`patch`](Self::patch) as a JSON array of operation objects.
    pub fn patch_json(&self) -> Value {
        to_json_patch(self.patch())
    }

    /// True when nothing was added, replaced, removed or moved.
    pub fn is_empty(&self) -> bool {
        !self
            .operations
            .values()
            .flatten()
            .any(|op| op.kind().is_patch())
    }

    // ── Paths and maps ────────────────────────────────────────────────────

    /// Joint path sequence of both documents.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn old_paths(&self) -> &[String] {
        &self.old_paths
    }

    pub fn new_paths(&self) -> &[String] {
        &self.new_paths
    }

    pub fn old_map(&self) -> &TreeMap {
        &self.old_map
    }

    pub fn new_map(&self) -> &TreeMap {
        &self.new_map
    }

    // ── Counts and sub-diffs ──────────────────────────────────────────────

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    pub fn count(&self, kind: OpKind) -> usize {
        self.counts.get(kind)
    }

    pub fn total_count(&self) -> usize {
        self.counts.total()
    }

    /// Sub-diffs keyed `"pattern::identifier"`.
    pub fn sub_diffs(&self) -> &IndexMap<String, Diff> {
        &self.sub_diffs
    }

    pub fn sub_diff(&self, key: &str) -> Option<&Diff> {
        self.sub_diffs.get(key)
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }
}
