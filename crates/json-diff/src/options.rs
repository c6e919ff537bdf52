//! Diff configuration.
//!
//! [`DiffOptions`] is the user-facing, serde-friendly form; every field is
//! optional in a configuration file. Before any document is looked at it is
//! compiled into [`Settings`]: patterns are parsed, the path ordering is
//! checked and nested sub-diff options are compiled recursively, so a bad
//! configuration fails without doing comparison work.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use json_diff_path::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};
use crate::log::{DiffLogger, LogLevel, Logger, NoopLogger};
use crate::operation::OpKind;

// ── Path ordering ─────────────────────────────────────────────────────────

/// Strategy used to order the path sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSort {
    /// Segment-wise total order: numeric segments numerically and before
    /// textual ones, textual segments lexically, prefixes first.
    #[default]
    Sorted,
    /// Document order. Reserved; rejected at configuration time.
    Natural,
}

impl PathSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathSort::Sorted => "sorted",
            PathSort::Natural => "natural",
        }
    }
}

impl fmt::Display for PathSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────

fn all_kinds() -> Vec<OpKind> {
    OpKind::ALL.to_vec()
}

/// One counting rule: paths matched by `pattern` count the listed kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRule {
    pub pattern: String,
    /// Defaults to every kind when omitted.
    #[serde(default = "all_kinds")]
    pub kinds: Vec<OpKind>,
}

impl CountRule {
    pub fn new(pattern: impl Into<String>, kinds: impl IntoIterator<Item = OpKind>) -> Self {
        CountRule {
            pattern: pattern.into(),
            kinds: kinds.into_iter().collect(),
        }
    }
}

/// Sub-diff rule: matched values are paired by `key` and diffed with
/// `options`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubDiffRule {
    pub key: String,
    #[serde(default)]
    pub options: DiffOptions,
}

impl SubDiffRule {
    pub fn new(key: impl Into<String>) -> Self {
        SubDiffRule {
            key: key.into(),
            options: DiffOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }
}

// ── Options ───────────────────────────────────────────────────────────────

/// Options for [`Diff::new`](crate::Diff::new).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Patterns whose matches become a single `ignore` operation.
    pub ignore_paths: Vec<String>,
    pub path_sort: PathSort,
    pub track_array_moves: bool,
    /// Arrays longer than this are compared by position only.
    pub max_array_tracking_length: Option<usize>,
    pub track_structure_updates: bool,
    pub replace_primitives_arrays: bool,
    /// Ordered; the first rule matching a path governs it. Empty counts
    /// every kind at every path.
    pub count_operations: Vec<CountRule>,
    /// Pattern → rule, applied in insertion order.
    pub sub_diffs: IndexMap<String, SubDiffRule>,
    /// Diagnostic collaborator. `None` is silent at the top level and
    /// inherits the parent's logger inside a sub-diff.
    #[serde(skip)]
    pub logger: Option<Arc<dyn DiffLogger>>,
    pub log_level: LogLevel,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            ignore_paths: Vec::new(),
            path_sort: PathSort::default(),
            track_array_moves: true,
            max_array_tracking_length: None,
            track_structure_updates: false,
            replace_primitives_arrays: false,
            count_operations: Vec::new(),
            sub_diffs: IndexMap::new(),
            logger: None,
            log_level: LogLevel::default(),
        }
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("ignore_paths", &self.ignore_paths)
            .field("path_sort", &self.path_sort)
            .field("track_array_moves", &self.track_array_moves)
            .field("max_array_tracking_length", &self.max_array_tracking_length)
            .field("track_structure_updates", &self.track_structure_updates)
            .field("replace_primitives_arrays", &self.replace_primitives_arrays)
            .field("count_operations", &self.count_operations)
            .field("sub_diffs", &self.sub_diffs)
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_paths<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_paths = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_path_sort(mut self, path_sort: PathSort) -> Self {
        self.path_sort = path_sort;
        self
    }

    pub fn with_track_array_moves(mut self, enabled: bool) -> Self {
        self.track_array_moves = enabled;
        self
    }

    pub fn with_max_array_tracking_length(mut self, limit: Option<usize>) -> Self {
        self.max_array_tracking_length = limit;
        self
    }

    pub fn with_track_structure_updates(mut self, enabled: bool) -> Self {
        self.track_structure_updates = enabled;
        self
    }

    pub fn with_replace_primitives_arrays(mut self, enabled: bool) -> Self {
        self.replace_primitives_arrays = enabled;
        self
    }

    pub fn with_count_rule(mut self, rule: CountRule) -> Self {
        self.count_operations.push(rule);
        self
    }

    pub fn with_sub_diff(mut self, pattern: impl Into<String>, rule: SubDiffRule) -> Self {
        self.sub_diffs.insert(pattern.into(), rule);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn DiffLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

// ── Compiled form ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub(crate) struct CompiledCountRule {
    pub(crate) pattern: Pattern,
    pub(crate) kinds: BTreeSet<OpKind>,
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledSubDiff {
    pub(crate) pattern: Pattern,
    pub(crate) key: String,
    pub(crate) options: DiffOptions,
    pub(crate) settings: Settings,
}

/// Validated options plus the resolved logger.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) ignore: Vec<Pattern>,
    pub(crate) track_array_moves: bool,
    pub(crate) max_array_tracking_length: Option<usize>,
    pub(crate) track_structure_updates: bool,
    pub(crate) replace_primitives_arrays: bool,
    /// Empty means the default rule.
    pub(crate) count_rules: Vec<CompiledCountRule>,
    pub(crate) sub_diffs: Vec<CompiledSubDiff>,
    pub(crate) logger: Logger,
}

fn parse_pattern(option: &'static str, pattern: &str) -> DiffResult<Pattern> {
    Pattern::parse(pattern).map_err(|source| DiffError::Pattern { option, source })
}

impl Settings {
    /// Validate `options`. `inherited` is the parent's logger when compiling
    /// a sub-diff.
    pub(crate) fn compile(options: &DiffOptions, inherited: Option<&Logger>) -> DiffResult<Self> {
        if options.path_sort != PathSort::Sorted {
            return Err(DiffError::UnsupportedPathSort(options.path_sort));
        }

        let ignore = options
            .ignore_paths
            .iter()
            .map(|p| parse_pattern("ignore_paths", p))
            .collect::<DiffResult<Vec<_>>>()?;

        let count_rules = options
            .count_operations
            .iter()
            .map(|rule| {
                Ok(CompiledCountRule {
                    pattern: parse_pattern("count_operations", &rule.pattern)?,
                    kinds: rule.kinds.iter().copied().collect(),
                })
            })
            .collect::<DiffResult<Vec<_>>>()?;

        let logger = match (&options.logger, inherited) {
            (Some(sink), _) => Logger::new(Arc::clone(sink), options.log_level),
            (None, Some(parent)) => Logger::new(Arc::clone(parent.sink()), parent.threshold()),
            (None, None) => Logger::new(Arc::new(NoopLogger), options.log_level),
        };

        let mut sub_diffs = Vec::with_capacity(options.sub_diffs.len());
        for (pattern, rule) in &options.sub_diffs {
            let compiled = parse_pattern("sub_diffs", pattern)?;
            let settings = Settings::compile(&rule.options, Some(&logger)).map_err(|source| {
                DiffError::SubDiff {
                    key: pattern.clone(),
                    source: Box::new(source),
                }
            })?;
            sub_diffs.push(CompiledSubDiff {
                pattern: compiled,
                key: rule.key.clone(),
                options: rule.options.clone(),
                settings,
            });
        }

        Ok(Settings {
            ignore,
            track_array_moves: options.track_array_moves,
            max_array_tracking_length: options.max_array_tracking_length,
            track_structure_updates: options.track_structure_updates,
            replace_primitives_arrays: options.replace_primitives_arrays,
            count_rules,
            sub_diffs,
            logger,
        })
    }

    pub(crate) fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|pattern| pattern.matches(path))
    }

    /// Whether move detection runs for arrays of these lengths.
    pub(crate) fn tracks_moves(&self, old_len: usize, new_len: usize) -> bool {
        self.track_array_moves
            && self
                .max_array_tracking_length
                .map_or(true, |limit| old_len.max(new_len) <= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::testing::RecordingLogger;
    use json_diff_path::PatternError;

    #[test]
    fn defaults() {
        let options = DiffOptions::default();
        assert!(options.track_array_moves);
        assert!(!options.track_structure_updates);
        assert!(!options.replace_primitives_arrays);
        assert_eq!(options.path_sort, PathSort::Sorted);
        assert_eq!(options.log_level, LogLevel::Warn);
        assert!(options.logger.is_none());
    }

    #[test]
    fn natural_sort_is_rejected() {
        let options = DiffOptions::new().with_path_sort(PathSort::Natural);
        let err = Settings::compile(&options, None).unwrap_err();
        assert!(matches!(err, DiffError::UnsupportedPathSort(PathSort::Natural)));
        assert_eq!(err.to_string(), "unsupported path_sort strategy: natural");
    }

    #[test]
    fn bad_patterns_name_their_option() {
        let options = DiffOptions::new().with_ignore_paths(["relative"]);
        match Settings::compile(&options, None).unwrap_err() {
            DiffError::Pattern { option, source } => {
                assert_eq!(option, "ignore_paths");
                assert_eq!(source, PatternError::NotAbsolute("relative".into()));
            }
            other => panic!("unexpected {other:?}"),
        }

        let options = DiffOptions::new().with_count_rule(CountRule::new("/a/**/b", OpKind::ALL));
        assert!(matches!(
            Settings::compile(&options, None),
            Err(DiffError::Pattern {
                option: "count_operations",
                ..
            })
        ));
    }

    #[test]
    fn nested_options_are_validated_eagerly() {
        let nested = DiffOptions::new().with_ignore_paths(["nope"]);
        let options =
            DiffOptions::new().with_sub_diff("/items/*", SubDiffRule::new("id").with_options(nested));
        match Settings::compile(&options, None).unwrap_err() {
            DiffError::SubDiff { key, source } => {
                assert_eq!(key, "/items/*");
                assert!(matches!(*source, DiffError::Pattern { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nested_logger_is_inherited() {
        let sink = Arc::new(RecordingLogger::default());
        let options = DiffOptions::new()
            .with_logger(sink.clone())
            .with_log_level(LogLevel::Debug)
            .with_sub_diff("/items/*", SubDiffRule::new("id"));
        let settings = Settings::compile(&options, None).unwrap();
        let nested = &settings.sub_diffs[0].settings;
        assert_eq!(nested.logger.threshold(), LogLevel::Debug);
        nested.logger.log(LogLevel::Info, format_args!("from child"));
        assert_eq!(sink.records.lock().unwrap().len(), 1);
    }

    #[test]
    fn tracking_limit() {
        let options = DiffOptions::new().with_max_array_tracking_length(Some(3));
        let settings = Settings::compile(&options, None).unwrap();
        assert!(settings.tracks_moves(3, 2));
        assert!(!settings.tracks_moves(2, 4));

        let off = DiffOptions::new().with_track_array_moves(false);
        assert!(!Settings::compile(&off, None).unwrap().tracks_moves(1, 1));
    }

    #[test]
    fn deserializes_from_json_with_defaults() {
        let options: DiffOptions = serde_json::from_value(serde_json::json!({
            "ignore_paths": ["/meta/**"],
            "count_operations": [{"pattern": "/items/*"}],
            "sub_diffs": {"/items/*": {"key": "id"}}
        }))
        .unwrap();
        assert!(options.track_array_moves);
        assert_eq!(options.count_operations[0].kinds, OpKind::ALL.to_vec());
        assert_eq!(options.sub_diffs["/items/*"].key, "id");
        assert!(options.sub_diffs["/items/*"].options.track_array_moves);
    }
}
