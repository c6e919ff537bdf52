//! Structural diff of JSON documents.
//!
//! Two documents are mapped into path → metadata tables, compared into a
//! path-addressed set of operations (`add`, `replace`, `remove`, `move`,
//! `update`, plus `ignore` markers), counted under pattern rules, and
//! optionally split into nested sub-diffs of matched fragments. Paths use
//! the `json-diff-path` conventions: `""` is the root, keys are escaped as in
//! JSON Pointer.
//!
//! # Example
//!
//! ```
//! use json_diff::{Diff, DiffOptions, OpKind, Operation};
//! use serde_json::json;
//!
//! let old = json!({"a": 1, "b": [1, 2, 3]});
//! let new = json!({"a": 2, "b": [3, 2, 1]});
//! let diff = Diff::new(&old, &new, DiffOptions::default()).unwrap();
//!
//! assert_eq!(diff.operations_at("/a")[0].kind(), OpKind::Replace);
//! assert_eq!(
//!     diff.operations_at("/b/0")[0],
//!     Operation::Move { from: "/b/0".into(), path: "/b/2".into() }
//! );
//! assert!(diff.operations_at("/b/1").is_empty());
//! assert_eq!(diff.count(OpKind::Move), 2);
//! ```

pub mod count;
pub mod diff;
mod engine;
pub mod error;
pub mod fingerprint;
pub mod log;
pub mod mapping;
pub mod operation;
pub mod options;
pub mod sub_diff;

pub use count::Counts;
pub use diff::Diff;
pub use error::{DiffError, DiffResult, Side};
pub use log::{DiffLogger, LogLevel, NoopLogger, TracingLogger};
pub use mapping::{map_document, ElementClass, MappingError, NodeMeta, NodeType, TreeMap};
pub use operation::{OpKind, Operation, OperationMap};
pub use options::{CountRule, DiffOptions, PathSort, SubDiffRule};

pub use json_diff_path::{Pattern, PatternError};
