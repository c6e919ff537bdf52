//! Patch operations produced by the diff engine.
//!
//! # Operations
//!
//! `add`, `remove`, `replace` and `move` follow RFC 6902 naming; `move`
//! pairs a source and destination path for a relocated, unchanged array
//! element.
//!
//! Markers that do not change the document:
//! `ignore` (a configured ignore pattern covered the path) and `update`
//! (a direct child of a container changed).

pub mod codec;
pub mod types;

pub use codec::{to_json, to_json_patch};
pub use types::{OpKind, Operation, OperationError, OperationMap};
