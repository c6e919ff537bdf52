//! Error types for the diff crate.

use std::fmt;

use json_diff_path::PatternError;
use thiserror::Error;

use crate::mapping::MappingError;
use crate::options::PathSort;

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Old,
    New,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Old => "old",
            Side::New => "new",
        })
    }
}

/// Errors that can occur while building a diff.
///
/// Configuration errors are raised before any document is mapped.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A pattern in the configuration could not be parsed.
    #[error("invalid pattern in {option}: {source}")]
    Pattern {
        option: &'static str,
        #[source]
        source: PatternError,
    },

    /// The configured path ordering is not implemented.
    #[error("unsupported path_sort strategy: {0}")]
    UnsupportedPathSort(PathSort),

    /// An input could not be turned into a JSON document.
    #[error("{side} document is not valid JSON: {source}")]
    InvalidDocument {
        side: Side,
        #[source]
        source: serde_json::Error,
    },

    /// An input document could not be mapped.
    #[error("{side} document: {source}")]
    Mapping {
        side: Side,
        #[source]
        source: MappingError,
    },

    /// Building a nested sub-diff failed.
    #[error("sub-diff {key}: {source}")]
    SubDiff {
        key: String,
        #[source]
        source: Box<DiffError>,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
