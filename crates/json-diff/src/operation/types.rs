//! Core types for diff operations.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Path → operations emitted at that path, in emission order.
pub type OperationMap = IndexMap<String, Vec<Operation>>;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("unknown operation kind: {0}")]
    UnknownKind(String),
}

// ── Kind ──────────────────────────────────────────────────────────────────

/// Payload-free discriminant of an [`Operation`].
///
/// The declaration order is the reporting order used by counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Ignore,
    Add,
    Replace,
    Remove,
    Move,
    Update,
}

impl OpKind {
    pub const ALL: [OpKind; 6] = [
        OpKind::Ignore,
        OpKind::Add,
        OpKind::Replace,
        OpKind::Remove,
        OpKind::Move,
        OpKind::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Ignore => "ignore",
            OpKind::Add => "add",
            OpKind::Replace => "replace",
            OpKind::Remove => "remove",
            OpKind::Move => "move",
            OpKind::Update => "update",
        }
    }

    /// Kinds that change the document (the patch projection).
    pub fn is_patch(&self) -> bool {
        matches!(
            self,
            OpKind::Add | OpKind::Replace | OpKind::Remove | OpKind::Move
        )
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| OperationError::UnknownKind(s.to_string()))
    }
}

// ── Operation ─────────────────────────────────────────────────────────────

/// A single diff operation.
///
/// A move is listed under both its source and its destination path; it is
/// attributed (counted, included in the patch) at `from` only.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Ignore {
        path: String,
    },
    Add {
        path: String,
        value: Value,
    },
    Replace {
        path: String,
        value: Value,
        old_value: Value,
    },
    Remove {
        path: String,
        old_value: Value,
    },
    Move {
        from: String,
        path: String,
    },
    Update {
        path: String,
    },
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Ignore { .. } => OpKind::Ignore,
            Operation::Add { .. } => OpKind::Add,
            Operation::Replace { .. } => OpKind::Replace,
            Operation::Remove { .. } => OpKind::Remove,
            Operation::Move { .. } => OpKind::Move,
            Operation::Update { .. } => OpKind::Update,
        }
    }

    /// Returns the operation name string.
    pub fn op_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Target path; for a move this is the destination.
    pub fn path(&self) -> &str {
        match self {
            Operation::Ignore { path }
            | Operation::Add { path, .. }
            | Operation::Replace { path, .. }
            | Operation::Remove { path, .. }
            | Operation::Move { path, .. }
            | Operation::Update { path } => path.as_str(),
        }
    }

    /// Source path of a move.
    pub fn from(&self) -> Option<&str> {
        match self {
            Operation::Move { from, .. } => Some(from.as_str()),
            _ => None,
        }
    }

    /// New value carried by `add` and `replace`.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Operation::Add { value, .. } | Operation::Replace { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Previous value carried by `replace` and `remove`.
    pub fn old_value(&self) -> Option<&Value> {
        match self {
            Operation::Replace { old_value, .. } | Operation::Remove { old_value, .. } => {
                Some(old_value)
            }
            _ => None,
        }
    }

    /// Path this operation is attributed to when counting or building a
    /// patch: the source for a move, the target otherwise.
    pub fn attributed_path(&self) -> &str {
        self.from().unwrap_or_else(|| self.path())
    }
}
