//! Operation counting under ordered pattern rules.

use std::fmt;

use serde::Serialize;

use crate::operation::{OpKind, Operation, OperationMap};
use crate::options::CompiledCountRule;

/// Number of operations per kind.
///
/// Every kind is present; kinds that never occurred report zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Counts {
    pub ignore: usize,
    pub add: usize,
    pub replace: usize,
    pub remove: usize,
    #[serde(rename = "move")]
    pub moves: usize,
    pub update: usize,
}

impl Counts {
    pub fn get(&self, kind: OpKind) -> usize {
        match kind {
            OpKind::Ignore => self.ignore,
            OpKind::Add => self.add,
            OpKind::Replace => self.replace,
            OpKind::Remove => self.remove,
            OpKind::Move => self.moves,
            OpKind::Update => self.update,
        }
    }

    fn slot(&mut self, kind: OpKind) -> &mut usize {
        match kind {
            OpKind::Ignore => &mut self.ignore,
            OpKind::Add => &mut self.add,
            OpKind::Replace => &mut self.replace,
            OpKind::Remove => &mut self.remove,
            OpKind::Move => &mut self.moves,
            OpKind::Update => &mut self.update,
        }
    }

    pub fn total(&self) -> usize {
        OpKind::ALL.iter().map(|&kind| self.get(kind)).sum()
    }

    /// `(kind, count)` pairs in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (OpKind, usize)> + '_ {
        OpKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (kind, n) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{kind}={n}")?;
        }
        Ok(())
    }
}

/// Whether `op`, listed under `path`, is attributed there. Moves are listed
/// at both ends but belong to their source.
fn attributed_here(path: &str, op: &Operation) -> bool {
    op.attributed_path() == path
}

/// Count the operations in `ops`, visiting paths in `order`.
///
/// With no rules every kind counts at every path. Otherwise the first rule
/// whose pattern matches a path decides which kinds count there; a path no
/// rule matches contributes nothing.
pub(crate) fn count_operations<S: AsRef<str>>(
    ops: &OperationMap,
    order: &[S],
    rules: &[CompiledCountRule],
) -> Counts {
    let mut counts = Counts::default();
    for path in order {
        let path: &str = path.as_ref();
        let Some(list) = ops.get(path) else {
            continue;
        };
        let rule = if rules.is_empty() {
            None
        } else {
            match rules.iter().find(|rule| rule.pattern.matches(path)) {
                Some(rule) => Some(rule),
                None => continue,
            }
        };
        for op in list.iter().filter(|op| attributed_here(path, op)) {
            let kind = op.kind();
            if rule.map_or(true, |rule| rule.kinds.contains(&kind)) {
                *counts.slot(kind) += 1;
            }
        }
    }
    counts
}
