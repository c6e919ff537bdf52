//! Tree mapper: one depth-first walk of a document into path → metadata.
//!
//! Every node gets an entry, containers included. Objects are walked in
//! document key order and arrays by index, so [`TreeMap::paths`] is the
//! pre-order of the document. Element classes and fingerprints are computed
//! in the same pass: each node's fingerprint is folded from its children's
//! on the way back up.

use indexmap::IndexMap;
use json_diff_path::{child_index, child_key, sort_paths};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::fingerprint;

/// Maximum nesting depth accepted by the mapper (and therefore by the
/// recursive comparison that follows it).
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("nesting deeper than {limit} levels at {path:?}")]
    TooDeep { path: String, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Primitive,
    Array,
    Object,
}

impl NodeType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => NodeType::Array,
            Value::Object(_) => NodeType::Object,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                NodeType::Primitive
            }
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, NodeType::Primitive)
    }
}

/// What an array holds. Gates the whole-array replace shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementClass {
    Empty,
    Primitives,
    Containers,
    Mixed,
}

impl ElementClass {
    pub fn of(items: &[Value]) -> Self {
        let containers = items
            .iter()
            .filter(|v| NodeType::of(v).is_container())
            .count();
        match (items.len(), containers) {
            (0, _) => ElementClass::Empty,
            (_, 0) => ElementClass::Primitives,
            (len, n) if len == n => ElementClass::Containers,
            _ => ElementClass::Mixed,
        }
    }
}

/// Metadata recorded for one node of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMeta {
    pub value: Value,
    pub node_type: NodeType,
    /// Set for arrays only.
    pub element_class: Option<ElementClass>,
    /// Position among its siblings (array index or key position).
    pub index: usize,
    /// Originating object key, unescaped.
    pub key: Option<String>,
    /// True unless this is the last child of its parent.
    pub trailing_separator: bool,
    /// Number of path segments; the root is 0.
    pub depth: usize,
    /// Child count for containers.
    pub length: Option<usize>,
    pub fingerprint: u64,
    /// Fingerprint of every element, for arrays; empty otherwise.
    pub element_fingerprints: Vec<u64>,
}

impl NodeMeta {
    pub fn is_container(&self) -> bool {
        self.node_type.is_container()
    }
}

/// Path → node metadata for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeMap {
    nodes: IndexMap<String, NodeMeta>,
}

impl TreeMap {
    pub fn get(&self, path: &str) -> Option<&NodeMeta> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    /// The root node; absent only for a default-constructed map.
    pub fn root(&self) -> Option<&NodeMeta> {
        self.nodes.get("")
    }

    /// Paths in document (pre-)order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Paths in the total path order.
    pub fn sorted_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.nodes.keys().cloned().collect();
        sort_paths(&mut paths);
        paths
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeMeta)> {
        self.nodes.iter().map(|(path, meta)| (path.as_str(), meta))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct Position<'a> {
    index: usize,
    key: Option<&'a str>,
    trailing_separator: bool,
    depth: usize,
}

struct Mapper {
    nodes: IndexMap<String, NodeMeta>,
}

impl Mapper {
    /// Records `value` at `path`, then its children; returns its fingerprint.
    fn walk(&mut self, value: &Value, path: String, at: Position<'_>) -> Result<u64, MappingError> {
        if at.depth > MAX_DEPTH {
            return Err(MappingError::TooDeep {
                path,
                limit: MAX_DEPTH,
            });
        }

        let node_type = NodeType::of(value);
        let (slot, _) = self.nodes.insert_full(
            path.clone(),
            NodeMeta {
                value: value.clone(),
                node_type,
                element_class: None,
                index: at.index,
                key: at.key.map(str::to_string),
                trailing_separator: at.trailing_separator,
                depth: at.depth,
                length: None,
                fingerprint: 0,
                element_fingerprints: Vec::new(),
            },
        );

        let depth = at.depth + 1;
        let (fp, element_fingerprints, length) = match value {
            Value::Array(items) => {
                let last = items.len().saturating_sub(1);
                let mut fps = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let position = Position {
                        index: i,
                        key: None,
                        trailing_separator: i < last,
                        depth,
                    };
                    fps.push(self.walk(item, child_index(&path, i), position)?);
                }
                (fingerprint::array(fps.iter().copied()), fps, Some(items.len()))
            }
            Value::Object(map) => {
                let last = map.len().saturating_sub(1);
                let mut members = Vec::with_capacity(map.len());
                for (i, (key, item)) in map.iter().enumerate() {
                    let position = Position {
                        index: i,
                        key: Some(key),
                        trailing_separator: i < last,
                        depth,
                    };
                    members.push((key.as_str(), self.walk(item, child_key(&path, key), position)?));
                }
                (fingerprint::object(members), Vec::new(), Some(map.len()))
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                (fingerprint::fingerprint(value), Vec::new(), None)
            }
        };

        if let Some((_, meta)) = self.nodes.get_index_mut(slot) {
            meta.fingerprint = fp;
            meta.length = length;
            if let Value::Array(items) = value {
                meta.element_class = Some(ElementClass::of(items));
                meta.element_fingerprints = element_fingerprints;
            }
        }
        Ok(fp)
    }
}

/// Map a document.
///
/// # Errors
///
/// Returns [`MappingError::TooDeep`] naming the first path nested deeper
/// than [`MAX_DEPTH`].
pub fn map_document(document: &Value) -> Result<TreeMap, MappingError> {
    let mut mapper = Mapper {
        nodes: IndexMap::new(),
    };
    let root = Position {
        index: 0,
        key: None,
        trailing_separator: false,
        depth: 0,
    };
    mapper.walk(document, String::new(), root)?;
    Ok(TreeMap {
        nodes: mapper.nodes,
    })
}
