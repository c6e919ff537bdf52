//! Path strings shared by every json-diff component.
//!
//! A path addresses one node of a JSON document. It is built from the root
//! (the empty string) by appending `/` followed by either a decimal array
//! index or an object key. Object keys are escaped as in
//! [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901) so that
//! splitting a path on `/` always recovers the keys.
//!
//! # Example
//!
//! ```
//! use json_diff_path::{child_index, child_key, compare_paths, Pattern};
//! use std::cmp::Ordering;
//!
//! let tags = child_key("", "tags");
//! let first = child_index(&tags, 0);
//! assert_eq!(first, "/tags/0");
//!
//! assert_eq!(compare_paths("/tags/2", "/tags/10"), Ordering::Less);
//!
//! let pattern = Pattern::parse("/tags/*").unwrap();
//! assert!(pattern.matches(&first));
//! ```

pub mod order;
pub mod pattern;

pub use order::{compare_paths, compare_segments, sort_paths, sorted_union};
pub use pattern::{matches, Pattern, PatternError, Wildcard};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Escapes an object key so it can be used as a path segment.
///
/// ```
/// use json_diff_path::escape_segment;
///
/// assert_eq!(escape_segment("a~b"), "a~0b");
/// assert_eq!(escape_segment("c/d"), "c~1d");
/// assert_eq!(escape_segment("plain"), "plain");
/// ```
pub fn escape_segment(key: &str) -> String {
    if !key.contains('/') && !key.contains('~') {
        return key.to_string();
    }
    key.replace('~', "~0").replace('/', "~1")
}

/// Iterates the raw (still escaped) segments of a path.
///
/// The root path has no segments; `"/"` has a single empty segment (the
/// empty object key).
///
/// ```
/// use json_diff_path::segments;
///
/// assert_eq!(segments("").count(), 0);
/// assert_eq!(segments("/").collect::<Vec<_>>(), vec![""]);
/// assert_eq!(segments("/a/0").collect::<Vec<_>>(), vec!["a", "0"]);
/// ```
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    let body = if path.is_empty() {
        None
    } else {
        Some(path.strip_prefix(SEPARATOR).unwrap_or(path))
    };
    body.into_iter().flat_map(|body| body.split(SEPARATOR))
}

/// Path of the member `key` of the object at `parent`.
pub fn child_key(parent: &str, key: &str) -> String {
    let escaped = escape_segment(key);
    let mut out = String::with_capacity(parent.len() + escaped.len() + 1);
    out.push_str(parent);
    out.push(SEPARATOR);
    out.push_str(&escaped);
    out
}

/// Path of element `index` of the array at `parent`.
pub fn child_index(parent: &str, index: usize) -> String {
    format!("{parent}{SEPARATOR}{index}")
}

/// Number of segments in a path; the root has depth zero.
pub fn depth(path: &str) -> usize {
    segments(path).count()
}

/// Check if a segment consists only of ASCII digits.
///
/// Such segments sort as numbers; see [`compare_segments`].
pub fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
