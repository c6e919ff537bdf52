//! Total ordering of path strings.
//!
//! Paths are compared segment by segment. At the first differing segment a
//! numeric segment sorts before a textual one, two numeric segments compare by
//! magnitude and two textual segments compare lexically. When one path is a
//! strict prefix of the other the shorter one sorts first, so a container
//! always precedes its descendants and array elements stay in index order.

use std::cmp::Ordering;

use crate::{is_numeric_segment, segments};

/// Compare two paths.
///
/// The order is total: paths that are equal segment-wise but spelled
/// differently (`/01` and `/1`) are separated by a final lexical comparison.
///
/// ```
/// use json_diff_path::compare_paths;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_paths("", "/a"), Ordering::Less);
/// assert_eq!(compare_paths("/a/9", "/a/10"), Ordering::Less);
/// assert_eq!(compare_paths("/a/10", "/a/b"), Ordering::Less);
/// assert_eq!(compare_paths("/a/b", "/a/b/0"), Ordering::Less);
/// ```
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => match compare_segments(l, r) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Compare two raw path segments.
pub fn compare_segments(a: &str, b: &str) -> Ordering {
    match (is_numeric_segment(a), is_numeric_segment(b)) {
        (true, true) => compare_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

// Digit strings of any length: strip leading zeros, then the longer number is
// larger and equal-length numbers compare digit by digit.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a_digits = a.trim_start_matches('0');
    let b_digits = b.trim_start_matches('0');
    a_digits
        .len()
        .cmp(&b_digits.len())
        .then_with(|| a_digits.cmp(b_digits))
        .then_with(|| a.cmp(b))
}

/// Sort paths in place (stable).
pub fn sort_paths<S: AsRef<str>>(paths: &mut [S]) {
    paths.sort_by(|a, b| compare_paths(a.as_ref(), b.as_ref()));
}

/// Sorted, de-duplicated union of two path collections.
///
/// ```
/// use json_diff_path::sorted_union;
///
/// let old = ["", "/b", "/a"];
/// let new = ["", "/a", "/a/0"];
/// assert_eq!(sorted_union(old, new), vec!["", "/a", "/a/0", "/b"]);
/// ```
pub fn sorted_union<I, J, S>(left: I, right: J) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    J: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut all: Vec<String> = left
        .into_iter()
        .chain(right)
        .map(|p| p.as_ref().to_string())
        .collect();
    sort_paths(&mut all);
    all.dedup();
    all
}
