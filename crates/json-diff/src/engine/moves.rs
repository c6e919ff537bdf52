//! Greedy array move detection.
//!
//! Positions holding the same value at the same index are shared and never
//! move. Every other position on either side is a candidate. Old candidates
//! are taken in index order; each one pairs with the equal-valued new
//! candidate nearest to it (lowest new index on a tie). Pairing stops once
//! `min(old candidates, new candidates)` moves are recorded. A new
//! candidate may be chosen by more than one old candidate, so the result is
//! not a matching and not globally optimal.

use serde_json::Value;

/// A value relocated from `from` in the old array to `to` in the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndexMove {
    pub(crate) from: usize,
    pub(crate) to: usize,
}

impl IndexMove {
    pub(crate) fn touches(&self, index: usize) -> bool {
        self.from == index || self.to == index
    }
}

/// One side of an array: values plus their fingerprints.
#[derive(Clone, Copy)]
pub(crate) struct Elements<'a> {
    pub(crate) values: &'a [Value],
    pub(crate) fingerprints: &'a [u64],
}

impl<'a> Elements<'a> {
    pub(crate) fn new(values: &'a [Value], fingerprints: &'a [u64]) -> Self {
        Elements {
            values,
            fingerprints,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn same(&self, i: usize, other: &Elements<'_>, j: usize) -> bool {
        self.fingerprints.get(i) == other.fingerprints.get(j) && self.values.get(i) == other.values.get(j)
    }
}

pub(crate) fn detect_moves(old: Elements<'_>, new: Elements<'_>) -> Vec<IndexMove> {
    let shared = |i: usize| i < old.len() && i < new.len() && old.same(i, &new, i);
    let old_candidates: Vec<usize> = (0..old.len()).filter(|&i| !shared(i)).collect();
    let new_candidates: Vec<usize> = (0..new.len()).filter(|&j| !shared(j)).collect();

    let max_moves = old_candidates.len().min(new_candidates.len());
    let mut moves = Vec::new();
    for &from in &old_candidates {
        if moves.len() >= max_moves {
            break;
        }
        let nearest = new_candidates
            .iter()
            .copied()
            .filter(|&to| old.same(from, &new, to))
            .min_by_key(|&to| (from.abs_diff(to), to));
        if let Some(to) = nearest {
            moves.push(IndexMove { from, to });
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::fingerprint;
    use serde_json::json;

    fn moves_between(old: Value, new: Value) -> Vec<(usize, usize)> {
        let old = old.as_array().unwrap().clone();
        let new = new.as_array().unwrap().clone();
        let old_fps: Vec<u64> = old.iter().map(fingerprint).collect();
        let new_fps: Vec<u64> = new.iter().map(fingerprint).collect();
        detect_moves(Elements::new(&old, &old_fps), Elements::new(&new, &new_fps))
            .into_iter()
            .map(|m| (m.from, m.to))
            .collect()
    }

    #[test]
    fn swap_pairs_both_ways() {
        assert_eq!(moves_between(json!([1, 2, 3]), json!([3, 2, 1])), vec![(0, 2), (2, 0)]);
    }

    #[test]
    fn rotation_moves_every_slot() {
        assert_eq!(
            moves_between(json!([1, 2, 3]), json!([3, 1, 2])),
            vec![(0, 1), (1, 2), (2, 0)]
        );
    }

    #[test]
    fn shared_positions_never_move() {
        assert!(moves_between(json!([1, 2]), json!([1, 2, 3])).is_empty());
        assert!(moves_between(json!([]), json!([1])).is_empty());
    }

    #[test]
    fn nearest_destination_wins_and_ties_go_low() {
        // 9 at old 2 can go to new 0 or new 4; both are distance 2.
        assert_eq!(
            moves_between(json!([0, 0, 9, 0, 0]), json!([9, 0, 1, 0, 9])),
            vec![(2, 0)]
        );
        // 7 at old 2 prefers new 3 (distance 1) over new 0 (distance 2).
        assert_eq!(moves_between(json!([0, 0, 7]), json!([7, 0, 1, 7])), vec![(2, 3)]);
    }

    #[test]
    fn stops_at_the_smaller_candidate_count() {
        // One new candidate, so only the first matching old "b" moves.
        assert_eq!(moves_between(json!(["a", "a", "b", "b"]), json!(["b"])), vec![(2, 0)]);
    }

    #[test]
    fn destination_can_be_reused() {
        assert_eq!(
            moves_between(json!([1, 1, 2, 3]), json!([2, 3, 1, 4])),
            vec![(0, 2), (1, 2), (2, 0), (3, 1)]
        );
    }

    #[test]
    fn containers_compare_by_value() {
        assert_eq!(
            moves_between(json!([{"a": 1, "b": 2}, 0]), json!([0, {"b": 2, "a": 1}])),
            vec![(0, 1), (1, 0)]
        );
    }
}
