//! Stable multi-field sorting.
//!
//! Collections are ordered by an ordered list of criteria: the first
//! criterion producing a non-equal comparison decides, ties fall through
//! to the next, and total ties keep their original relative order. The
//! input is never mutated; callers get a new ordered vector.

use std::cmp::Ordering;

/// Sort direction for a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single sort criterion: a key comparator plus a direction.
pub struct SortCriterion<T> {
    compare: Box<dyn Fn(&T, &T) -> Ordering>,
    direction: SortDirection,
}

impl<T> SortCriterion<T> {
    /// Build a criterion from a key extractor.
    ///
    /// String keys compare case-sensitively, which is the default lexical
    /// ordering for `Ord` on strings.
    pub fn by_key<K, F>(key: F, direction: SortDirection) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self {
            compare: Box::new(move |a, b| key(a).cmp(&key(b))),
            direction,
        }
    }

    /// Build a criterion from a raw comparator, for keys without a total
    /// order (e.g. floats).
    pub fn by_compare<F>(compare: F, direction: SortDirection) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            compare: Box::new(compare),
            direction,
        }
    }

    fn ordering(&self, a: &T, b: &T) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Sort records by the given criteria, in criteria order.
///
/// Stable: records comparing equal under every criterion keep their
/// original relative order. Returns a new vector; the input is untouched.
pub fn multi_sort<T: Clone>(records: &[T], criteria: &[SortCriterion<T>]) -> Vec<T> {
    let mut sorted: Vec<T> = records.to_vec();
    sorted.sort_by(|a, b| {
        criteria
            .iter()
            .map(|criterion| criterion.ordering(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    sorted
}
