//! A canonical container for non-overlapping, sorted spans.
//!
//! [`SpanSet`] wraps a `Vec<Span<K>>` and guarantees the **canonical
//! invariant** at all times: spans are sorted by lower bound, none is
//! empty, and no two overlap or abut (touching spans are merged). Because
//! of this, two sets describe the same identifiers iff their
//! representations are equal, and `PartialEq` is semantic equality.
//!
//! All algebra (`union`, `intersection`, `difference`) returns new sets;
//! a `SpanSet` is never mutated in place.

use std::fmt::Display;
use std::ops::Deref;

use super::ops;
use super::span::Span;
use crate::scalar::Scalar;

/// A sorted, disjoint, coalesced set of half-open spans.
///
/// Read access is transparent via `Deref<Target = [Span<K>]>`, so slice
/// methods (`.len()`, `.iter()`, indexing, `.first()`, `.last()`) apply
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanSet<K: Scalar>(Vec<Span<K>>);

// ─────────────────────────────────────────────────────────────────────
// Constructors
// ─────────────────────────────────────────────────────────────────────

impl<K: Scalar> SpanSet<K> {
    /// Creates an empty span set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps a `Vec` that is **already in canonical form** without
    /// re-sorting. Checked in debug builds only.
    pub(crate) fn from_sorted_unchecked(vec: Vec<Span<K>>) -> Self {
        debug_assert!(
            ops::is_canonical(&vec),
            "SpanSet::from_sorted_unchecked called with non-canonical input"
        );
        Self(vec)
    }

    /// Sorts by lower bound, merges overlapping / touching spans and
    /// drops empty ones.
    fn normalize(&mut self) {
        self.0.retain(|s| !s.is_empty());
        if self.0.len() <= 1 {
            return;
        }
        self.0.sort_by(|a, b| {
            a.lower()
                .partial_cmp(&b.lower())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut merged: Vec<Span<K>> = Vec::with_capacity(self.0.len());
        for span in self.0.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.upper() >= span.lower() {
                    if span.upper() > last.upper() {
                        *last = Span::new(last.lower(), span.upper());
                    }
                } else {
                    merged.push(span);
                }
            } else {
                merged.push(span);
            }
        }
        self.0 = merged;
    }
}

// ─────────────────────────────────────────────────────────────────────
// Set algebra and queries
// ─────────────────────────────────────────────────────────────────────

impl<K: Scalar> SpanSet<K> {
    /// Returns the union of `self` and `other`.
    pub fn union(&self, other: &SpanSet<K>) -> SpanSet<K> {
        ops::compute_union(&self.0, &other.0)
    }

    /// Returns the identifiers present in both sets.
    pub fn intersection(&self, other: &SpanSet<K>) -> SpanSet<K> {
        ops::compute_intersection(&self.0, &other.0)
    }

    /// Returns the identifiers of `self` that are not in `other`.
    pub fn difference(&self, other: &SpanSet<K>) -> SpanSet<K> {
        ops::compute_difference(&self.0, &other.0)
    }

    /// Returns true if every identifier of `span` is in the set.
    pub fn contains(&self, span: &Span<K>) -> bool {
        span.is_empty() || self.0.iter().any(|s| s.contains(span))
    }

    /// Returns true if `id` is in the set.
    pub fn contains_value(&self, id: K) -> bool {
        self.0.iter().any(|s| s.contains_value(id))
    }

    /// Total amount of resource in the set: the sum of member measures.
    pub fn quantity(&self) -> K {
        self.0
            .iter()
            .fold(K::ZERO, |acc, span| acc + span.measure())
    }

    /// Returns a slice of the member spans, in order.
    pub fn as_slice(&self) -> &[Span<K>] {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Transparent read access and conversions
// ─────────────────────────────────────────────────────────────────────

impl<K: Scalar> Deref for SpanSet<K> {
    type Target = [Span<K>];

    fn deref(&self) -> &[Span<K>] {
        &self.0
    }
}

impl<K: Scalar> From<Vec<Span<K>>> for SpanSet<K> {
    /// Creates a `SpanSet` from an unsorted `Vec`, normalizing on
    /// construction.
    fn from(vec: Vec<Span<K>>) -> Self {
        let mut set = Self(vec);
        set.normalize();
        set
    }
}

impl<K: Scalar> From<Span<K>> for SpanSet<K> {
    fn from(span: Span<K>) -> Self {
        if span.is_empty() {
            Self::new()
        } else {
            Self(vec![span])
        }
    }
}

impl<K: Scalar> FromIterator<Span<K>> for SpanSet<K> {
    fn from_iter<I: IntoIterator<Item = Span<K>>>(iter: I) -> Self {
        let vec: Vec<Span<K>> = iter.into_iter().collect();
        Self::from(vec)
    }
}

impl<K: Scalar> IntoIterator for SpanSet<K> {
    type Item = Span<K>;
    type IntoIter = std::vec::IntoIter<Span<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K: Scalar> IntoIterator for &'a SpanSet<K> {
    type Item = &'a Span<K>;
    type IntoIter = std::slice::Iter<'a, Span<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Scalar> Default for SpanSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Scalar> Display for SpanSet<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, span) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", span)?;
        }
        write!(f, "}}")
    }
}

/// Enables `assert_eq!(span_set, vec![...])` in tests.
impl<K: Scalar> PartialEq<Vec<Span<K>>> for SpanSet<K> {
    fn eq(&self, other: &Vec<Span<K>>) -> bool {
        self.0 == *other
    }
}

/// Enables `assert_eq!(vec![...], span_set)` in tests.
impl<K: Scalar> PartialEq<SpanSet<K>> for Vec<Span<K>> {
    fn eq(&self, other: &SpanSet<K>) -> bool {
        *self == other.0
    }
}

// ─────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<K: Scalar + serde::Serialize> serde::Serialize for SpanSet<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, K: Scalar + serde::Deserialize<'de>> serde::Deserialize<'de> for SpanSet<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = Vec::<Span<K>>::deserialize(deserializer)?;
        Ok(Self::from(vec))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(lower: i64, upper: i64) -> Span<i64> {
        Span::new(lower, upper)
    }

    // ── Construction ──────────────────────────────────────────────────

    #[test]
    fn new_is_empty() {
        let set = SpanSet::<i64>::new();
        assert!(set.is_empty());
        assert_eq!(set.quantity(), 0);
    }

    #[test]
    fn from_unsorted_normalizes() {
        let set = SpanSet::from(vec![sp(10, 20), sp(0, 5)]);
        assert_eq!(set, vec![sp(0, 5), sp(10, 20)]);
    }

    #[test]
    fn from_overlapping_merges() {
        let set = SpanSet::from(vec![sp(0, 6), sp(4, 10)]);
        assert_eq!(set, vec![sp(0, 10)]);
    }

    #[test]
    fn from_abutting_merges() {
        let set = SpanSet::from(vec![sp(0, 5), sp(5, 10)]);
        assert_eq!(set, vec![sp(0, 10)]);
    }

    #[test]
    fn from_drops_empty_spans() {
        let set = SpanSet::from(vec![sp(0, 0), sp(2, 4), sp(7, 7)]);
        assert_eq!(set, vec![sp(2, 4)]);
    }

    #[test]
    fn from_empty_span_is_empty_set() {
        let set = SpanSet::from(sp(3, 3));
        assert!(set.is_empty());
    }

    #[test]
    fn from_iterator_collects() {
        let set: SpanSet<i64> = vec![sp(10, 20), sp(0, 5)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0], sp(0, 5));
    }

    // ── Queries ───────────────────────────────────────────────────────

    #[test]
    fn quantity_sums_measures() {
        let set = SpanSet::from(vec![sp(0, 2), sp(7, 10)]);
        assert_eq!(set.quantity(), 5);
    }

    #[test]
    fn quantity_continuous() {
        let set = SpanSet::from(vec![Span::new(0.0, 2.5), Span::new(5.0, 6.0)]);
        assert_eq!(set.quantity(), 3.5);
    }

    #[test]
    fn contains_member_spans() {
        let set = SpanSet::from(vec![sp(0, 2), sp(7, 10)]);
        assert!(set.contains(&sp(7, 10)));
        assert!(set.contains(&sp(8, 9)));
        assert!(!set.contains(&sp(1, 8)));
        assert!(!set.contains(&sp(2, 7)));
    }

    #[test]
    fn contains_value_checks_membership() {
        let set = SpanSet::from(vec![sp(0, 2), sp(7, 10)]);
        assert!(set.contains_value(0));
        assert!(set.contains_value(9));
        assert!(!set.contains_value(2));
        assert!(!set.contains_value(5));
    }

    // ── Algebra ───────────────────────────────────────────────────────

    #[test]
    fn union_intersection_difference() {
        let a = SpanSet::from(sp(0, 10));
        let b = SpanSet::from(sp(10, 20));
        let u = a.union(&b);
        assert_eq!(u.quantity(), 20);
        let back = u.difference(&b);
        assert_eq!(back, a);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn difference_then_quantity() {
        let pool = SpanSet::from(sp(0, 10));
        let busy = SpanSet::from(sp(2, 7));
        let free = pool.difference(&busy);
        assert_eq!(free, vec![sp(0, 2), sp(7, 10)]);
        assert_eq!(free.quantity(), 5);
    }

    #[test]
    fn algebra_results_are_canonical() {
        let a = SpanSet::from(vec![sp(0, 5), sp(7, 12)]);
        let b = SpanSet::from(sp(5, 7));
        // Union bridges the gap and must coalesce into one span.
        assert_eq!(a.union(&b), vec![sp(0, 12)]);
    }

    // ── Equality / Display ────────────────────────────────────────────

    #[test]
    fn semantic_equality() {
        let a = SpanSet::from(vec![sp(0, 5), sp(5, 10)]);
        let b = SpanSet::from(sp(0, 10));
        assert_eq!(a, b);
    }

    #[test]
    fn display_format() {
        let set = SpanSet::from(vec![sp(0, 2), sp(7, 10)]);
        assert_eq!(format!("{}", set), "{[0, 2), [7, 10)}");
    }

    // ── Deref ─────────────────────────────────────────────────────────

    #[test]
    fn deref_provides_slice_methods() {
        let set = SpanSet::from(vec![sp(0, 2), sp(7, 10)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.first(), Some(&sp(0, 2)));
        assert_eq!(set.last(), Some(&sp(7, 10)));
        assert_eq!(set.iter().count(), 2);
    }

    // ── Serde ─────────────────────────────────────────────────────────

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn roundtrip() {
            let set = SpanSet::from(vec![sp(0, 2), sp(7, 10)]);
            let json = serde_json::to_string(&set).unwrap();
            let restored: SpanSet<i64> = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, set);
        }

        #[test]
        fn deserialize_normalizes() {
            let json = r#"[{"lower": 5, "upper": 10}, {"lower": 0, "upper": 5}]"#;
            let set: SpanSet<i64> = serde_json::from_str(json).unwrap();
            assert_eq!(set, vec![sp(0, 10)]);
        }

        #[test]
        fn deserialize_rejects_inverted_span() {
            let json = r#"[{"lower": 10, "upper": 0}]"#;
            let result: Result<SpanSet<i64>, _> = serde_json::from_str(json);
            assert!(result.is_err());
        }
    }
}
