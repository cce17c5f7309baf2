//! The sorted-by-time sequence of profile entries.

use super::entry::ProfileEntry;
use crate::compare::Comparator;
use crate::scalar::Scalar;

/// Entries in strictly increasing time order.
///
/// Lookups and inserts are comparator-aware so that a tolerant profile
/// treats ε-close instants as the same boundary. Both are `O(log n)`
/// binary searches (the insert itself shifts the tail).
#[derive(Debug, Clone)]
pub(crate) struct Timeline<K: Scalar> {
    entries: Vec<ProfileEntry<K>>,
}

impl<K: Scalar> Timeline<K> {
    /// A timeline holding just its origin entry.
    pub(crate) fn with_origin(origin: ProfileEntry<K>) -> Self {
        Self {
            entries: vec![origin],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> &[ProfileEntry<K>] {
        &self.entries
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut ProfileEntry<K> {
        &mut self.entries[index]
    }

    /// Index of the greatest entry with `time <= value`, or `None` when
    /// `value` precedes every entry.
    pub(crate) fn find_le<C: Comparator<K>>(&self, value: K, comp: &C) -> Option<usize> {
        let idx = self.entries.partition_point(|e| comp.le(e.time, value));
        idx.checked_sub(1)
    }

    /// Inserts `entry` preserving the sort order. The caller must have
    /// established that no existing entry shares its time.
    pub(crate) fn insert<C: Comparator<K>>(&mut self, entry: ProfileEntry<K>, comp: &C) {
        let idx = self
            .entries
            .partition_point(|e| comp.lt(e.time, entry.time));
        self.entries.insert(idx, entry);
    }

    /// Drops all entries before `index`. A no-op for `index == 0`.
    pub(crate) fn truncate_before(&mut self, index: usize) {
        if index > 0 {
            self.entries.drain(..index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Exact;
    use crate::sets::{Span, SpanSet};

    fn entry(time: i64) -> ProfileEntry<i64> {
        ProfileEntry::new(time, SpanSet::from(Span::new(0, 10)))
    }

    fn timeline(times: &[i64]) -> Timeline<i64> {
        let mut iter = times.iter();
        let mut tl = Timeline::with_origin(entry(*iter.next().unwrap()));
        for &t in iter {
            tl.insert(entry(t), &Exact);
        }
        tl
    }

    #[test]
    fn find_le_hits_exact_times() {
        let tl = timeline(&[0, 5, 10]);
        assert_eq!(tl.find_le(0, &Exact), Some(0));
        assert_eq!(tl.find_le(5, &Exact), Some(1));
        assert_eq!(tl.find_le(10, &Exact), Some(2));
    }

    #[test]
    fn find_le_lands_on_predecessor() {
        let tl = timeline(&[0, 5, 10]);
        assert_eq!(tl.find_le(3, &Exact), Some(0));
        assert_eq!(tl.find_le(7, &Exact), Some(1));
        assert_eq!(tl.find_le(99, &Exact), Some(2));
    }

    #[test]
    fn find_le_before_first_entry() {
        let tl = timeline(&[5, 10]);
        assert_eq!(tl.find_le(4, &Exact), None);
    }

    #[test]
    fn insert_keeps_order() {
        let tl = timeline(&[10, 0, 5, 7]);
        let times: Vec<i64> = tl.entries().iter().map(|e| e.time()).collect();
        assert_eq!(times, vec![0, 5, 7, 10]);
    }

    #[test]
    fn truncate_before_drops_prefix() {
        let mut tl = timeline(&[0, 5, 10]);
        tl.truncate_before(0);
        assert_eq!(tl.len(), 3);
        tl.truncate_before(2);
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.entries()[0].time(), 10);
    }
}
