//! A point on the timeline where availability changes.

use std::fmt::Display;

use crate::scalar::Scalar;
use crate::sets::SpanSet;

/// One step of the piecewise-constant availability function.
///
/// `resources` is the set of identifiers free from `time` (inclusive)
/// until the next entry's time (exclusive); the last entry extends
/// indefinitely. `num_units` counts the allocations whose start or end
/// instant coincides with `time`. An entry must never be coalesced away
/// while that count is positive, or a later release of one of those
/// allocations would land on a missing boundary.
#[derive(Debug, Clone)]
pub struct ProfileEntry<K: Scalar> {
    pub(crate) time: K,
    pub(crate) resources: SpanSet<K>,
    pub(crate) num_units: u32,
}

impl<K: Scalar> ProfileEntry<K> {
    pub(crate) fn new(time: K, resources: SpanSet<K>) -> Self {
        Self {
            time,
            resources,
            num_units: 1,
        }
    }

    /// Copy of this entry placed at another instant, with a fresh
    /// reference count.
    pub(crate) fn with_time(&self, time: K) -> Self {
        Self::new(time, self.resources.clone())
    }

    pub fn time(&self) -> K {
        self.time
    }

    pub fn resources(&self) -> &SpanSet<K> {
        &self.resources
    }

    pub fn num_units(&self) -> u32 {
        self.num_units
    }
}

/// Entries are identified by their instant alone; the sets they carry do
/// not participate in equality.
impl<K: Scalar> PartialEq for ProfileEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl<K: Scalar> Display for ProfileEntry<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(t={}, free={}, units={})",
            self.time, self.resources, self.num_units
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::Span;

    #[test]
    fn equality_is_by_time_only() {
        let a = ProfileEntry::new(5, SpanSet::from(Span::new(0, 10)));
        let b = ProfileEntry::new(5, SpanSet::from(Span::new(3, 4)));
        let c = ProfileEntry::new(6, SpanSet::from(Span::new(0, 10)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn with_time_resets_the_refcount() {
        let mut a = ProfileEntry::new(5, SpanSet::from(Span::new(0, 10)));
        a.num_units = 3;
        let b = a.with_time(8);
        assert_eq!(b.time(), 8);
        assert_eq!(b.num_units(), 1);
        assert_eq!(b.resources(), a.resources());
    }

    #[test]
    fn display_format() {
        let e = ProfileEntry::new(0, SpanSet::from(Span::new(0, 10)));
        assert_eq!(format!("{}", e), "(t=0, free={[0, 10)}, units=1)");
    }
}
