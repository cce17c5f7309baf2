//! Availability profiles over a divisible resource pool.
//!
//! A profile is the planning substrate a scheduler consults before
//! placing work: a timeline of [`ProfileEntry`] records, each carrying
//! the set of identifiers free from its instant until the next entry.
//! Queries walk that timeline carrying full identifier sets, because a
//! placement needs the *same* identifiers free for its whole duration
//! rather than a sufficient count at each instant;
//! [`Profile::allocate_resources`] updates the timeline in place.
//!
//! Two concrete flavours instantiate the same generic body:
//! [`DiscreteProfile`] (integer identifiers and times, exact
//! comparisons) and [`ContinuousProfile`] (float pool and times,
//! tolerance-aware comparisons).

mod entry;
mod error;
mod slot;
mod timeline;


pub use entry::ProfileEntry;
pub use error::ProfileError;
pub use slot::TimeSlot;

use std::fmt::Display;

use crate::compare::{Comparator, Exact, Tolerant};
use crate::scalar::Scalar;
use crate::sets::{Span, SpanSet};
use timeline::Timeline;

/// Tracks which portions of a resource pool are free over time and
/// answers scheduling queries against that history.
///
/// The pool is the identifier range `[0, max_capacity)`. A fresh profile
/// has the whole pool free from its origin onwards; every allocation
/// carves its identifier set out of the window it occupies.
///
/// Queries are read-only and clone whatever they need; mutators take
/// `&mut self` and either complete fully or leave the timeline
/// untouched.
///
/// # Examples
///
/// ```
/// use freespan::DiscreteProfile;
///
/// let mut profile = DiscreteProfile::new(10);
///
/// // Where can a job needing 4 nodes for 25 ticks run, at the earliest?
/// let slot = profile.find_start_time(4, 0, 25).unwrap().unwrap();
/// assert_eq!(slot.start_time(), 0);
///
/// // Pick 4 nodes out of the offered set and commit them.
/// let picked = profile.select_slot_resources(&slot, 4).unwrap();
/// assert_eq!(picked.quantity(), 4);
/// profile
///     .allocate_resources(&picked, slot.start_time(), slot.end_time())
///     .unwrap();
///
/// // Those nodes are now busy for the whole window.
/// let check = profile.check_availability(10, 0, 25).unwrap();
/// assert!(check.resources().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Profile<K: Scalar, C: Comparator<K>> {
    timeline: Timeline<K>,
    max_capacity: K,
    comp: C,
}

/// Integer pool with exact time and quantity comparisons.
pub type DiscreteProfile = Profile<i64, Exact>;

/// Float pool with ε-tolerant time and quantity comparisons.
pub type ContinuousProfile = Profile<f64, Tolerant>;

impl DiscreteProfile {
    /// A discrete profile over the identifiers `[0, max_capacity)`,
    /// starting at time `0`.
    pub fn new(max_capacity: i64) -> Self {
        Self::with_parts(max_capacity, 0, Exact)
    }
}

impl ContinuousProfile {
    /// A continuous profile over `[0.0, max_capacity)`, starting at time
    /// `0.0`, with the default tolerance.
    pub fn new(max_capacity: f64) -> Self {
        Self::with_parts(max_capacity, 0.0, Tolerant::default())
    }

    /// As [`ContinuousProfile::new`] with explicit comparison tolerances.
    pub fn with_tolerance(max_capacity: f64, rel_tol: f64, abs_tol: f64) -> Self {
        Self::with_parts(max_capacity, 0.0, Tolerant::new(rel_tol, abs_tol))
    }
}

impl<K: Scalar, C: Comparator<K>> Profile<K, C> {
    /// Starts configuring a profile with a custom comparator or origin.
    pub fn builder() -> ProfileBuilder<K, C> {
        ProfileBuilder::new()
    }

    fn with_parts(max_capacity: K, initial_time: K, comp: C) -> Self {
        let pool = SpanSet::from(Span::new(K::ZERO, max_capacity));
        Self {
            timeline: Timeline::with_origin(ProfileEntry::new(initial_time, pool)),
            max_capacity,
            comp,
        }
    }

    /// Size of the whole pool.
    pub fn max_capacity(&self) -> K {
        self.max_capacity
    }

    /// Number of timeline entries.
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    /// Always false: a profile keeps at least its origin entry.
    pub fn is_empty(&self) -> bool {
        self.timeline.len() == 0
    }

    /// The timeline entries, earliest first. Read-only; exposed for
    /// inspection and diagnostics.
    pub fn entries(&self) -> &[ProfileEntry<K>] {
        self.timeline.entries()
    }

    /// Identifiers free throughout `[start_time, start_time + duration)`.
    ///
    /// The returned slot carries the *exact* set that stays free for the
    /// whole window, or `None` resources as soon as that set's measure
    /// falls below `quantity`.
    pub fn check_availability(
        &self,
        quantity: K,
        start_time: K,
        duration: K,
    ) -> Result<TimeSlot<K>, ProfileError<K>> {
        let end_time = start_time + duration;
        if self.comp.le(end_time, start_time) {
            return Err(ProfileError::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }

        let entries = self.timeline.entries();
        let mut resources = None;
        if let Some(anchor) = self.timeline.find_le(start_time, &self.comp) {
            let mut acc = entries[anchor].resources().clone();
            for e in &entries[anchor + 1..] {
                if !self.comp.lt(e.time(), end_time) {
                    break;
                }
                acc = acc.intersection(e.resources());
                if self.comp.lt(acc.quantity(), quantity) {
                    break;
                }
            }
            if self.comp.ge(acc.quantity(), quantity) {
                resources = Some(acc);
            }
        }
        Ok(TimeSlot::new(Span::new(start_time, end_time), resources))
    }

    /// Earliest `t >= ready_time` at which some identifier set of measure
    /// `>= quantity` stays free throughout `[t, t + duration)`.
    ///
    /// The returned slot carries the *entire* free set over the window,
    /// not a trimmed one; pick `quantity` worth of it with
    /// [`Profile::select_slot_resources`]. Returns `Ok(None)` when no
    /// window fits.
    pub fn find_start_time(
        &self,
        quantity: K,
        ready_time: K,
        duration: K,
    ) -> Result<Option<TimeSlot<K>>, ProfileError<K>> {
        if self.comp.le(ready_time + duration, ready_time) {
            return Err(ProfileError::InvalidWindow {
                start: ready_time,
                end: ready_time + duration,
            });
        }

        let entries = self.timeline.entries();
        let first = self.timeline.find_le(ready_time, &self.comp).unwrap_or(0);
        for (offset, anchor) in entries[first..].iter().enumerate() {
            let pos = self.comp.max(ready_time, anchor.time());
            let pos_end = pos + duration;
            let mut intersect = anchor.resources().clone();
            for e in &entries[first + offset + 1..] {
                if self.comp.lt(intersect.quantity(), quantity) {
                    break;
                }
                if self.comp.ge(e.time(), pos_end) {
                    break;
                }
                intersect = intersect.intersection(e.resources());
            }
            if self.comp.ge(intersect.quantity(), quantity) {
                return Ok(Some(TimeSlot::new(
                    Span::new(pos, pos_end),
                    Some(intersect),
                )));
            }
        }
        Ok(None)
    }

    /// Marks the identifier set `resources` busy over
    /// `[start_time, end_time)`.
    ///
    /// Boundary entries are created (or their reference counts bumped
    /// when an entry already sits at the instant) and the set is
    /// subtracted from every entry inside the window. The claimed set
    /// must be free for the whole window; on any failure the timeline is
    /// left unchanged.
    pub fn allocate_resources(
        &mut self,
        resources: &SpanSet<K>,
        start_time: K,
        end_time: K,
    ) -> Result<(), ProfileError<K>> {
        if self.comp.le(end_time, start_time) {
            return Err(ProfileError::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }
        let Some(anchor) = self.timeline.find_le(start_time, &self.comp) else {
            return Err(ProfileError::CapacityExceeded {
                start: start_time,
                end: end_time,
            });
        };
        let free = self.intersection_from(anchor, end_time);
        if !resources.difference(&free).is_empty() {
            return Err(ProfileError::CapacityExceeded {
                start: start_time,
                end: end_time,
            });
        }

        // Start boundary: pin a coincident entry, otherwise split the anchor.
        let mut cursor;
        if self.comp.eq(self.timeline.entries()[anchor].time(), start_time) {
            self.timeline.entry_mut(anchor).num_units += 1;
            cursor = anchor;
        } else {
            let split = self.timeline.entries()[anchor].with_time(start_time);
            self.timeline.insert(split, &self.comp);
            cursor = anchor + 1;
        }

        // Interior: subtract from each entry in [start, end), stepping the
        // cursor so the subtraction lands only once per entry.
        let mut next = cursor + 1;
        while next < self.timeline.len() {
            if !self.comp.le(self.timeline.entries()[next].time(), end_time) {
                break;
            }
            let entry = self.timeline.entry_mut(cursor);
            entry.resources = entry.resources.difference(resources);
            cursor = next;
            next += 1;
        }

        // End boundary.
        if self.comp.eq(self.timeline.entries()[cursor].time(), end_time) {
            self.timeline.entry_mut(cursor).num_units += 1;
        } else {
            let split = self.timeline.entries()[cursor].with_time(end_time);
            self.timeline.insert(split, &self.comp);
            let entry = self.timeline.entry_mut(cursor);
            entry.resources = entry.resources.difference(resources);
        }
        Ok(())
    }

    /// Maximal free windows within `[start_time, end_time]`.
    ///
    /// Works on a clone of the relevant timeline slice: each emitted
    /// window's identifiers are subtracted from the slice it covered, so
    /// an identifier is reported at most once per starting point. Slots
    /// come out ascending by start and, within one start, from the
    /// longest-lived set down.
    pub fn free_time_slots(
        &self,
        start_time: K,
        end_time: K,
    ) -> Result<Vec<TimeSlot<K>>, ProfileError<K>> {
        if self.comp.le(end_time, start_time) {
            return Err(ProfileError::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }

        let entries = self.timeline.entries();
        let first = self.timeline.find_le(start_time, &self.comp).unwrap_or(0);
        let Some(last) = self.timeline.find_le(end_time, &self.comp) else {
            return Ok(Vec::new());
        };

        let mut slice: Vec<(K, SpanSet<K>)> = entries[first..=last]
            .iter()
            .map(|e| (e.time(), e.resources().clone()))
            .collect();

        let mut slots = Vec::new();
        for i in 0..slice.len() {
            while self.comp.gt(slice[i].1.quantity(), K::ZERO) {
                let mut covered = slice[i].1.clone();
                let mut slot_end = end_time;
                let mut end_idx = i;
                for j in i + 1..slice.len() {
                    let reduced = covered.intersection(&slice[j].1);
                    if self.comp.eq(reduced.quantity(), K::ZERO) {
                        slot_end = slice[j].0;
                        break;
                    }
                    covered = reduced;
                    end_idx = j;
                }
                for item in &mut slice[i..=end_idx] {
                    item.1 = item.1.difference(&covered);
                }
                slots.push(TimeSlot::new(Span::new(slice[i].0, slot_end), Some(covered)));
            }
        }
        Ok(slots)
    }

    /// Candidate placements at least `min_duration` long with at least
    /// `min_quantity` units free throughout, within
    /// `[start_time, end_time]`.
    ///
    /// Every anchor is explored and slots may share identifiers: each
    /// time a follower shrinks the running set, the window so far is
    /// closed and emitted (when it meets both thresholds) and the walk
    /// continues with the smaller set. Slots come out ascending by start,
    /// then by end.
    pub fn scheduling_options(
        &self,
        start_time: K,
        end_time: K,
        min_duration: K,
        min_quantity: K,
    ) -> Result<Vec<TimeSlot<K>>, ProfileError<K>> {
        if self.comp.le(end_time, start_time) {
            return Err(ProfileError::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }

        let entries = self.timeline.entries();
        let first = self.timeline.find_le(start_time, &self.comp).unwrap_or(0);
        let mut slots = Vec::new();

        for (offset, anchor) in entries[first..].iter().enumerate() {
            if !self.comp.lt(anchor.time(), end_time) {
                break;
            }
            if self.comp.eq(anchor.resources().quantity(), K::ZERO) {
                continue;
            }
            let pos = self.comp.max(anchor.time(), start_time);
            let mut avail = anchor.resources().clone();

            for e in &entries[first + offset + 1..] {
                if self.comp.ge(e.time(), end_time) {
                    break;
                }
                let reduced = avail.intersection(e.resources());
                if reduced != avail {
                    let slot_end = self.comp.min(e.time(), end_time);
                    if self.comp.ge(slot_end - pos, min_duration)
                        && self.comp.ge(avail.quantity(), min_quantity)
                    {
                        slots.push(TimeSlot::new(Span::new(pos, slot_end), Some(avail.clone())));
                    }
                    avail = reduced;
                    if self.comp.eq(avail.quantity(), K::ZERO) {
                        break;
                    }
                }
            }

            if self.comp.gt(avail.quantity(), K::ZERO)
                && self.comp.ge(end_time - pos, min_duration)
                && self.comp.ge(avail.quantity(), min_quantity)
            {
                slots.push(TimeSlot::new(Span::new(pos, end_time), Some(avail)));
            }
        }
        Ok(slots)
    }

    /// Picks a sub-set of exactly `quantity` units from `resources`.
    ///
    /// Deterministic: member spans are taken whole in canonical order and
    /// the final span is split, so a replay of the same schedule selects
    /// the same identifiers.
    pub fn select_resources(
        &self,
        resources: Option<&SpanSet<K>>,
        quantity: K,
    ) -> Result<SpanSet<K>, ProfileError<K>> {
        let Some(set) = resources else {
            return Err(ProfileError::InsufficientResources {
                requested: quantity,
                available: K::ZERO,
            });
        };
        let available = set.quantity();
        if self.comp.lt(available, quantity) {
            return Err(ProfileError::InsufficientResources {
                requested: quantity,
                available,
            });
        }

        let mut picked = Vec::new();
        let mut remaining = quantity;
        for span in set.iter() {
            if !self.comp.gt(remaining, K::ZERO) {
                break;
            }
            if self.comp.le(span.measure(), remaining) {
                picked.push(*span);
                remaining = remaining - span.measure();
            } else {
                picked.push(Span::new(span.lower(), span.lower() + remaining));
                remaining = K::ZERO;
            }
        }
        Ok(SpanSet::from_sorted_unchecked(picked))
    }

    /// As [`Profile::select_resources`], drawing from a slot's resources.
    pub fn select_slot_resources(
        &self,
        slot: &TimeSlot<K>,
        quantity: K,
    ) -> Result<SpanSet<K>, ProfileError<K>> {
        self.select_resources(slot.resources(), quantity)
    }

    /// Drops every entry before the one in effect at `earliest_time`.
    ///
    /// The remaining first entry carries the availability at that
    /// instant. A no-op when nothing precedes it.
    pub fn remove_past_entries(&mut self, earliest_time: K) {
        if let Some(index) = self.timeline.find_le(earliest_time, &self.comp) {
            self.timeline.truncate_before(index);
        }
    }

    /// Intersection of the sets in effect from the anchor entry up to
    /// (exclusive) `end_time`.
    fn intersection_from(&self, anchor: usize, end_time: K) -> SpanSet<K> {
        let entries = self.timeline.entries();
        let mut acc = entries[anchor].resources().clone();
        for e in &entries[anchor + 1..] {
            if !self.comp.lt(e.time(), end_time) {
                break;
            }
            acc = acc.intersection(e.resources());
        }
        acc
    }
}

impl<K: Scalar, C: Comparator<K>> Display for Profile<K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Profile(max_capacity={}, avail=[", self.max_capacity)?;
        for (i, entry) in self.timeline.entries().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "])")
    }
}

/// Configures a [`Profile`] piece by piece.
///
/// The comparator is mandatory: building without one reports
/// [`ProfileError::ConfigurationMissing`]. Capacity defaults to an empty
/// pool and the origin to time zero.
#[derive(Debug, Clone)]
pub struct ProfileBuilder<K: Scalar, C: Comparator<K>> {
    max_capacity: K,
    initial_time: K,
    comparator: Option<C>,
}

impl<K: Scalar, C: Comparator<K>> ProfileBuilder<K, C> {
    fn new() -> Self {
        Self {
            max_capacity: K::ZERO,
            initial_time: K::ZERO,
            comparator: None,
        }
    }

    pub fn max_capacity(mut self, max_capacity: K) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Instant the timeline starts at. Defaults to zero.
    pub fn initial_time(mut self, initial_time: K) -> Self {
        self.initial_time = initial_time;
        self
    }

    pub fn comparator(mut self, comparator: C) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn build(self) -> Result<Profile<K, C>, ProfileError<K>> {
        let comp = self
            .comparator
            .ok_or(ProfileError::ConfigurationMissing)?;
        Ok(Profile::with_parts(
            self.max_capacity,
            self.initial_time,
            comp,
        ))
    }
}

impl<K: Scalar, C: Comparator<K>> Default for ProfileBuilder<K, C> {
    fn default() -> Self {
        Self::new()
    }
}
