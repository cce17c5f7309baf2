//! Spans of resource identifiers and canonical sets of them.
//!
//! A [`Span`] names a contiguous run of identifiers as a half-open
//! interval `[lower, upper)`; a [`SpanSet`] is a sorted, disjoint,
//! coalesced union of spans with the usual set algebra. These are the
//! values the profile's timeline entries carry.

mod ops;
mod span;
mod span_set;

pub use span::Span;
pub use span_set::SpanSet;
