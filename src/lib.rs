//! freespan - availability profiles for divisible resource pools.
//!
//! Tracks which portions of a resource pool (cluster nodes, memory,
//! bandwidth) are free over time, and answers the questions a scheduler
//! asks before placing work: *when and where can this job run*, *which
//! free windows exist between two instants*, and *commit this
//! allocation*.

pub mod compare;
pub mod profile;
pub mod scalar;
pub mod sets;

pub use compare::{Comparator, Exact, Tolerant};
pub use profile::{
    ContinuousProfile, DiscreteProfile, Profile, ProfileBuilder, ProfileEntry, ProfileError,
    TimeSlot,
};
pub use scalar::Scalar;
pub use sets::{Span, SpanSet};
