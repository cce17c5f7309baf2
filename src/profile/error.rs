use thiserror::Error;

use crate::scalar::Scalar;

/// Failures reported by profile construction, queries and mutators.
///
/// Queries never fail on "nothing found"; that is an empty result, not
/// an error. Mutators validate their arguments first and leave the
/// timeline untouched when they fail.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProfileError<K: Scalar> {
    /// The profile was configured without a comparator for times and
    /// resource quantities.
    #[error("a comparator is required to compare times and resource quantities")]
    ConfigurationMissing,

    /// A selection asked for more resource units than the set holds.
    #[error("cannot select {requested} resource units out of {available} available")]
    InsufficientResources { requested: K, available: K },

    /// A time window whose end does not lie after its start.
    #[error("window [{start}, {end}) is empty or inverted")]
    InvalidWindow { start: K, end: K },

    /// An allocation claimed identifiers that are not free over the
    /// requested window.
    #[error("allocation over [{start}, {end}) claims resource units that are not free")]
    CapacityExceeded { start: K, end: K },
}
