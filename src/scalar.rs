//! The scalar type shared by times and resource quantities.

use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

/// Time and quantity scalar used throughout the availability profile.
///
/// One generic profile body serves both pool flavours: `i64` for the
/// discrete pool (node ids, integer ticks) and `f64` for the continuous
/// one (fractions of a pool, float times). The profile never assumes a
/// wall clock; any totally ordered scalar with addition and subtraction
/// works.
pub trait Scalar:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Debug + Display
{
    /// Additive identity, also the default timeline origin.
    const ZERO: Self;
}

impl Scalar for i64 {
    const ZERO: Self = 0;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
}
