//! A contiguous half-open run of resource identifiers.

use std::fmt::Display;

use crate::scalar::Scalar;

/// Half-open span `[lower, upper)` of resource identifiers.
///
/// For the discrete pool the measure is the number of integers covered;
/// for the continuous pool it is the length. Back-to-back spans such as
/// `[0, 5)` and `[5, 10)` share no identifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span<K: Scalar> {
    lower: K,
    upper: K,
}

impl<K: Scalar> Span<K> {
    /// Creates the span `[lower, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    pub fn new(lower: K, upper: K) -> Self {
        assert!(lower <= upper, "span lower bound must be <= upper bound");
        Self { lower, upper }
    }

    pub fn lower(&self) -> K {
        self.lower
    }

    pub fn upper(&self) -> K {
        self.upper
    }

    /// Amount of resource covered: count for discrete spans, length for
    /// continuous ones.
    pub fn measure(&self) -> K {
        self.upper - self.lower
    }

    /// True when the span covers nothing (`lower == upper`).
    pub fn is_empty(&self) -> bool {
        !(self.lower < self.upper)
    }

    /// Returns true if `id` ∈ `[lower, upper)`.
    pub fn contains_value(&self, id: K) -> bool {
        self.lower <= id && id < self.upper
    }

    /// Returns true if every identifier of `other` is in this span.
    pub fn contains(&self, other: &Span<K>) -> bool {
        other.is_empty() || (self.lower <= other.lower && other.upper <= self.upper)
    }

    /// Checks whether the two spans share at least one identifier.
    pub fn overlaps(&self, other: &Span<K>) -> bool {
        self.lower < other.upper && other.lower < self.upper
    }

    pub fn intersection(&self, other: &Span<K>) -> Option<Span<K>> {
        if self.overlaps(other) {
            let lower = if self.lower > other.lower {
                self.lower
            } else {
                other.lower
            };
            let upper = if self.upper < other.upper {
                self.upper
            } else {
                other.upper
            };
            Some(Span::new(lower, upper))
        } else {
            None
        }
    }
}

impl<K: Scalar> Display for Span<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}

// =============================================================================
// Span Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: Scalar + serde::Serialize> serde::Serialize for Span<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Span", 2)?;
        s.serialize_field("lower", &self.lower)?;
        s.serialize_field("upper", &self.upper)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K: Scalar + serde::Deserialize<'de>> serde::Deserialize<'de> for Span<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw<K> {
            lower: K,
            upper: K,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.lower > raw.upper {
            return Err(serde::de::Error::custom(
                "span lower bound must be <= upper bound",
            ));
        }
        Ok(Self::new(raw.lower, raw.upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_and_measure() {
        let span = Span::new(0, 5);
        assert_eq!(span.lower(), 0);
        assert_eq!(span.upper(), 5);
        assert_eq!(span.measure(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    #[should_panic(expected = "lower bound")]
    fn inverted_bounds_panic() {
        let _ = Span::new(5, 0);
    }

    #[test]
    fn contains_value_is_half_open() {
        let span = Span::new(0.0, 10.0);
        assert!(span.contains_value(0.0));
        assert!(span.contains_value(9.999));
        assert!(!span.contains_value(10.0));
        assert!(!span.contains_value(-0.1));
    }

    #[test]
    fn contains_span() {
        let span = Span::new(0, 10);
        assert!(span.contains(&Span::new(0, 10)));
        assert!(span.contains(&Span::new(5, 7)));
        assert!(!span.contains(&Span::new(5, 11)));
        // An empty span is a subset of anything.
        assert!(span.contains(&Span::new(20, 20)));
    }

    #[test]
    fn overlaps_excludes_touching() {
        let a = Span::new(0, 10);
        assert!(a.overlaps(&Span::new(5, 15)));
        assert!(Span::new(5, 15).overlaps(&a));
        assert!(!a.overlaps(&Span::new(10, 20)));
        assert!(!a.overlaps(&Span::new(20, 30)));
    }

    #[test]
    fn intersection_of_spans() {
        let a = Span::new(0, 10);
        assert_eq!(a.intersection(&Span::new(5, 15)), Some(Span::new(5, 10)));
        assert_eq!(a.intersection(&Span::new(10, 20)), None);
        assert_eq!(a.intersection(&Span::new(2, 7)), Some(Span::new(2, 7)));
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Span::new(2, 7)), "[2, 7)");
        assert_eq!(format!("{}", Span::new(0.5, 1.5)), "[0.5, 1.5)");
    }
}
