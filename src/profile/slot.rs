//! Query answers: a period paired with the identifiers free throughout it.

use std::fmt::Display;

use crate::scalar::Scalar;
use crate::sets::{Span, SpanSet};

/// A window of time together with the resource identifiers that stay free
/// for its whole duration.
///
/// `resources` is `None` when the query found nothing suitable; the
/// period then still echoes the window that was asked about.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot<K: Scalar> {
    period: Span<K>,
    resources: Option<SpanSet<K>>,
}

impl<K: Scalar> TimeSlot<K> {
    pub(crate) fn new(period: Span<K>, resources: Option<SpanSet<K>>) -> Self {
        Self { period, resources }
    }

    pub fn period(&self) -> Span<K> {
        self.period
    }

    pub fn start_time(&self) -> K {
        self.period.lower()
    }

    pub fn end_time(&self) -> K {
        self.period.upper()
    }

    pub fn duration(&self) -> K {
        self.period.measure()
    }

    /// Identifiers free over the whole period, or `None` when the query
    /// came up empty.
    pub fn resources(&self) -> Option<&SpanSet<K>> {
        self.resources.as_ref()
    }

    pub fn into_resources(self) -> Option<SpanSet<K>> {
        self.resources
    }
}

impl<K: Scalar> Display for TimeSlot<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.resources {
            Some(set) => write!(f, "{} over {}", set, self.period),
            None => write!(f, "none over {}", self.period),
        }
    }
}

// =============================================================================
// TimeSlot Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: Scalar + serde::Serialize> serde::Serialize for TimeSlot<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("TimeSlot", 2)?;
        s.serialize_field("period", &self.period)?;
        s.serialize_field("resources", &self.resources)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K: Scalar + serde::Deserialize<'de>> serde::Deserialize<'de> for TimeSlot<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(bound = "K: Scalar + serde::Deserialize<'de>")]
        struct Raw<K: Scalar> {
            period: Span<K>,
            resources: Option<SpanSet<K>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.period, raw.resources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let slot = TimeSlot::new(Span::new(5, 15), Some(SpanSet::from(Span::new(0, 2))));
        assert_eq!(slot.start_time(), 5);
        assert_eq!(slot.end_time(), 15);
        assert_eq!(slot.duration(), 10);
        assert_eq!(slot.resources().unwrap().quantity(), 2);
    }

    #[test]
    fn empty_slot_keeps_the_period() {
        let slot = TimeSlot::<f64>::new(Span::new(0.0, 4.0), None);
        assert!(slot.resources().is_none());
        assert_eq!(slot.duration(), 4.0);
    }

    #[test]
    fn display_format() {
        let slot = TimeSlot::new(Span::new(0, 5), Some(SpanSet::from(Span::new(2, 7))));
        assert_eq!(format!("{}", slot), "{[2, 7)} over [0, 5)");
        let none = TimeSlot::<i64>::new(Span::new(0, 5), None);
        assert_eq!(format!("{}", none), "none over [0, 5)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let slot = TimeSlot::new(Span::new(0, 5), Some(SpanSet::from(Span::new(2, 7))));
        let json = serde_json::to_string(&slot).unwrap();
        let restored: TimeSlot<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, slot);
    }
}
