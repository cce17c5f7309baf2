//! Two-pointer merge walks over canonical span slices.

use super::span::Span;
use super::span_set::SpanSet;
use crate::scalar::Scalar;

pub(crate) fn scalar_max<K: Scalar>(a: K, b: K) -> K {
    if b > a {
        b
    } else {
        a
    }
}

pub(crate) fn scalar_min<K: Scalar>(a: K, b: K) -> K {
    if b < a {
        b
    } else {
        a
    }
}

/// Returns true if `spans` is canonical: no empty spans, sorted by lower
/// bound, and a real gap between neighbours (touching spans must have
/// been merged).
pub(crate) fn is_canonical<K: Scalar>(spans: &[Span<K>]) -> bool {
    spans.iter().all(|s| !s.is_empty())
        && spans.windows(2).all(|w| w[0].upper() < w[1].lower())
}

/// Appends `span` to `result`, merging with the last entry when they
/// overlap or touch.
fn merge_into<K: Scalar>(result: &mut Vec<Span<K>>, span: Span<K>) {
    if span.is_empty() {
        return;
    }
    if let Some(last) = result.last_mut() {
        if last.upper() >= span.lower() {
            if span.upper() > last.upper() {
                *last = Span::new(last.lower(), span.upper());
            }
            return;
        }
    }
    result.push(span);
}

pub(crate) fn compute_union<K: Scalar>(a: &[Span<K>], b: &[Span<K>]) -> SpanSet<K> {
    debug_assert!(is_canonical(a));
    debug_assert!(is_canonical(b));

    if a.is_empty() {
        return SpanSet::from_sorted_unchecked(b.to_vec());
    }
    if b.is_empty() {
        return SpanSet::from_sorted_unchecked(a.to_vec());
    }

    let mut result: Vec<Span<K>> = Vec::with_capacity(a.len() + b.len());
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        if b[j].lower() < a[i].lower() {
            merge_into(&mut result, b[j]);
            j += 1;
        } else {
            merge_into(&mut result, a[i]);
            i += 1;
        }
    }

    for span in &a[i..] {
        merge_into(&mut result, *span);
    }
    for span in &b[j..] {
        merge_into(&mut result, *span);
    }

    SpanSet::from_sorted_unchecked(result)
}

pub(crate) fn compute_intersection<K: Scalar>(a: &[Span<K>], b: &[Span<K>]) -> SpanSet<K> {
    debug_assert!(is_canonical(a));
    debug_assert!(is_canonical(b));

    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        let lower = scalar_max(a[i].lower(), b[j].lower());
        let upper = scalar_min(a[i].upper(), b[j].upper());
        if lower < upper {
            result.push(Span::new(lower, upper));
        }

        if a[i].upper() < b[j].upper() {
            i += 1;
        } else if b[j].upper() < a[i].upper() {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }

    SpanSet::from_sorted_unchecked(result)
}

pub(crate) fn compute_difference<K: Scalar>(a: &[Span<K>], b: &[Span<K>]) -> SpanSet<K> {
    debug_assert!(is_canonical(a));
    debug_assert!(is_canonical(b));

    if a.is_empty() || b.is_empty() {
        return SpanSet::from_sorted_unchecked(a.to_vec());
    }

    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut j = 0usize;

    for span in a {
        let mut lower = span.lower();
        // Skip subtrahend spans that end at or before this span.
        while j < b.len() && b[j].upper() <= lower {
            j += 1;
        }
        let mut k = j;
        while k < b.len() && b[k].lower() < span.upper() {
            if b[k].lower() > lower {
                result.push(Span::new(lower, b[k].lower()));
            }
            if b[k].upper() > lower {
                lower = b[k].upper();
            }
            k += 1;
        }
        if lower < span.upper() {
            result.push(Span::new(lower, span.upper()));
        }
    }

    SpanSet::from_sorted_unchecked(result)
}
