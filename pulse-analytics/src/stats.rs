//! Scalar statistics helpers shared by the queries.

use std::cmp::Ordering;
use std::collections::HashSet;

/// Arithmetic mean. Empty input yields 0.0; callers surface empty
/// collections as `NoDataAvailable` before getting here.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator). Fewer than two
/// observations yield 0.0 so result documents stay finite; the count
/// reported alongside lets callers spot the degenerate case.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Linear-interpolated quantile, `q` in [0, 1]. For a sorted sample of
/// n values the cut sits at rank (n − 1)·q, interpolating between the
/// two neighbouring order statistics.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q = q.clamp(0.0, 1.0);
    let rank = (sorted.len() - 1) as f64 * q;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Number of distinct values by exact bit pattern.
pub fn distinct_count(values: &[f64]) -> usize {
    let mut seen: HashSet<u64> = HashSet::new();
    for v in values {
        seen.insert(v.to_bits());
    }
    seen.len()
}

/// Stable descending sort by a float key.
///
/// NaN keys are pushed to the end of the list so they never appear as top
/// candidates; equal keys keep their existing (builder output) order.
pub fn sort_desc_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let ka = key(a);
        let kb = key(b);
        match (ka.is_nan(), kb.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => kb.partial_cmp(&ka).unwrap_or(Ordering::Equal),
        }
    });
}

/// Stable ascending sort by a float key, NaN keys last.
pub fn sort_asc_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let ka = key(a);
        let kb = key(b);
        match (ka.is_nan(), kb.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => ka.partial_cmp(&kb).unwrap_or(Ordering::Equal),
        }
    });
}
