//! Statistics Kernel
//!
//! Pure descriptive-statistics primitives shared by every other component:
//! outlier classification, adaptive domain inference, and dynamic threshold
//! evaluation all bottom out here.
//!
//! # Behavior Contract
//!
//! - Non-finite inputs (NaN, ±inf) are filtered out before any computation.
//! - An empty (or fully non-finite) input yields `None`, never a panic, so
//!   callers can apply their own fallback logic.
//! - `stddev` is the population standard deviation (divides by `n`), which
//!   is what threshold bands and z-scores over a complete window want.
//!
//! # Mathematical Foundation
//!
//! **Quantile** (linear interpolation between order statistics):
//! ```text
//! pos = q × (n - 1)
//! lo  = ⌊pos⌋,  hi = ⌈pos⌉
//! quantile = sorted[lo] + (pos - lo) × (sorted[hi] - sorted[lo])
//! ```
//!
//! **MAD** (median absolute deviation):
//! ```text
//! mad = median(|xᵢ - median(x)|)
//! ```
//!
//! # Example
//!
//! ```
//! use telemetry_charts::stats;
//!
//! let readings = [12.0, f64::NAN, 14.0, 13.0, 90.0];
//! assert_eq!(stats::median(&readings), Some(13.5));
//! assert_eq!(stats::mean(&[]), None);
//! ```

/// Collect the finite entries of a slice.
fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Finite entries, sorted ascending. Sorting is total because non-finite
/// values were already removed.
fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut v = finite(values);
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

/// Arithmetic mean of the finite values.
///
/// # Returns
///
/// - `Some(mean)` if at least one finite value is present
/// - `None` for empty or fully non-finite input
pub fn mean(values: &[f64]) -> Option<f64> {
    let v = finite(values);
    if v.is_empty() {
        return None;
    }
    Some(v.iter().sum::<f64>() / v.len() as f64)
}

/// Population standard deviation of the finite values.
///
/// Computed with Welford's single-pass update to avoid the catastrophic
/// cancellation of the sum-of-squares formula on large magnitudes.
///
/// # Returns
///
/// - `Some(stddev)` if at least one finite value is present (a single value
///   has zero spread)
/// - `None` for empty or fully non-finite input
pub fn stddev(values: &[f64]) -> Option<f64> {
    let v = finite(values);
    if v.is_empty() {
        return None;
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in v.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }

    // Population variance: M2 / n
    Some((m2 / v.len() as f64).sqrt())
}

/// Median of the finite values (the 0.5 quantile).
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Quantile of the finite values with linear interpolation between
/// order statistics.
///
/// # Arguments
///
/// * `q` - Quantile in `[0, 1]`; out-of-range finite values are clamped
///
/// # Returns
///
/// - `Some(value)` if at least one finite value is present and `q` is finite
/// - `None` otherwise
///
/// # Example
///
/// ```
/// use telemetry_charts::stats::quantile;
///
/// let v = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&v, 0.25), Some(1.75));
/// assert_eq!(quantile(&v, 1.0), Some(4.0));
/// ```
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if !q.is_finite() {
        return None;
    }
    let sorted = sorted_finite(values);
    if sorted.is_empty() {
        return None;
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Median absolute deviation of the finite values.
///
/// A robust spread estimate: unlike `stddev`, a single wild reading barely
/// moves it, which is why the modified z-score outlier test builds on it.
pub fn mad(values: &[f64]) -> Option<f64> {
    let v = finite(values);
    let med = median(&v)?;
    let deviations: Vec<f64> = v.iter().map(|x| (x - med).abs()).collect();
    median(&deviations)
}

/// Minimum and maximum of the finite values.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    let v = finite(values);
    if v.is_empty() {
        return None;
    }
    let mut min = v[0];
    let mut max = v[0];
    for &x in &v[1..] {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }
    Some((min, max))
}
