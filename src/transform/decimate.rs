//! Series Decimation
//!
//! Charts cannot usefully draw tens of thousands of points into a few
//! hundred pixels, and the renderer slows down long before that. Decimation
//! bounds the point count while keeping the visual shape of the data.
//!
//! # Algorithm
//!
//! Two modes, selected by `preserve_extremes`:
//!
//! **Uniform stride** (`false`): sort by time, keep every `step`-th sample
//! with `step = ceil(n / max_points)`. Cheap, but a spike that falls
//! between strides disappears.
//!
//! **Extrema-preserving** (`true`): sort by time, always keep the first and
//! last samples, then split the interior into buckets and keep each
//! bucket's minimum- and maximum-value sample:
//!
//! ```text
//! input:    [first] [..bucket 1..] [..bucket 2..] ... [last]
//! kept:      first   min₁, max₁     min₂, max₂    ...  last
//! ```
//!
//! The bucket count is `max(1, (max_points - 2) / 2)`, so the output stays
//! within `max_points` whenever the budget is at least 4. Smaller budgets
//! degenerate to one bucket (first, last, global min, global max — at most
//! four points). The bucket containing the global minimum necessarily
//! selects it as its local minimum, and likewise for the maximum, so the
//! global extremes always survive.
//!
//! # Example
//!
//! ```
//! use telemetry_charts::series::Sample;
//! use telemetry_charts::transform::decimate;
//!
//! let series: Vec<Sample> = (0..50_000)
//!     .map(|i| Sample::new(i, (i as f64 * 0.002).sin() * 100.0))
//!     .collect();
//!
//! let reduced = decimate(series, 150, true).unwrap();
//! assert!(reduced.len() <= 150);
//! ```

use crate::error::{ChartError, Result};
use crate::series::{sort_by_time, Series};

/// Reduce a series to at most `max_points` samples.
///
/// Series at or under the budget (including single-point series) are
/// returned unchanged. Larger series are sorted by time and reduced; the
/// output is in ascending time order.
///
/// # Arguments
///
/// * `max_points` - Point budget; must be greater than zero
/// * `preserve_extremes` - Keep per-bucket min/max samples instead of
///   uniform stride sampling
///
/// # Errors
///
/// Returns [`ChartError::InvalidArgument`] when `max_points` is zero.
pub fn decimate(series: Series, max_points: usize, preserve_extremes: bool) -> Result<Series> {
    if max_points == 0 {
        return Err(ChartError::invalid_argument("max_points must be > 0"));
    }
    if series.len() <= max_points {
        return Ok(series);
    }

    let mut sorted = series;
    sort_by_time(&mut sorted);

    if preserve_extremes {
        Ok(keep_extremes(sorted, max_points))
    } else {
        let step = div_ceil(sorted.len(), max_points);
        Ok(sorted
            .into_iter()
            .step_by(step)
            .collect())
    }
}

/// Extrema-preserving reduction over a time-sorted series.
fn keep_extremes(sorted: Series, max_points: usize) -> Series {
    let n = sorted.len();
    let buckets = (max_points.saturating_sub(2) / 2).max(1);

    // Endpoints are always kept; buckets cover the interior only.
    let interior = n - 2;
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    if interior > 0 {
        let bucket_len = div_ceil(interior, buckets);
        let mut start = 1;
        while start < n - 1 {
            let end = (start + bucket_len).min(n - 1);
            let (mut min_idx, mut max_idx) = (start, start);
            for i in start..end {
                if sorted[i].value.total_cmp(&sorted[min_idx].value).is_lt() {
                    min_idx = i;
                }
                if sorted[i].value.total_cmp(&sorted[max_idx].value).is_gt() {
                    max_idx = i;
                }
            }
            keep[min_idx] = true;
            keep[max_idx] = true;
            start = end;
        }
    }

    // Input was time-sorted, so a keep-mask pass preserves chronology.
    sorted
        .into_iter()
        .zip(keep)
        .filter_map(|(sample, kept)| kept.then_some(sample))
        .collect()
}

#[inline]
fn div_ceil(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}
