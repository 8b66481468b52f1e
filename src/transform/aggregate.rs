//! Windowed Aggregation
//!
//! Buckets a series into contiguous fixed-width time windows and reduces
//! each window to a single sample. This is the coarse view a dashboard
//! shows when a chart spans hours of second-resolution telemetry.
//!
//! # Windowing
//!
//! Windows are half-open intervals anchored at the first (earliest)
//! sample's timestamp:
//!
//! ```text
//! [start + k·w, start + (k+1)·w)    k = 0, 1, 2, ...
//! ```
//!
//! Each non-empty window emits one sample timestamped at the window
//! midpoint. Empty windows are skipped, never zero-filled; a gap in the
//! input stays visible as a gap in the output.
//!
//! The category of an output sample is the majority vote among the
//! contained samples' categories, ties broken by first-seen order.
//! Numeric reducers operate on the finite values of a window; `count`
//! counts every contained sample, which is what makes the per-window
//! counts sum to the total number of samples in the span.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::series::{finite_values, sort_by_time, Sample, Series};
use crate::stats;

/// Reduction applied to each window's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reducer {
    /// Arithmetic mean of the window's finite values
    Mean,

    /// Sum of the window's finite values
    Sum,

    /// Smallest finite value
    Min,

    /// Largest finite value
    Max,

    /// Number of samples in the window (finite or not)
    Count,
}

/// Aggregate a series into fixed time windows.
///
/// # Arguments
///
/// * `window_ms` - Window width in milliseconds; must be positive
///
/// # Errors
///
/// Returns [`ChartError::InvalidArgument`] when `window_ms` is not
/// positive.
pub fn aggregate_by_window(series: Series, window_ms: i64, reducer: Reducer) -> Result<Series> {
    if window_ms <= 0 {
        return Err(ChartError::invalid_argument("window_ms must be > 0"));
    }
    if series.is_empty() {
        return Ok(series);
    }

    let mut sorted = series;
    sort_by_time(&mut sorted);
    let start = sorted[0].time_ms;

    let mut out = Series::new();
    let mut i = 0;
    while i < sorted.len() {
        // Sorted input: the window this sample falls into starts a run
        let k = (sorted[i].time_ms - start) / window_ms;
        let window_start = start + k * window_ms;
        let window_end = window_start + window_ms;

        let mut j = i;
        while j < sorted.len() && sorted[j].time_ms < window_end {
            j += 1;
        }

        if let Some(sample) = reduce_window(&sorted[i..j], window_start, window_ms, reducer) {
            out.push(sample);
        }
        i = j;
    }
    Ok(out)
}

/// Reduce one non-empty window to a sample, or None when the reducer has
/// nothing usable to work with (e.g. mean over only-NaN readings).
fn reduce_window(
    window: &[Sample],
    window_start: i64,
    window_ms: i64,
    reducer: Reducer,
) -> Option<Sample> {
    let values = finite_values(window);
    let value = match reducer {
        Reducer::Mean => stats::mean(&values)?,
        Reducer::Sum => {
            if values.is_empty() {
                return None;
            }
            values.iter().sum()
        }
        Reducer::Min => stats::extent(&values)?.0,
        Reducer::Max => stats::extent(&values)?.1,
        Reducer::Count => window.len() as f64,
    };

    let mut sample = Sample::new(window_start + window_ms / 2, value);
    sample.category = majority_category(window);
    Some(sample)
}

/// Majority vote over the categories present in a window. Samples without
/// a category do not vote; ties go to the category seen first.
fn majority_category(window: &[Sample]) -> Option<String> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for sample in window {
        if let Some(category) = &sample.category {
            let count = counts.entry(category.as_str()).or_insert(0);
            if *count == 0 {
                first_seen.push(category);
            }
            *count += 1;
        }
    }

    // Strictly-greater comparison over first-seen order breaks ties in
    // favor of the earliest category.
    let mut best: Option<(&str, usize)> = None;
    for name in first_seen {
        let count = counts[name];
        if best.map(|(_, c)| count > c).unwrap_or(true) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}
