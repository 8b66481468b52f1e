//! Series Smoothing
//!
//! Noise-reduction filters for jittery telemetry channels. All three
//! methods preserve series length and point ordering; only `value` is
//! rewritten. Values are computed over the chronological view of the
//! series and scattered back to the original positions, so callers that
//! hand in unsorted data get their ordering back untouched.
//!
//! # Methods
//!
//! **Simple** — centered moving average over `[i - ⌊w/2⌋, i + ⌊w/2⌋]`,
//! clipped at the boundaries.
//!
//! **Exponential** — single forward pass carrying the running EMA:
//! ```text
//! ema[0] = value[0]
//! ema[i] = α·value[i] + (1 - α)·ema[i-1],   α = 2/(w+1)
//! ```
//! One pass, O(n). Re-deriving every prior term per index would be
//! quadratic and is exactly what this implementation avoids.
//!
//! **Gaussian** — weighted average within `±⌊w/2⌋` using
//! `exp(-(Δ²)/(2σ²))` with `σ = w/3`, weights renormalized to sum to 1
//! over the available (possibly boundary-clipped) window.
//!
//! Non-finite readings are tolerated: they contribute nothing to a window
//! average, never update the EMA state, and keep their original value in
//! the output rather than being fabricated over.

use serde::{Deserialize, Serialize};

use crate::series::Series;

/// Smoothing filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    /// Centered moving average
    Simple,

    /// Exponential moving average, single forward pass
    Exponential,

    /// Gaussian-weighted centered window
    Gaussian,
}

/// Smooth a series with the given window size and method.
///
/// Series shorter than the window (and windows of size 0 or 1, which are
/// identity filters) are returned unchanged.
pub fn smooth(series: Series, window_size: usize, method: SmoothingMethod) -> Series {
    if window_size <= 1 || series.len() < window_size {
        return series;
    }

    // Chronological view: values in time order, positions remembered.
    let mut order: Vec<usize> = (0..series.len()).collect();
    order.sort_by_key(|&i| series[i].time_ms);
    let chrono: Vec<f64> = order.iter().map(|&i| series[i].value).collect();

    let smoothed = match method {
        SmoothingMethod::Simple => simple_moving_average(&chrono, window_size),
        SmoothingMethod::Exponential => exponential_moving_average(&chrono, window_size),
        SmoothingMethod::Gaussian => gaussian_weighted(&chrono, window_size),
    };

    let mut out = series;
    for (rank, &idx) in order.iter().enumerate() {
        out[idx].value = smoothed[rank];
    }
    out
}

/// Centered moving average, boundary-clipped, non-finite neighbors skipped.
fn simple_moving_average(values: &[f64], window_size: usize) -> Vec<f64> {
    let half = window_size / 2;
    let n = values.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        if !values[i].is_finite() {
            out.push(values[i]);
            continue;
        }
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);

        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in &values[lo..hi] {
            if v.is_finite() {
                sum += v;
                count += 1;
            }
        }
        out.push(sum / count as f64);
    }
    out
}

/// Single-pass exponential moving average with α = 2/(w+1).
fn exponential_moving_average(values: &[f64], window_size: usize) -> Vec<f64> {
    let alpha = 2.0 / (window_size as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema: Option<f64> = None;

    for &v in values {
        if !v.is_finite() {
            // Broken reading: emit as-is, EMA state holds across it
            out.push(v);
            continue;
        }
        let next = match ema {
            Some(prev) => alpha * v + (1.0 - alpha) * prev,
            None => v,
        };
        ema = Some(next);
        out.push(next);
    }
    out
}

/// Gaussian-weighted centered window with σ = w/3, renormalized weights.
fn gaussian_weighted(values: &[f64], window_size: usize) -> Vec<f64> {
    let half = window_size / 2;
    let sigma = window_size as f64 / 3.0;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let n = values.len();
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        if !values[i].is_finite() {
            out.push(values[i]);
            continue;
        }
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for (j, &v) in values[lo..hi].iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let delta = (lo + j) as f64 - i as f64;
            let w = (-(delta * delta) / two_sigma_sq).exp();
            weighted_sum += w * v;
            weight_total += w;
        }
        out.push(weighted_sum / weight_total);
    }
    out
}
