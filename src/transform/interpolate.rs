//! Gap Interpolation
//!
//! Telemetry streams drop out: a vehicle loses coverage, a sensor sleeps,
//! a collector restarts. Left alone, most renderers draw a long straight
//! segment across the dropout, which reads as fabricated data. This module
//! fills qualifying gaps with explicitly tagged synthetic points so the
//! rendering layer can style them differently (dashed, dimmed).
//!
//! # Gap Detection
//!
//! A gap qualifies when the time between consecutive samples exceeds
//! `gap_threshold_ms` (default 60s). Qualifying gaps receive evenly
//! spaced points at roughly `interval_ms` spacing (default 30s), capped
//! at `max_points_per_gap` (default 10) so a week-long dropout cannot
//! explode the series:
//!
//! ```text
//! count = min(cap, gap / interval - 1)
//! spacing = gap / (count + 1)
//! ```
//!
//! # Methods
//!
//! - **Linear**: value proportional to elapsed time across the gap
//! - **Step**: hold the gap-opening sample's value
//! - **Spline**: smoothstep cubic ease `t²(3 - 2t)` between endpoints
//!
//! Every synthesized sample carries `"interpolated": true` in its metadata
//! and inherits the gap-opening sample's category.

use serde::{Deserialize, Serialize};

use crate::series::{sort_by_time, Sample, Series};

/// Value interpolation across a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Proportional to elapsed time
    Linear,

    /// Hold the prior value
    Step,

    /// Smoothstep cubic ease between endpoints
    Spline,
}

/// Gap detection and fill sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapFillOptions {
    /// Gaps strictly longer than this are filled
    pub gap_threshold_ms: i64,

    /// Target spacing of synthesized points
    pub interval_ms: i64,

    /// Upper bound on synthesized points per gap
    pub max_points_per_gap: usize,
}

impl Default for GapFillOptions {
    fn default() -> Self {
        Self {
            gap_threshold_ms: 60_000, // 60s
            interval_ms: 30_000,      // 30s
            max_points_per_gap: 10,
        }
    }
}

/// Fill time gaps in a series with tagged synthetic samples.
///
/// The series is sorted by time first; output remains sorted. Series with
/// fewer than two samples have no gaps and are returned unchanged.
pub fn interpolate_missing(
    series: Series,
    method: InterpolationMethod,
    options: &GapFillOptions,
) -> Series {
    if series.len() < 2 || options.interval_ms <= 0 {
        return series;
    }

    let mut sorted = series;
    sort_by_time(&mut sorted);

    let mut out = Series::with_capacity(sorted.len());
    for i in 0..sorted.len() - 1 {
        // Pairs borrow; samples are moved into the output afterwards
        let gap = sorted[i + 1].time_ms - sorted[i].time_ms;
        let fill = if gap > options.gap_threshold_ms {
            synthesize(&sorted[i], &sorted[i + 1], gap, method, options)
        } else {
            Vec::new()
        };
        out.push(sorted[i].clone());
        out.extend(fill);
    }
    if let Some(last) = sorted.pop() {
        out.push(last);
    }
    out
}

/// Synthesized points for one qualifying gap.
fn synthesize(
    opening: &Sample,
    closing: &Sample,
    gap: i64,
    method: InterpolationMethod,
    options: &GapFillOptions,
) -> Vec<Sample> {
    // Step only needs the opening value; the others lerp between both
    let usable = match method {
        InterpolationMethod::Step => opening.is_finite(),
        _ => opening.is_finite() && closing.is_finite(),
    };
    if !usable {
        return Vec::new();
    }

    let ideal = (gap / options.interval_ms).max(0) as usize;
    let count = ideal.saturating_sub(1).min(options.max_points_per_gap);
    if count == 0 {
        return Vec::new();
    }

    let spacing = gap as f64 / (count + 1) as f64;
    let mut points = Vec::with_capacity(count);
    for i in 1..=count {
        let time_ms = opening.time_ms + (spacing * i as f64).round() as i64;
        let frac = (time_ms - opening.time_ms) as f64 / gap as f64;
        let value = match method {
            InterpolationMethod::Linear => {
                opening.value + (closing.value - opening.value) * frac
            }
            InterpolationMethod::Step => opening.value,
            InterpolationMethod::Spline => {
                let eased = frac * frac * (3.0 - 2.0 * frac);
                opening.value + (closing.value - opening.value) * eased
            }
        };

        let mut sample = Sample::new(time_ms, value);
        if let Some(category) = &opening.category {
            sample.category = Some(category.clone());
        }
        sample.set_meta("interpolated", serde_json::Value::Bool(true));
        points.push(sample);
    }
    points
}
