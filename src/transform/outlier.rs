//! Outlier Classification
//!
//! Partitions a series into `cleaned` and `outliers` without losing or
//! duplicating a single sample. The rendering layer typically plots
//! `cleaned` as the line and `outliers` as markers, so both halves matter.
//!
//! # Methods
//!
//! **IQR fences** — flag values outside `[Q1 - k·IQR, Q3 + k·IQR]`.
//! Robust, the default for box-plot-style classification (k = 1.5 is the
//! conventional fence).
//!
//! **Z-score** — flag `|value - mean| / stddev > k`. Assumes roughly
//! normal data; a heavy outlier inflates the stddev it is tested against.
//!
//! **Modified z-score** — flag `|0.6745·(value - median) / MAD| > k`.
//! The 0.6745 constant rescales MAD to the stddev of a normal
//! distribution, making k comparable to a z-score cutoff (3.5 is the
//! usual choice).
//!
//! Degenerate distributions (zero variance, zero MAD) produce no outliers
//! rather than dividing by zero. Non-finite readings always land in
//! `outliers`: they can never be cleaned chart input, and dropping them
//! would break the exact-partition contract.

use serde::{Deserialize, Serialize};

use crate::series::{finite_values, Series};
use crate::stats;

/// Rescales MAD to be consistent with the standard deviation of a
/// normal distribution.
const MAD_NORMAL_CONSISTENCY: f64 = 0.6745;

/// Outlier classification method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierMethod {
    /// Interquartile-range fences
    #[serde(rename = "iqr")]
    Iqr,

    /// Standard z-score against mean and population stddev
    #[serde(rename = "zscore")]
    ZScore,

    /// MAD-based modified z-score (robust to the outliers themselves)
    #[serde(rename = "modified_zscore")]
    ModifiedZScore,
}

/// Exact partition of an input series.
///
/// `cleaned` and `outliers` are disjoint, each preserves the input order,
/// and together they contain every input sample exactly once.
#[derive(Debug, Clone, Default)]
pub struct OutlierPartition {
    /// Samples classified as normal
    pub cleaned: Series,

    /// Samples classified as outliers (including non-finite readings)
    pub outliers: Series,
}

impl OutlierPartition {
    /// Total number of samples across both halves.
    #[inline]
    pub fn total(&self) -> usize {
        self.cleaned.len() + self.outliers.len()
    }

    /// Fraction of the input classified as outliers, 0 for empty input.
    pub fn outlier_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.outliers.len() as f64 / total as f64
        }
    }
}

/// Partition a series into cleaned samples and outliers.
///
/// # Arguments
///
/// * `method` - Classification method
/// * `threshold` - Method multiplier `k` (fence width for IQR, score
///   cutoff for the z-score variants)
pub fn remove_outliers(series: Series, method: OutlierMethod, threshold: f64) -> OutlierPartition {
    let values = finite_values(&series);

    // Predicate over a finite value; None means "flag nothing" (degenerate
    // or unpopulated distribution).
    let is_outlier: Option<Box<dyn Fn(f64) -> bool>> = match method {
        OutlierMethod::Iqr => iqr_predicate(&values, threshold),
        OutlierMethod::ZScore => zscore_predicate(&values, threshold),
        OutlierMethod::ModifiedZScore => modified_zscore_predicate(&values, threshold),
    };

    let mut partition = OutlierPartition::default();
    for sample in series {
        let flagged = if !sample.is_finite() {
            true
        } else {
            is_outlier.as_ref().map(|f| f(sample.value)).unwrap_or(false)
        };
        if flagged {
            partition.outliers.push(sample);
        } else {
            partition.cleaned.push(sample);
        }
    }
    partition
}

fn iqr_predicate(values: &[f64], k: f64) -> Option<Box<dyn Fn(f64) -> bool>> {
    let q1 = stats::quantile(values, 0.25)?;
    let q3 = stats::quantile(values, 0.75)?;
    let iqr = q3 - q1;
    let lower = q1 - k * iqr;
    let upper = q3 + k * iqr;
    Some(Box::new(move |v| v < lower || v > upper))
}

fn zscore_predicate(values: &[f64], k: f64) -> Option<Box<dyn Fn(f64) -> bool>> {
    let mean = stats::mean(values)?;
    let sd = stats::stddev(values)?;
    if sd == 0.0 {
        return None;
    }
    Some(Box::new(move |v| ((v - mean) / sd).abs() > k))
}

fn modified_zscore_predicate(values: &[f64], k: f64) -> Option<Box<dyn Fn(f64) -> bool>> {
    let median = stats::median(values)?;
    let mad = stats::mad(values)?;
    if mad == 0.0 {
        return None;
    }
    Some(Box::new(move |v| {
        (MAD_NORMAL_CONSISTENCY * (v - median) / mad).abs() > k
    }))
}
