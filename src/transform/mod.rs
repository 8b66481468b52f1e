//! Series transformations.
//!
//! This module contains all shape-changing operations applied to a series
//! before it reaches a scale or the rendering layer:
//!
//! - **Decimation**: Bound point count while preserving extrema
//!   - Uniform stride sampling (cheap, shape-lossy)
//!   - Extrema-preserving bucket reduction (default for charts)
//!
//! - **Smoothing**: Noise reduction filters
//!   - Simple centered moving average
//!   - Exponential moving average (single forward pass)
//!   - Gaussian-weighted window
//!
//! - **Outlier filtering**: Partition a series into cleaned/outliers
//!   - IQR fences, z-score, modified z-score (MAD-based)
//!
//! - **Interpolation**: Fill time gaps with synthesized points
//!   - Linear, step-hold, smoothstep ease
//!
//! - **Aggregation**: Fixed time windows with a reducer
//!   - mean / sum / min / max / count, majority-vote categories
//!
//! Every operation takes a series and returns a new one; none of them keep
//! state between calls, so a transformation chain can run on any thread.
//!
//! # Example
//!
//! ```
//! use telemetry_charts::transform::{decimate, smooth, SmoothingMethod};
//! use telemetry_charts::series::Sample;
//!
//! let raw: Vec<Sample> = (0..10_000)
//!     .map(|i| Sample::new(i as i64 * 100, (i as f64 * 0.01).sin()))
//!     .collect();
//!
//! let smoothed = smooth(raw, 9, SmoothingMethod::Gaussian);
//! let reduced = decimate(smoothed, 150, true).unwrap();
//! assert!(reduced.len() <= 150);
//! ```

pub mod aggregate;
pub mod decimate;
pub mod interpolate;
pub mod outlier;
pub mod smooth;

// Re-export commonly used operations for convenience
pub use aggregate::{aggregate_by_window, Reducer};
pub use decimate::decimate;
pub use interpolate::{interpolate_missing, GapFillOptions, InterpolationMethod};
pub use outlier::{remove_outliers, OutlierMethod, OutlierPartition};
pub use smooth::{smooth, SmoothingMethod};
