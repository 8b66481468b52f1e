//! Transform Pipeline
//!
//! Chains transform steps into a reusable preprocessing pass over a
//! series. Steps run in order, each feeding the next:
//!
//! ```text
//! Series → [remove_outliers] → [interpolate] → [smooth] → [decimate] → Series
//!                 │                  │
//!                 └── on error: log::warn! and pass the step's
//!                     input through unchanged
//! ```
//!
//! # Fault Isolation
//!
//! One misconfigured step must not blank a whole dashboard panel. A step
//! that fails is logged and skipped; the pipeline continues with the
//! series the step received. [`Pipeline::apply_with_report`] surfaces
//! what ran, what failed, and how point counts moved, so the UI can
//! badge a degraded chart instead of rendering nothing.
//!
//! # Example
//!
//! ```
//! use telemetry_charts::pipeline::{Pipeline, TransformStep};
//! use telemetry_charts::series::Sample;
//! use telemetry_charts::transform::SmoothingMethod;
//!
//! let series: Vec<Sample> = (0..1_000)
//!     .map(|i| Sample::new(i * 1_000, (i % 17) as f64))
//!     .collect();
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.add_step(TransformStep::smooth(5, SmoothingMethod::Simple));
//! pipeline.add_step(TransformStep::decimate(150, true));
//!
//! let rendered = pipeline.apply(series);
//! assert!(rendered.len() <= 150);
//! ```

use std::fmt;

use crate::config::{PipelineConfig, StepConfig};
use crate::error::{ChartError, Result};
use crate::series::Series;
use crate::transform::{
    self, GapFillOptions, InterpolationMethod, OutlierMethod, Reducer, SmoothingMethod,
};

/// One named transform in a pipeline.
///
/// Built-in constructors cover the standard operations; [`TransformStep::new`]
/// accepts any closure for custom stages.
pub struct TransformStep {
    name: String,
    apply: Box<dyn Fn(Series) -> Result<Series> + Send + Sync>,
}

impl fmt::Debug for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformStep")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TransformStep {
    /// Wrap a custom transform closure.
    pub fn new<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(Series) -> Result<Series> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Box::new(apply),
        }
    }

    /// Shape-preserving point reduction.
    pub fn decimate(max_points: usize, preserve_extremes: bool) -> Self {
        Self::new("decimate", move |series| {
            transform::decimate(series, max_points, preserve_extremes)
        })
    }

    /// Moving-window smoothing.
    pub fn smooth(window_size: usize, method: SmoothingMethod) -> Self {
        Self::new("smooth", move |series| {
            Ok(transform::smooth(series, window_size, method))
        })
    }

    /// Outlier removal; the flagged half of the partition is dropped.
    pub fn remove_outliers(method: OutlierMethod, threshold: f64) -> Self {
        Self::new("remove_outliers", move |series| {
            Ok(transform::remove_outliers(series, method, threshold).cleaned)
        })
    }

    /// Gap filling with synthesized, tagged points.
    pub fn interpolate(method: InterpolationMethod, options: GapFillOptions) -> Self {
        Self::new("interpolate", move |series| {
            Ok(transform::interpolate_missing(series, method, &options))
        })
    }

    /// Fixed-window aggregation.
    pub fn aggregate(window_ms: i64, reducer: Reducer) -> Self {
        Self::new("aggregate", move |series| {
            transform::aggregate_by_window(series, window_ms, reducer)
        })
    }

    /// Build the step a config entry describes.
    pub fn from_config(config: &StepConfig) -> Self {
        match config {
            StepConfig::Decimate {
                max_points,
                preserve_extremes,
            } => Self::decimate(*max_points, *preserve_extremes),
            StepConfig::Smooth {
                window_size,
                method,
            } => Self::smooth(*window_size, *method),
            StepConfig::RemoveOutliers { method, threshold } => {
                Self::remove_outliers(*method, *threshold)
            }
            StepConfig::Interpolate {
                method,
                gap_threshold_ms,
                interval_ms,
                max_points_per_gap,
            } => Self::interpolate(
                *method,
                GapFillOptions {
                    gap_threshold_ms: *gap_threshold_ms,
                    interval_ms: *interval_ms,
                    max_points_per_gap: *max_points_per_gap,
                },
            ),
            StepConfig::Aggregate { window_ms, reducer } => {
                Self::aggregate(*window_ms, *reducer)
            }
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the step on its own, outside a pipeline.
    pub fn run(&self, series: Series) -> Result<Series> {
        (self.apply)(series)
    }
}

/// Outcome of one step inside [`Pipeline::apply_with_report`].
#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub points_in: usize,
    pub points_out: usize,
    /// Set when the step failed and was skipped.
    pub error: Option<String>,
}

/// Per-step accounting for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub steps: Vec<StepReport>,
}

impl PipelineReport {
    /// Steps that failed and were skipped.
    pub fn failed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.error.is_some()).count()
    }

    /// True when every step ran cleanly.
    pub fn is_clean(&self) -> bool {
        self.failed_steps() == 0
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} steps, {} failed",
            self.steps.len(),
            self.failed_steps()
        )?;
        for step in &self.steps {
            match &step.error {
                Some(error) => writeln!(
                    f,
                    "  {}: {} → {} points (SKIPPED: {})",
                    step.name, step.points_in, step.points_out, error
                )?,
                None => writeln!(
                    f,
                    "  {}: {} → {} points",
                    step.name, step.points_in, step.points_out
                )?,
            }
        }
        Ok(())
    }
}

/// An ordered chain of transform steps.
#[derive(Debug, Default)]
pub struct Pipeline {
    steps: Vec<TransformStep>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`ChartError::Config`] when the configuration fails validation.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate().map_err(ChartError::Config)?;
        let steps = config.steps.iter().map(TransformStep::from_config).collect();
        Ok(Self { steps })
    }

    /// Append a step for subsequent `apply` calls.
    pub fn add_step(&mut self, step: TransformStep) {
        self.steps.push(step);
    }

    /// Append a step, fluently.
    pub fn with_step(mut self, step: TransformStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Remove every step with the given name.
    ///
    /// # Returns
    ///
    /// The number of steps removed.
    pub fn remove_step(&mut self, name: &str) -> usize {
        let before = self.steps.len();
        self.steps.retain(|s| s.name != name);
        before - self.steps.len()
    }

    /// The steps in execution order.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step and return the transformed series.
    ///
    /// Failing steps are logged and skipped; see the module docs.
    pub fn apply(&self, series: Series) -> Series {
        self.apply_with_report(series).0
    }

    /// Run every step, returning the series and per-step accounting.
    pub fn apply_with_report(&self, series: Series) -> (Series, PipelineReport) {
        let mut current = series;
        let mut reports = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let points_in = current.len();
            // Snapshot so a failing step hands its input through intact
            let snapshot = current.clone();

            match step.run(current) {
                Ok(next) => {
                    reports.push(StepReport {
                        name: step.name.clone(),
                        points_in,
                        points_out: next.len(),
                        error: None,
                    });
                    current = next;
                }
                Err(e) => {
                    let wrapped = ChartError::transform_step(step.name(), &e);
                    log::warn!("{wrapped}; passing the step's input through");
                    reports.push(StepReport {
                        name: step.name.clone(),
                        points_in,
                        points_out: points_in,
                        error: Some(wrapped.to_string()),
                    });
                    current = snapshot;
                }
            }
        }

        (current, PipelineReport { steps: reports })
    }
}
