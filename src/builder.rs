//! Fluent builder for pipeline configuration.
//!
//! This module provides a builder pattern for constructing transform
//! pipelines in a clean, readable, and type-safe manner. Steps run in
//! the order the builder methods are called.
//!
//! # Quick Start
//!
//! ```
//! use telemetry_charts::builder::PipelineBuilder;
//! use telemetry_charts::transform::{OutlierMethod, SmoothingMethod};
//!
//! let pipeline = PipelineBuilder::new()
//!     .remove_outliers(OutlierMethod::Iqr, 1.5)
//!     .smooth(5, SmoothingMethod::Exponential)
//!     .decimate(150)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(pipeline.step_names(), vec!["remove_outliers", "smooth", "decimate"]);
//! ```
//!
//! # Presets Reference
//!
//! | Preset | Steps | Use Case |
//! |--------|-------|----------|
//! | `Raw` | none | debugging, exact values |
//! | `Dashboard` | outliers → interpolate → decimate(150) | standard panels |
//! | `HighFrequency` | aggregate(1s) → smooth → decimate(500) | dense telemetry |
//! | `Sparkline` | smooth → decimate(50) | inline shape-only charts |
//!
//! # Common Configurations
//!
//! ## Standard dashboard panel
//!
//! ```ignore
//! let pipeline = PipelineBuilder::from_preset(ChartPreset::Dashboard)
//!     .build()?;
//! ```
//!
//! ## Sub-second telemetry on a wide panel
//!
//! ```ignore
//! let pipeline = PipelineBuilder::new()
//!     .aggregate(250, Reducer::Mean)
//!     .smooth(9, SmoothingMethod::Gaussian)
//!     .decimate(1_000)
//!     .build()?;
//! ```

use crate::config::{ChartMetadata, PipelineConfig, StepConfig};
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::transform::{
    GapFillOptions, InterpolationMethod, OutlierMethod, Reducer, SmoothingMethod,
};

/// Point budget a typical dashboard panel can render without aliasing.
pub const DEFAULT_POINT_BUDGET: usize = 150;

/// Ready-made pipeline shapes for common chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPreset {
    /// No preprocessing at all
    Raw,
    /// Outlier cleanup, gap fill, and display-budget decimation
    Dashboard,
    /// Dense telemetry: aggregate to 1s windows, smooth, wide budget
    HighFrequency,
    /// Tiny inline chart, shape over detail
    Sparkline,
}

/// Fluent builder for creating transform pipelines.
///
/// # Example
///
/// ```
/// use telemetry_charts::builder::PipelineBuilder;
/// use telemetry_charts::transform::{InterpolationMethod, Reducer};
///
/// let config = PipelineBuilder::new()
///     .aggregate(60_000, Reducer::Max)
///     .interpolate(InterpolationMethod::Linear)
///     .decimate(150)
///     .chart("errors_per_minute", "Peak error rate, per minute")
///     .build_config()
///     .unwrap();
///
/// assert_eq!(config.steps.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    steps: Vec<StepConfig>,
    metadata: Option<ChartMetadata>,
}

impl PipelineBuilder {
    /// Create a new builder with no steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder preloaded with a preset's steps.
    ///
    /// Further builder calls append after the preset, so a preset can
    /// be extended:
    ///
    /// ```ignore
    /// let pipeline = PipelineBuilder::from_preset(ChartPreset::Sparkline)
    ///     .aggregate(1_000, Reducer::Mean)
    ///     .build()?;
    /// ```
    pub fn from_preset(preset: ChartPreset) -> Self {
        let builder = Self::new();
        match preset {
            ChartPreset::Raw => builder,
            ChartPreset::Dashboard => builder
                .remove_outliers(OutlierMethod::Iqr, 1.5)
                .interpolate(InterpolationMethod::Linear)
                .decimate(DEFAULT_POINT_BUDGET),
            ChartPreset::HighFrequency => builder
                .aggregate(1_000, Reducer::Mean)
                .smooth(5, SmoothingMethod::Exponential)
                .decimate(500),
            ChartPreset::Sparkline => builder
                .smooth(3, SmoothingMethod::Simple)
                .decimate(50),
        }
    }

    // =========================================================================
    // Transform Steps
    // =========================================================================

    /// Drop statistical outliers before anything else sees them.
    pub fn remove_outliers(mut self, method: OutlierMethod, threshold: f64) -> Self {
        self.steps.push(StepConfig::RemoveOutliers { method, threshold });
        self
    }

    /// Fill sampling gaps using the default gap detection settings.
    pub fn interpolate(self, method: InterpolationMethod) -> Self {
        self.interpolate_with(method, GapFillOptions::default())
    }

    /// Fill sampling gaps with explicit gap detection settings.
    pub fn interpolate_with(mut self, method: InterpolationMethod, options: GapFillOptions) -> Self {
        self.steps.push(StepConfig::Interpolate {
            method,
            gap_threshold_ms: options.gap_threshold_ms,
            interval_ms: options.interval_ms,
            max_points_per_gap: options.max_points_per_gap,
        });
        self
    }

    /// Smooth values over a moving window.
    pub fn smooth(mut self, window_size: usize, method: SmoothingMethod) -> Self {
        self.steps.push(StepConfig::Smooth {
            window_size,
            method,
        });
        self
    }

    /// Bucket samples into fixed time windows.
    pub fn aggregate(mut self, window_ms: i64, reducer: Reducer) -> Self {
        self.steps.push(StepConfig::Aggregate { window_ms, reducer });
        self
    }

    /// Cap the point count, keeping per-stride extremes and endpoints.
    pub fn decimate(self, max_points: usize) -> Self {
        self.decimate_with(max_points, true)
    }

    /// Cap the point count with explicit control over extreme keeping.
    pub fn decimate_with(mut self, max_points: usize, preserve_extremes: bool) -> Self {
        self.steps.push(StepConfig::Decimate {
            max_points,
            preserve_extremes,
        });
        self
    }

    /// Append a raw step config (escape hatch for generated configs).
    pub fn step(mut self, step: StepConfig) -> Self {
        self.steps.push(step);
        self
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Name the chart this pipeline feeds, stamped with the current time.
    pub fn chart(mut self, name: &str, description: &str) -> Self {
        let mut metadata = ChartMetadata::named(name);
        metadata.description = Some(description.to_string());
        self.metadata = Some(metadata);
        self
    }

    /// Set chart metadata with full control.
    pub fn with_metadata(mut self, metadata: ChartMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the pipeline configuration.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid step.
    pub fn build_config(self) -> std::result::Result<PipelineConfig, String> {
        let config = PipelineConfig {
            steps: self.steps,
            metadata: self.metadata,
        };

        // Validate before returning
        config.validate()?;

        Ok(config)
    }

    /// Build and return a ready-to-use Pipeline.
    ///
    /// This is the most common entry point.
    pub fn build(self) -> Result<Pipeline> {
        let config = self
            .build_config()
            .map_err(crate::error::ChartError::Config)?;
        Pipeline::from_config(&config)
    }

    /// Number of steps queued so far.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get a summary of the current configuration.
    pub fn summary(&self) -> String {
        let chain = if self.steps.is_empty() {
            "(none)".to_string()
        } else {
            self.steps
                .iter()
                .map(|s| s.op_name())
                .collect::<Vec<_>>()
                .join(" -> ")
        };

        format!(
            "PipelineBuilder Summary:\n\
             - Steps: {} ({})\n\
             - Chart: {}",
            self.steps.len(),
            chain,
            self.metadata
                .as_ref()
                .map(|m| m.name.as_str())
                .unwrap_or("(unnamed)"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default_is_empty() {
        let builder = PipelineBuilder::new();
        assert_eq!(builder.step_count(), 0);
    }

    #[test]
    fn test_builder_orders_steps_as_called() {
        let config = PipelineBuilder::new()
            .remove_outliers(OutlierMethod::ZScore, 3.0)
            .aggregate(60_000, Reducer::Mean)
            .decimate(150)
            .build_config()
            .unwrap();

        let names: Vec<&str> = config.steps.iter().map(|s| s.op_name()).collect();
        assert_eq!(names, vec!["remove_outliers", "aggregate", "decimate"]);
    }

    #[test]
    fn test_builder_decimate_preserves_extremes_by_default() {
        let config = PipelineBuilder::new().decimate(150).build_config().unwrap();
        assert_eq!(
            config.steps[0],
            StepConfig::Decimate {
                max_points: 150,
                preserve_extremes: true,
            }
        );
    }

    #[test]
    fn test_builder_interpolate_with_custom_options() {
        let options = GapFillOptions {
            gap_threshold_ms: 120_000,
            interval_ms: 15_000,
            max_points_per_gap: 4,
        };
        let config = PipelineBuilder::new()
            .interpolate_with(InterpolationMethod::Step, options)
            .build_config()
            .unwrap();

        match &config.steps[0] {
            StepConfig::Interpolate {
                gap_threshold_ms,
                interval_ms,
                max_points_per_gap,
                ..
            } => {
                assert_eq!(*gap_threshold_ms, 120_000);
                assert_eq!(*interval_ms, 15_000);
                assert_eq!(*max_points_per_gap, 4);
            }
            other => panic!("expected interpolate step, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_chart_metadata() {
        let builder = PipelineBuilder::new().chart("cpu_panel", "CPU usage");
        let config = builder.build_config().unwrap();
        let metadata = config.metadata.unwrap();
        assert_eq!(metadata.name, "cpu_panel");
        assert_eq!(metadata.description.as_deref(), Some("CPU usage"));
        assert!(metadata.created_at.is_some());
    }

    #[test]
    fn test_builder_invalid_step_fails_build() {
        let result = PipelineBuilder::new().decimate(0).build_config();
        assert!(result.is_err());

        let result = PipelineBuilder::new()
            .remove_outliers(OutlierMethod::Iqr, -1.0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_build_produces_runnable_pipeline() {
        let pipeline = PipelineBuilder::new()
            .smooth(3, SmoothingMethod::Simple)
            .decimate(20)
            .build()
            .unwrap();
        assert_eq!(pipeline.step_names(), vec!["smooth", "decimate"]);
    }

    #[test]
    fn test_preset_raw_is_empty() {
        assert_eq!(PipelineBuilder::from_preset(ChartPreset::Raw).step_count(), 0);
    }

    #[test]
    fn test_preset_dashboard_shape() {
        let config = PipelineBuilder::from_preset(ChartPreset::Dashboard)
            .build_config()
            .unwrap();
        let names: Vec<&str> = config.steps.iter().map(|s| s.op_name()).collect();
        assert_eq!(names, vec!["remove_outliers", "interpolate", "decimate"]);
        assert!(matches!(
            config.steps[2],
            StepConfig::Decimate {
                max_points: DEFAULT_POINT_BUDGET,
                preserve_extremes: true,
            }
        ));
    }

    #[test]
    fn test_preset_extends_with_further_calls() {
        let builder = PipelineBuilder::from_preset(ChartPreset::Sparkline)
            .aggregate(1_000, Reducer::Mean);
        assert_eq!(builder.step_count(), 3);
    }

    #[test]
    fn test_builder_summary() {
        let builder = PipelineBuilder::new()
            .remove_outliers(OutlierMethod::Iqr, 1.5)
            .decimate(150)
            .chart("latency_panel", "p99 latency");

        let summary = builder.summary();
        assert!(summary.contains("Steps: 2"));
        assert!(summary.contains("remove_outliers -> decimate"));
        assert!(summary.contains("latency_panel"));
    }

    #[test]
    fn test_builder_chaining() {
        // Every builder method returns Self for chaining
        let _builder = PipelineBuilder::new()
            .remove_outliers(OutlierMethod::ModifiedZScore, 3.5)
            .interpolate(InterpolationMethod::Spline)
            .smooth(7, SmoothingMethod::Gaussian)
            .aggregate(5_000, Reducer::Max)
            .decimate_with(300, false)
            .step(StepConfig::Smooth {
                window_size: 3,
                method: SmoothingMethod::Simple,
            })
            .chart("test", "Test");
    }
}
