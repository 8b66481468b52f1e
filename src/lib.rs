//! Telemetry Charts
//!
//! Time-series transformation and coordinate-scaling pipeline for streaming
//! telemetry dashboards.
//!
//! # Overview
//!
//! This library prepares raw telemetry series for rendering: it shrinks
//! high-frequency data to a point budget, repairs gaps and outliers, maps
//! values to screen coordinates, and evaluates alert thresholds.
//!
//! - **Transforms**: extrema-preserving decimation, smoothing, outlier
//!   removal, gap interpolation, windowed aggregation
//! - **Pipelines**: declarative step configs (TOML/JSON) with per-step
//!   fault isolation
//! - **Scales**: linear, logarithmic, time, band, and color scales with
//!   human-friendly tick generation
//! - **Thresholds**: static and data-driven alert rules with hysteresis
//! - **Batch**: parallel transformation across dashboard panels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Telemetry Charts                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  series      - Timestamped sample data model                    │
//! │  transform/  - Decimation, smoothing, outliers, gap filling     │
//! │  pipeline    - Composable transform steps, fault isolated       │
//! │  scale/      - Screen-coordinate and color mapping              │
//! │  threshold   - Alert rules evaluated against series             │
//! │  batch       - Parallel processing of many series               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use telemetry_charts::prelude::*;
//!
//! // 10k raw samples, far more than a chart can usefully draw
//! let samples: Series = (0..10_000)
//!     .map(|i| Sample::new(i * 1_000, (i as f64 * 0.01).sin()))
//!     .collect();
//!
//! let pipeline = PipelineBuilder::new()
//!     .remove_outliers(OutlierMethod::Iqr, 1.5)
//!     .decimate(500)
//!     .build()?;
//!
//! let rendered = pipeline.apply(samples);
//! assert!(rendered.len() <= 500);
//! # Ok::<(), ChartError>(())
//! ```

pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod scale;
pub mod series;
pub mod stats;
pub mod threshold;
pub mod transform;
pub mod validation;

// Re-exports - Core data model
pub use error::{ChartError, Result};
pub use series::{Metadata, Sample, Series};

// Re-exports - Transforms
pub use transform::{
    aggregate_by_window, decimate, interpolate_missing, remove_outliers, smooth, GapFillOptions,
    InterpolationMethod, OutlierMethod, OutlierPartition, Reducer, SmoothingMethod,
};

// Re-exports - Pipeline
pub use builder::{ChartPreset, PipelineBuilder, DEFAULT_POINT_BUDGET};
pub use config::{ChartMetadata, PipelineConfig, StepConfig};
pub use pipeline::{Pipeline, PipelineReport, StepReport, TransformStep};

// Re-exports - Scales
pub use scale::{
    create_adaptive_scale, create_scale, BandScale, LinearScale, LogScale, OrdinalScale, Scale,
    ScaleKind, ScaleSpec, SequentialScale, TimeScale,
};

// Re-exports - Thresholds
pub use threshold::{
    Comparison, Severity, ThresholdDefinition, ThresholdEvaluation, ThresholdKind,
};

// Re-exports - Validation
pub use validation::{
    validate_series, SeriesValidator, ValidationConfig, ValidationLevel, ValidationReport,
};

// Re-exports - Batch Processing
pub use batch::{
    transform_series_parallel, BatchConfig, BatchOutput, BatchProcessor, CancellationToken,
    ErrorMode, LogProgress, ProgressCallback, ProgressInfo, SeriesError, SeriesResult,
};
