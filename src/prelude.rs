//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions for
//! ergonomic usage of the charting library.
//!
//! # Usage
//!
//! ```
//! use telemetry_charts::prelude::*;
//!
//! let config = PipelineConfig::default();
//! let pipeline = Pipeline::from_config(&config)?;
//! let rendered = pipeline.apply(vec![Sample::new(0, 1.0)]);
//! # Ok::<(), ChartError>(())
//! ```
//!
//! # What's Included
//!
//! ## Core Data Model
//! - [`Sample`] - A single timestamped reading
//! - [`Series`] - A vector of samples
//! - [`ChartError`] / [`Result`] - Error handling
//!
//! ## Transforms
//! - [`decimate`], [`smooth`], [`remove_outliers`], [`interpolate_missing`],
//!   [`aggregate_by_window`] - Standalone transform functions
//! - [`SmoothingMethod`], [`OutlierMethod`], [`InterpolationMethod`],
//!   [`Reducer`] - Method selectors
//!
//! ## Pipeline
//! - [`Pipeline`] - Step sequence with fault isolation
//! - [`PipelineBuilder`] - Fluent pipeline construction
//! - [`PipelineConfig`] / [`StepConfig`] - Declarative configuration
//! - [`ChartPreset`] - Ready-made pipelines for common chart types
//!
//! ## Scales
//! - [`Scale`] / [`ScaleSpec`] / [`create_scale`] - Tagged scale dispatch
//! - [`LinearScale`], [`LogScale`], [`TimeScale`], [`BandScale`],
//!   [`OrdinalScale`], [`SequentialScale`] - Concrete scales
//! - [`create_adaptive_scale`] - Domain-driven scale selection
//!
//! ## Thresholds
//! - [`ThresholdDefinition`] - Alert rule configuration
//! - [`ThresholdEvaluation`] - Evaluation outcome per rule
//!
//! ## Validation
//! - [`SeriesValidator`] - Data quality checks and repair
//! - [`ValidationReport`] - Aggregated check outcomes
//!
//! ## Batch Processing
//! - [`BatchProcessor`] - One pipeline over many series in parallel
//! - [`BatchOutput`] - Aggregated batch results

// ============================================================================
// Core Data Model
// ============================================================================

pub use crate::error::{ChartError, Result};
pub use crate::series::{Metadata, Sample, Series};

// ============================================================================
// Transforms
// ============================================================================

pub use crate::transform::{
    aggregate_by_window, decimate, interpolate_missing, remove_outliers, smooth, GapFillOptions,
    InterpolationMethod, OutlierMethod, OutlierPartition, Reducer, SmoothingMethod,
};

// ============================================================================
// Pipeline
// ============================================================================

pub use crate::builder::{ChartPreset, PipelineBuilder, DEFAULT_POINT_BUDGET};
pub use crate::config::{ChartMetadata, PipelineConfig, StepConfig};
pub use crate::pipeline::{Pipeline, PipelineReport, StepReport, TransformStep};

// ============================================================================
// Scales
// ============================================================================

pub use crate::scale::{
    create_adaptive_scale, create_scale, infer_scale_kind, AdaptiveScaleOptions, BandScale,
    DomainValue, LinearScale, LogScale, OrdinalScale, Rgb, Scale, ScaleKind, ScaleSpec,
    SequentialScale, TimeScale,
};

// ============================================================================
// Thresholds
// ============================================================================

pub use crate::threshold::{
    Comparison, Severity, ThresholdDefinition, ThresholdEvaluation, ThresholdKind,
};

// ============================================================================
// Validation
// ============================================================================

pub use crate::validation::{
    validate_series, SeriesValidator, ValidationConfig, ValidationLevel, ValidationReport,
};

// ============================================================================
// Batch Processing
// ============================================================================

pub use crate::batch::{
    transform_series_parallel, BatchConfig, BatchOutput, BatchProcessor, CancellationToken,
    ErrorMode, LogProgress, ProgressCallback, ProgressInfo, SeriesError, SeriesResult,
};

// ============================================================================
// Type Aliases for Convenience
// ============================================================================

/// Named series pair, the unit of batch processing
pub type NamedSeries = (String, Series);
