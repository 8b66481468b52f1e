//! Pipeline configuration management.
//!
//! Declarative configuration for a transform pipeline, with
//! serialization support so chart preprocessing setups can live in
//! version control next to the dashboards that use them.
//!
//! # Features
//!
//! - **Declarative steps**: each transform is one tagged [`StepConfig`]
//! - **Serialization**: save/load configurations to TOML or JSON
//! - **Validation**: catch bad parameters before a pipeline is built
//!
//! # Example
//!
//! ```ignore
//! use telemetry_charts::config::PipelineConfig;
//!
//! // Load a reviewed config from disk
//! let config = PipelineConfig::load_toml("configs/cpu_chart.toml")?;
//!
//! // Use with pipeline
//! let pipeline = Pipeline::from_config(&config)?;
//! ```
//!
//! The TOML form of a two-step pipeline:
//!
//! ```text
//! [[steps]]
//! op = "remove_outliers"
//! method = "iqr"
//! threshold = 1.5
//!
//! [[steps]]
//! op = "decimate"
//! max_points = 150
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::transform::{GapFillOptions, InterpolationMethod, OutlierMethod, Reducer, SmoothingMethod};

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Transform steps, applied in order
    #[serde(default)]
    pub steps: Vec<StepConfig>,

    /// Chart metadata (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChartMetadata>,
}

/// One transform step, tagged by operation name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepConfig {
    /// Reduce point count while preserving visual shape
    Decimate {
        max_points: usize,
        #[serde(default = "default_true")]
        preserve_extremes: bool,
    },

    /// Moving-window noise reduction
    Smooth {
        window_size: usize,
        method: SmoothingMethod,
    },

    /// Partition off statistical outliers, keeping the cleaned half
    RemoveOutliers {
        method: OutlierMethod,
        threshold: f64,
    },

    /// Fill gaps with synthesized, tagged points
    Interpolate {
        method: InterpolationMethod,
        #[serde(default = "default_gap_threshold_ms")]
        gap_threshold_ms: i64,
        #[serde(default = "default_interval_ms")]
        interval_ms: i64,
        #[serde(default = "default_max_points_per_gap")]
        max_points_per_gap: usize,
    },

    /// Bucket samples into fixed time windows
    Aggregate { window_ms: i64, reducer: Reducer },
}

fn default_true() -> bool {
    true
}

fn default_gap_threshold_ms() -> i64 {
    GapFillOptions::default().gap_threshold_ms
}

fn default_interval_ms() -> i64 {
    GapFillOptions::default().interval_ms
}

fn default_max_points_per_gap() -> usize {
    GapFillOptions::default().max_points_per_gap
}

/// Chart metadata for tracking and reproducibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    /// Chart or dashboard panel name
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Version or git commit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Custom tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ChartMetadata {
    /// Metadata stamped with the current UTC time.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Self::default()
        }
    }
}

impl PipelineConfig {
    /// Create an empty pipeline configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform step.
    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.steps.push(step);
        self
    }

    /// Set chart metadata.
    pub fn with_metadata(mut self, metadata: ChartMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validate the configuration.
    ///
    /// Returns Ok(()) if valid, Err(msg) naming the first offending step.
    pub fn validate(&self) -> Result<(), String> {
        for (i, step) in self.steps.iter().enumerate() {
            step.validate()
                .map_err(|msg| format!("step {} ({}): {}", i, step.op_name(), msg))?;
        }
        Ok(())
    }

    /// Save configuration to TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load configuration from TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

impl StepConfig {
    /// Wire name of the operation, as written in config files.
    pub fn op_name(&self) -> &'static str {
        match self {
            StepConfig::Decimate { .. } => "decimate",
            StepConfig::Smooth { .. } => "smooth",
            StepConfig::RemoveOutliers { .. } => "remove_outliers",
            StepConfig::Interpolate { .. } => "interpolate",
            StepConfig::Aggregate { .. } => "aggregate",
        }
    }

    /// Validate a single step's parameters.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            StepConfig::Decimate { max_points, .. } => {
                if *max_points == 0 {
                    return Err("max_points must be > 0".to_string());
                }
            }
            StepConfig::Smooth { window_size, .. } => {
                if *window_size == 0 {
                    return Err("window_size must be > 0".to_string());
                }
            }
            StepConfig::RemoveOutliers { threshold, .. } => {
                if !threshold.is_finite() || *threshold <= 0.0 {
                    return Err(format!("threshold must be positive, got {threshold}"));
                }
            }
            StepConfig::Interpolate {
                gap_threshold_ms,
                interval_ms,
                max_points_per_gap,
                ..
            } => {
                if *gap_threshold_ms <= 0 {
                    return Err("gap_threshold_ms must be > 0".to_string());
                }
                if *interval_ms <= 0 {
                    return Err("interval_ms must be > 0".to_string());
                }
                if *max_points_per_gap == 0 {
                    return Err("max_points_per_gap must be > 0".to_string());
                }
            }
            StepConfig::Aggregate { window_ms, .. } => {
                if *window_ms <= 0 {
                    return Err("window_ms must be > 0".to_string());
                }
            }
        }
        Ok(())
    }
}
