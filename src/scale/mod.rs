//! Scale Factory
//!
//! Scales are the pure domain→range mapping functions a rendering surface
//! uses to turn data coordinates into screen coordinates (or colors). This
//! module is the factory layer: a declarative [`ScaleSpec`] comes in from
//! the rendering layer's configuration, a concrete [`Scale`] comes out.
//!
//! # Scale Kinds
//!
//! | Kind | Domain | Range | Typical use |
//! |------|--------|-------|-------------|
//! | `linear` | `[f64; 2]` | `[f64; 2]` | y-axis for most channels |
//! | `log` | `[f64; 2]`, strictly positive | `[f64; 2]` | wide-magnitude channels |
//! | `time` | `[i64; 2]` epoch ms | `[f64; 2]` | x-axis |
//! | `band` | ordered categories | `[f64; 2]` | bar charts |
//! | `ordinal` | categories | discrete outputs | per-category colors |
//! | `sequential` | `[f64; 2]` | color gradient | heat coloring |
//!
//! [`create_scale`] dispatches with an exhaustive match over [`ScaleSpec`],
//! so adding a scale kind is a compile-checked change.
//!
//! # Example
//!
//! ```
//! use telemetry_charts::scale::{create_scale, ScaleSpec};
//!
//! let spec = ScaleSpec::Linear {
//!     domain: [0.0, 100.0],
//!     range: [0.0, 200.0],
//!     nice: false,
//!     clamp: false,
//! };
//! let scale = create_scale(&spec).unwrap();
//! assert_eq!(scale.scale_value(50.0), Some(100.0));
//! ```

pub mod adaptive;
pub mod band;
pub mod continuous;
pub mod sequential;

pub use adaptive::{create_adaptive_scale, infer_scale_kind, AdaptiveScaleOptions, DomainValue};
pub use band::{BandScale, OrdinalScale};
pub use continuous::{LinearScale, LogScale, TimeScale};
pub use sequential::{Rgb, SequentialScale};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// The supported scale kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Linear,
    Log,
    Time,
    Band,
    Ordinal,
    Sequential,
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Log => "log",
            ScaleKind::Time => "time",
            ScaleKind::Band => "band",
            ScaleKind::Ordinal => "ordinal",
            ScaleKind::Sequential => "sequential",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ScaleKind {
    type Err = ChartError;

    /// Parse a kind name as it appears in configuration files. Unknown
    /// names are rejected rather than defaulted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(ScaleKind::Linear),
            "log" => Ok(ScaleKind::Log),
            "time" => Ok(ScaleKind::Time),
            "band" => Ok(ScaleKind::Band),
            "ordinal" => Ok(ScaleKind::Ordinal),
            "sequential" => Ok(ScaleKind::Sequential),
            other => Err(ChartError::unsupported_kind(other)),
        }
    }
}

/// Declarative scale description, as supplied by the rendering layer.
///
/// Serializes with an explicit `kind` tag, so a JSON spec looks like
/// `{"kind": "linear", "domain": [0, 100], "range": [0, 200]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleSpec {
    /// Straight-line numeric mapping
    Linear {
        domain: [f64; 2],
        range: [f64; 2],
        #[serde(default)]
        nice: bool,
        #[serde(default)]
        clamp: bool,
    },

    /// Logarithmic mapping; domain bounds must be strictly positive
    Log {
        domain: [f64; 2],
        range: [f64; 2],
        #[serde(default)]
        nice: bool,
        #[serde(default)]
        clamp: bool,
    },

    /// Epoch-millisecond time axis
    Time {
        domain: [i64; 2],
        range: [f64; 2],
        #[serde(default)]
        nice: bool,
        #[serde(default)]
        clamp: bool,
    },

    /// Ordered categories mapped to evenly spaced slots
    Band {
        domain: Vec<String>,
        range: [f64; 2],
        /// Fraction of each slot reserved as gap, in `[0, 1)`
        #[serde(default)]
        padding: f64,
    },

    /// Categories mapped to discrete outputs by position
    Ordinal {
        domain: Vec<String>,
        range: Vec<String>,
    },

    /// Numeric domain through a named color interpolator
    Sequential {
        domain: [f64; 2],
        interpolator: String,
    },
}

impl ScaleSpec {
    /// The kind tag of this spec.
    pub fn kind(&self) -> ScaleKind {
        match self {
            ScaleSpec::Linear { .. } => ScaleKind::Linear,
            ScaleSpec::Log { .. } => ScaleKind::Log,
            ScaleSpec::Time { .. } => ScaleKind::Time,
            ScaleSpec::Band { .. } => ScaleKind::Band,
            ScaleSpec::Ordinal { .. } => ScaleKind::Ordinal,
            ScaleSpec::Sequential { .. } => ScaleKind::Sequential,
        }
    }
}

/// A constructed scale, ready to map domain values.
///
/// The enum keeps dispatch closed and exhaustive; variant-specific
/// capabilities (bandwidth, colors, tick formats) surface through the
/// `Option`-returning accessors below, returning `None` for kinds the
/// query does not apply to.
#[derive(Debug)]
pub enum Scale {
    Linear(LinearScale),
    Log(LogScale),
    Time(TimeScale),
    Band(BandScale),
    Ordinal(OrdinalScale),
    Sequential(SequentialScale),
}

impl Scale {
    /// Which kind of scale this is.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Scale::Linear(_) => ScaleKind::Linear,
            Scale::Log(_) => ScaleKind::Log,
            Scale::Time(_) => ScaleKind::Time,
            Scale::Band(_) => ScaleKind::Band,
            Scale::Ordinal(_) => ScaleKind::Ordinal,
            Scale::Sequential(_) => ScaleKind::Sequential,
        }
    }

    /// Map a numeric domain value to a range coordinate.
    ///
    /// For time scales the value is interpreted as epoch milliseconds.
    /// Category and color scales return `None`.
    pub fn scale_value(&self, value: f64) -> Option<f64> {
        match self {
            Scale::Linear(s) => Some(s.scale(value)),
            Scale::Log(s) => Some(s.scale(value)),
            Scale::Time(s) => Some(s.scale(value)),
            Scale::Band(_) | Scale::Ordinal(_) | Scale::Sequential(_) => None,
        }
    }

    /// Map a category to its slot position (band scales only).
    pub fn scale_category(&self, category: &str) -> Option<f64> {
        match self {
            Scale::Band(s) => s.position(category),
            _ => None,
        }
    }

    /// Map a numeric value to a color (sequential scales only).
    pub fn color_at(&self, value: f64) -> Option<Rgb> {
        match self {
            Scale::Sequential(s) => Some(s.color_at(value)),
            _ => None,
        }
    }

    /// Discrete output for a category (ordinal scales only).
    pub fn output_for(&self, category: &str) -> Option<&str> {
        match self {
            Scale::Ordinal(s) => s.output_for(category),
            _ => None,
        }
    }

    /// Width of a category band (band scales only).
    pub fn bandwidth(&self) -> Option<f64> {
        match self {
            Scale::Band(s) => Some(s.bandwidth()),
            _ => None,
        }
    }

    /// Tick positions for continuous numeric scales.
    pub fn ticks(&self, count: usize) -> Option<Vec<f64>> {
        match self {
            Scale::Linear(s) => Some(s.ticks(count)),
            Scale::Log(s) => Some(s.ticks(count)),
            Scale::Time(s) => Some(s.ticks(count).into_iter().map(|t| t as f64).collect()),
            _ => None,
        }
    }

    /// Chrono format string appropriate for the domain span (time scales).
    pub fn tick_format(&self) -> Option<&'static str> {
        match self {
            Scale::Time(s) => Some(s.tick_format()),
            _ => None,
        }
    }
}

/// Build a concrete [`Scale`] from a declarative spec.
///
/// # Errors
///
/// - [`ChartError::InvalidDomain`] for empty, non-finite, or degenerate
///   domains, and for log scales with a non-positive bound
/// - [`ChartError::UnsupportedScaleKind`] for unknown sequential
///   interpolator names
/// - [`ChartError::InvalidArgument`] for band padding outside `[0, 1)`
pub fn create_scale(spec: &ScaleSpec) -> Result<Scale> {
    match spec {
        ScaleSpec::Linear {
            domain,
            range,
            nice,
            clamp,
        } => Ok(Scale::Linear(LinearScale::new(*domain, *range, *nice, *clamp)?)),
        ScaleSpec::Log {
            domain,
            range,
            nice,
            clamp,
        } => Ok(Scale::Log(LogScale::new(*domain, *range, *nice, *clamp)?)),
        ScaleSpec::Time {
            domain,
            range,
            nice,
            clamp,
        } => Ok(Scale::Time(TimeScale::new(*domain, *range, *nice, *clamp)?)),
        ScaleSpec::Band {
            domain,
            range,
            padding,
        } => Ok(Scale::Band(BandScale::new(domain.clone(), *range, *padding)?)),
        ScaleSpec::Ordinal { domain, range } => Ok(Scale::Ordinal(OrdinalScale::new(
            domain.clone(),
            range.clone(),
        )?)),
        ScaleSpec::Sequential {
            domain,
            interpolator,
        } => Ok(Scale::Sequential(SequentialScale::named(
            *domain,
            interpolator,
        )?)),
    }
}
