//! Threshold Evaluation
//!
//! Evaluates alerting thresholds against a series. A threshold is a
//! declarative [`ThresholdDefinition`]; evaluation turns it into a
//! [`ThresholdEvaluation`] carrying the calculated cutoff, the optional
//! confidence band, and whether the most recent observation violates it.
//!
//! # Threshold Kinds
//!
//! ```text
//! kind                calculated value
//! ------------------  ---------------------------------------------
//! static              fixed value from the definition
//! dynamic_percentile  p-th percentile of the trailing window
//! dynamic_stddev      mean + k·stddev of the trailing window
//! rate_of_change      mean |Δ| over the last 10 samples, times k
//! ------------------  ---------------------------------------------
//! ```
//!
//! Dynamic kinds look at the last `max(min_data_points, 50)` finite
//! values in chronological order. When fewer than `min_data_points`
//! are available the evaluation does not fail: it falls back to the
//! definition's static `value` when one is set, and otherwise comes
//! back indeterminate with a `reason`.
//!
//! Violation checks apply a hysteresis dead-band so a value oscillating
//! right at the cutoff does not flap:
//!
//! ```text
//! above:  violated ⇔ current > calculated + hysteresis
//! below:  violated ⇔ current < calculated - hysteresis
//! ```
//!
//! # Example
//!
//! ```
//! use telemetry_charts::threshold::{self, Severity, ThresholdDefinition};
//! use telemetry_charts::series::Sample;
//!
//! let series: Vec<Sample> = (0..60)
//!     .map(|i| Sample::new(i * 1_000, if i == 59 { 98.0 } else { 40.0 }))
//!     .collect();
//!
//! let cpu = ThresholdDefinition::static_value("cpu-high", 90.0, Severity::Critical);
//! let eval = threshold::evaluate_one(&cpu, &series);
//! assert!(eval.violated);
//! ```

use serde::{Deserialize, Serialize};

use crate::series::{self, Series};
use crate::stats;

/// Trailing-window floor for the dynamic kinds.
const MIN_WINDOW: usize = 50;

/// Samples that feed the rate-of-change delta window.
const RATE_WINDOW: usize = 10;

/// Half-width, in percentile points, of the percentile confidence band.
const CONFIDENCE_BAND_PCT: f64 = 5.0;

/// How the cutoff for a threshold is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    Static,
    DynamicPercentile,
    DynamicStddev,
    RateOfChange,
}

/// Alert weight attached to a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Critical,
}

/// Which side of the cutoff counts as a violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    #[default]
    Above,
    Below,
}

/// Declarative description of one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDefinition {
    pub id: String,
    pub kind: ThresholdKind,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub comparison: Comparison,
    /// Cutoff for `static`; static fallback for the dynamic kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Percentile in `[0, 100]` for `dynamic_percentile`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    /// Multiplier `k` for `dynamic_stddev` and `rate_of_change`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev_multiplier: Option<f64>,
    /// Finite samples required before a dynamic cutoff is trusted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_data_points: Option<usize>,
    /// Dead-band width around the cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hysteresis: Option<f64>,
    /// Attach a confidence band to dynamic evaluations.
    #[serde(default)]
    pub with_confidence: bool,
}

impl Default for ThresholdDefinition {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: ThresholdKind::Static,
            severity: Severity::Warning,
            comparison: Comparison::Above,
            value: None,
            percentile: None,
            stddev_multiplier: None,
            min_data_points: None,
            hysteresis: None,
            with_confidence: false,
        }
    }
}

impl ThresholdDefinition {
    /// Fixed cutoff.
    pub fn static_value(id: impl Into<String>, value: f64, severity: Severity) -> Self {
        Self {
            id: id.into(),
            kind: ThresholdKind::Static,
            severity,
            value: Some(value),
            ..Self::default()
        }
    }

    /// Cutoff at the `percentile`-th percentile of the trailing window.
    pub fn dynamic_percentile(id: impl Into<String>, percentile: f64, severity: Severity) -> Self {
        Self {
            id: id.into(),
            kind: ThresholdKind::DynamicPercentile,
            severity,
            percentile: Some(percentile),
            ..Self::default()
        }
    }

    /// Cutoff at `mean + multiplier·stddev` of the trailing window.
    pub fn dynamic_stddev(id: impl Into<String>, multiplier: f64, severity: Severity) -> Self {
        Self {
            id: id.into(),
            kind: ThresholdKind::DynamicStddev,
            severity,
            stddev_multiplier: Some(multiplier),
            ..Self::default()
        }
    }

    /// Cutoff at `multiplier` times the recent mean absolute delta.
    pub fn rate_of_change(id: impl Into<String>, multiplier: f64, severity: Severity) -> Self {
        Self {
            id: id.into(),
            kind: ThresholdKind::RateOfChange,
            severity,
            stddev_multiplier: Some(multiplier),
            ..Self::default()
        }
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_hysteresis(mut self, hysteresis: f64) -> Self {
        self.hysteresis = Some(hysteresis);
        self
    }

    pub fn with_min_data_points(mut self, min: usize) -> Self {
        self.min_data_points = Some(min);
        self
    }

    /// Static value the dynamic kinds fall back to on thin data.
    pub fn with_fallback(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_confidence_interval(mut self) -> Self {
        self.with_confidence = true;
        self
    }

    /// Check internal consistency of the definition.
    ///
    /// # Returns
    ///
    /// `Ok(())` when usable, `Err(message)` describing the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("threshold id must not be empty".to_string());
        }
        match self.kind {
            ThresholdKind::Static => {
                if self.value.is_none() {
                    return Err(format!("static threshold '{}' has no value", self.id));
                }
            }
            ThresholdKind::DynamicPercentile => match self.percentile {
                None => {
                    return Err(format!(
                        "percentile threshold '{}' has no percentile",
                        self.id
                    ));
                }
                Some(p) if !(0.0..=100.0).contains(&p) => {
                    return Err(format!(
                        "percentile for '{}' must be in [0, 100], got {p}",
                        self.id
                    ));
                }
                Some(_) => {}
            },
            ThresholdKind::DynamicStddev | ThresholdKind::RateOfChange => {
                if let Some(k) = self.stddev_multiplier {
                    if !k.is_finite() || k <= 0.0 {
                        return Err(format!(
                            "multiplier for '{}' must be positive, got {k}",
                            self.id
                        ));
                    }
                }
            }
        }
        if let Some(h) = self.hysteresis {
            if !h.is_finite() || h < 0.0 {
                return Err(format!(
                    "hysteresis for '{}' must be non-negative, got {h}",
                    self.id
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of evaluating one threshold against a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEvaluation {
    pub id: String,
    pub severity: Severity,
    /// The cutoff in effect, `None` when it could not be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<(f64, f64)>,
    pub violated: bool,
    /// Set when the evaluation is indeterminate or fell back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ThresholdEvaluation {
    fn indeterminate(def: &ThresholdDefinition, reason: String) -> Self {
        Self {
            id: def.id.clone(),
            severity: def.severity,
            calculated_value: None,
            confidence_interval: None,
            violated: false,
            reason: Some(reason),
        }
    }
}

/// Evaluate every definition against the series, in definition order.
///
/// A definition that cannot produce a cutoff yields an indeterminate
/// evaluation rather than an error, so one bad threshold never hides
/// the others.
pub fn evaluate(definitions: &[ThresholdDefinition], series: &Series) -> Vec<ThresholdEvaluation> {
    let values = chronological_finite(series);
    definitions
        .iter()
        .map(|def| evaluate_against(def, &values))
        .collect()
}

/// Evaluate a single definition against the series.
pub fn evaluate_one(definition: &ThresholdDefinition, series: &Series) -> ThresholdEvaluation {
    evaluate_against(definition, &chronological_finite(series))
}

fn chronological_finite(series: &Series) -> Vec<f64> {
    series::finite_values(&series::sorted_copy(series))
}

fn evaluate_against(def: &ThresholdDefinition, values: &[f64]) -> ThresholdEvaluation {
    let (calculated, confidence, mut reason) = match def.kind {
        ThresholdKind::Static => match def.value {
            Some(v) => (v, None, None),
            None => {
                return ThresholdEvaluation::indeterminate(
                    def,
                    format!("static threshold '{}' has no value", def.id),
                );
            }
        },
        ThresholdKind::DynamicPercentile => {
            let p = match def.percentile {
                Some(p) => p.clamp(0.0, 100.0),
                None => {
                    return ThresholdEvaluation::indeterminate(
                        def,
                        format!("percentile threshold '{}' has no percentile", def.id),
                    );
                }
            };
            match trailing_window(def, values) {
                WindowState::Ready(window) => {
                    let sorted = ascending(window);
                    let cutoff = percentile_of(&sorted, p);
                    let ci = def.with_confidence.then(|| {
                        let lo = percentile_of(&sorted, (p - CONFIDENCE_BAND_PCT).max(0.0));
                        let hi = percentile_of(&sorted, (p + CONFIDENCE_BAND_PCT).min(100.0));
                        (lo, hi)
                    });
                    (cutoff, ci, None)
                }
                WindowState::Fallback(value, why) => (value, None, Some(why)),
                WindowState::Starved(why) => return ThresholdEvaluation::indeterminate(def, why),
            }
        }
        ThresholdKind::DynamicStddev => {
            let k = def.stddev_multiplier.unwrap_or(2.0);
            match trailing_window(def, values) {
                WindowState::Ready(window) => match (stats::mean(window), stats::stddev(window)) {
                    (Some(mean), Some(sd)) => {
                        let cutoff = k.mul_add(sd, mean);
                        let ci = def.with_confidence.then(|| {
                            let lo = (k - 0.5).mul_add(sd, mean);
                            let hi = (k + 0.5).mul_add(sd, mean);
                            (lo.min(hi), lo.max(hi))
                        });
                        (cutoff, ci, None)
                    }
                    _ => {
                        return ThresholdEvaluation::indeterminate(
                            def,
                            format!("threshold '{}': window has no finite values", def.id),
                        );
                    }
                },
                WindowState::Fallback(value, why) => (value, None, Some(why)),
                WindowState::Starved(why) => return ThresholdEvaluation::indeterminate(def, why),
            }
        }
        ThresholdKind::RateOfChange => {
            let k = def.stddev_multiplier.unwrap_or(2.0);
            match rate_cutoff(def, values, k) {
                RateState::Ready(cutoff) => (cutoff, None, None),
                RateState::Fallback(value, why) => (value, None, Some(why)),
                RateState::Starved(why) => return ThresholdEvaluation::indeterminate(def, why),
            }
        }
    };

    // The observation under test: the latest value, or for rate
    // thresholds the magnitude of the latest step.
    let current = match def.kind {
        ThresholdKind::RateOfChange => latest_delta(values),
        _ => values.last().copied(),
    };

    let violated = match current {
        Some(current) => {
            let h = def.hysteresis.unwrap_or(0.0);
            match def.comparison {
                Comparison::Above => current > calculated + h,
                Comparison::Below => current < calculated - h,
            }
        }
        None => {
            reason = Some(format!(
                "threshold '{}': no finite observation to compare",
                def.id
            ));
            false
        }
    };

    ThresholdEvaluation {
        id: def.id.clone(),
        severity: def.severity,
        calculated_value: Some(calculated),
        confidence_interval: confidence,
        violated,
        reason,
    }
}

enum WindowState<'a> {
    Ready(&'a [f64]),
    Fallback(f64, String),
    Starved(String),
}

/// The trailing window the dynamic kinds compute over: the last
/// `max(min_data_points, 50)` finite values.
fn trailing_window<'a>(def: &ThresholdDefinition, values: &'a [f64]) -> WindowState<'a> {
    let min = def.min_data_points.unwrap_or(0);
    if values.len() < min.max(1) {
        let why = format!(
            "threshold '{}': insufficient data, need {} points, have {}",
            def.id,
            min.max(1),
            values.len()
        );
        return match def.value {
            Some(fallback) => WindowState::Fallback(fallback, format!("{why}; using static fallback")),
            None => WindowState::Starved(why),
        };
    }
    let want = min.max(MIN_WINDOW);
    WindowState::Ready(&values[values.len().saturating_sub(want)..])
}

enum RateState {
    Ready(f64),
    Fallback(f64, String),
    Starved(String),
}

fn rate_cutoff(def: &ThresholdDefinition, values: &[f64], k: f64) -> RateState {
    let min = def.min_data_points.unwrap_or(0).max(2);
    if values.len() < min {
        let why = format!(
            "threshold '{}': insufficient data, need {} points, have {}",
            def.id,
            min,
            values.len()
        );
        return match def.value {
            Some(fallback) => RateState::Fallback(fallback, format!("{why}; using static fallback")),
            None => RateState::Starved(why),
        };
    }
    let tail = &values[values.len().saturating_sub(RATE_WINDOW)..];
    let deltas: Vec<f64> = tail.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    match stats::mean(&deltas) {
        Some(mean_delta) => RateState::Ready(mean_delta * k),
        None => RateState::Starved(format!(
            "threshold '{}': not enough points for a delta",
            def.id
        )),
    }
}

fn latest_delta(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some((values[values.len() - 1] - values[values.len() - 2]).abs())
}

fn ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Order statistic at percentile `p` of an ascending window:
/// `window[floor(n·p/100)]`, clamped to the last element.
fn percentile_of(sorted: &[f64], p: f64) -> f64 {
    let idx = (sorted.len() as f64 * p / 100.0).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
