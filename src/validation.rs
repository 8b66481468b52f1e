//! Series Validation Module
//!
//! Provides validation utilities for incoming telemetry series to catch
//! data quality problems before they propagate through a transform
//! pipeline.
//!
//! # Validation Categories
//!
//! 1. **Value Sanity**: NaN/Inf detection
//! 2. **Timestamp Ordering**: Ascending order, duplicate timestamps
//! 3. **Timestamp Range**: Epoch values outside a plausible window
//! 4. **Coverage**: Empty series, large gaps between samples
//!
//! # Usage
//!
//! ```
//! use telemetry_charts::series::Sample;
//! use telemetry_charts::validation::SeriesValidator;
//!
//! let validator = SeriesValidator::new();
//! let series = vec![Sample::new(1_000, 1.0), Sample::new(2_000, f64::NAN)];
//! let report = validator.validate(&series);
//!
//! if !report.is_valid() {
//!     for warning in report.warnings() {
//!         println!("Warning: {warning}");
//!     }
//! }
//! ```
//!
//! Validation never mutates data. To repair a series instead of just
//! inspecting it, use [`SeriesValidator::sanitize`].

use std::fmt;

use crate::series::{self, Sample, Series};

/// Validation result for a single check.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    /// Data is valid
    Valid,
    /// Data has minor issues (warnings)
    Warning(String),
    /// Data has serious issues (errors)
    Error(String),
}

impl ValidationLevel {
    /// Check if this result indicates valid data.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationLevel::Valid)
    }

    /// Check if this result is a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationLevel::Warning(_))
    }

    /// Check if this result is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationLevel::Error(_))
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationLevel::Valid => write!(f, "Valid"),
            ValidationLevel::Warning(msg) => write!(f, "Warning: {msg}"),
            ValidationLevel::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Aggregated validation report.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All check outcomes, in execution order
    results: Vec<(String, ValidationLevel)>,
}

impl ValidationReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check outcome.
    pub fn add(&mut self, check_name: &str, level: ValidationLevel) {
        self.results.push((check_name.to_string(), level));
    }

    /// Check if all validations passed (no errors or warnings).
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, level)| level.is_valid())
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|(_, level)| level.is_error())
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|(_, level)| level.is_warning())
    }

    /// Get all warnings.
    pub fn warnings(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|(name, level)| match level {
                ValidationLevel::Warning(msg) => Some(format!("{name}: {msg}")),
                _ => None,
            })
            .collect()
    }

    /// Get all errors.
    pub fn errors(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|(name, level)| match level {
                ValidationLevel::Error(msg) => Some(format!("{name}: {msg}")),
                _ => None,
            })
            .collect()
    }

    /// Get all check outcomes.
    pub fn all_results(&self) -> &[(String, ValidationLevel)] {
        &self.results
    }

    /// Get the number of checks performed.
    pub fn check_count(&self) -> usize {
        self.results.len()
    }

    /// Get the number of passed checks.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|(_, l)| l.is_valid()).count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.passed_count();
        let total = self.check_count();
        writeln!(f, "Validation: {passed}/{total} checks passed")?;

        for (name, level) in &self.results {
            if !level.is_valid() {
                writeln!(f, "  - {name}: {level}")?;
            }
        }

        Ok(())
    }
}

/// Configuration for series validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Earliest plausible timestamp in epoch milliseconds
    pub min_time_ms: i64,

    /// Latest plausible timestamp in epoch milliseconds
    pub max_time_ms: i64,

    /// Gap between consecutive samples that triggers a coverage warning
    pub max_gap_ms: i64,

    /// Check for NaN/Inf values
    pub check_non_finite: bool,

    /// Check that timestamps are in ascending order
    pub check_ordering: bool,

    /// Check for duplicate timestamps
    pub check_duplicates: bool,

    /// Treat an empty series as acceptable
    pub allow_empty: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_time_ms: 0,                   // Unix epoch
            max_time_ms: 4_102_444_800_000,   // 2100-01-01
            max_gap_ms: 3_600_000,            // 1 hour
            check_non_finite: true,
            check_ordering: true,
            check_duplicates: true,
            allow_empty: false,
        }
    }
}

/// Validator for telemetry series.
#[derive(Debug, Clone, Default)]
pub struct SeriesValidator {
    config: ValidationConfig,
}

impl SeriesValidator {
    /// Create a new validator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a series without modifying it.
    pub fn validate(&self, series: &Series) -> ValidationReport {
        let mut report = ValidationReport::new();

        if series.is_empty() {
            if self.config.allow_empty {
                report.add("coverage", ValidationLevel::Valid);
            } else {
                report.add(
                    "coverage",
                    ValidationLevel::Warning("Series is empty".to_string()),
                );
            }
            return report;
        }

        if self.config.check_non_finite {
            self.validate_finite_values(series, &mut report);
        }

        if self.config.check_ordering {
            self.validate_ordering(series, &mut report);
        }

        if self.config.check_duplicates {
            self.validate_duplicates(series, &mut report);
        }

        self.validate_time_range(series, &mut report);
        self.validate_gaps(series, &mut report);

        report
    }

    /// Repair a series so it satisfies every structural check.
    ///
    /// Drops samples with non-finite values or implausible timestamps,
    /// sorts the remainder by timestamp, and collapses duplicate
    /// timestamps keeping the most recently received sample.
    pub fn sanitize(&self, series: Series) -> Series {
        let before = series.len();
        let mut cleaned: Series = series
            .into_iter()
            .filter(|s| {
                s.is_finite()
                    && s.time_ms >= self.config.min_time_ms
                    && s.time_ms <= self.config.max_time_ms
            })
            .collect();

        series::sort_by_time(&mut cleaned);
        cleaned.dedup_by(|next, prev| {
            if next.time_ms == prev.time_ms {
                std::mem::swap(next, prev);
                true
            } else {
                false
            }
        });

        if cleaned.len() < before {
            log::debug!(
                "sanitize dropped {} of {} samples",
                before - cleaned.len(),
                before
            );
        }

        cleaned
    }

    /// Flag NaN and infinite values.
    fn validate_finite_values(&self, series: &Series, report: &mut ValidationReport) {
        let non_finite = series.iter().filter(|s| !s.is_finite()).count();

        if non_finite > 0 {
            let first = series
                .iter()
                .position(|s| !s.is_finite())
                .unwrap_or_default();
            report.add(
                "finite_values",
                ValidationLevel::Error(format!(
                    "{non_finite} non-finite value(s), first at index {first}"
                )),
            );
        } else {
            report.add("finite_values", ValidationLevel::Valid);
        }
    }

    /// Flag the first out-of-order timestamp pair.
    fn validate_ordering(&self, series: &Series, report: &mut ValidationReport) {
        let violation = series
            .windows(2)
            .position(|pair| pair[1].time_ms < pair[0].time_ms);

        match violation {
            Some(i) => report.add(
                "timestamp_ordering",
                ValidationLevel::Error(format!(
                    "Out-of-order timestamp at index {}: {} < {}",
                    i + 1,
                    series[i + 1].time_ms,
                    series[i].time_ms
                )),
            ),
            None => report.add("timestamp_ordering", ValidationLevel::Valid),
        }
    }

    /// Flag duplicate timestamps. Order-insensitive.
    fn validate_duplicates(&self, series: &Series, report: &mut ValidationReport) {
        let mut times: Vec<i64> = series.iter().map(|s| s.time_ms).collect();
        times.sort_unstable();
        let duplicates = times.windows(2).filter(|pair| pair[0] == pair[1]).count();

        if duplicates > 0 {
            report.add(
                "duplicate_timestamps",
                ValidationLevel::Warning(format!("{duplicates} duplicate timestamp(s)")),
            );
        } else {
            report.add("duplicate_timestamps", ValidationLevel::Valid);
        }
    }

    /// Flag timestamps outside the plausible window.
    fn validate_time_range(&self, series: &Series, report: &mut ValidationReport) {
        let out_of_range = series
            .iter()
            .filter(|s| s.time_ms < self.config.min_time_ms || s.time_ms > self.config.max_time_ms)
            .count();

        if out_of_range > 0 {
            report.add(
                "timestamp_range",
                ValidationLevel::Warning(format!(
                    "{out_of_range} timestamp(s) outside [{}, {}]",
                    self.config.min_time_ms, self.config.max_time_ms
                )),
            );
        } else {
            report.add("timestamp_range", ValidationLevel::Valid);
        }
    }

    /// Flag the largest inter-sample gap when it exceeds the limit.
    fn validate_gaps(&self, series: &Series, report: &mut ValidationReport) {
        let sorted = series::sorted_copy(series);
        let max_gap = sorted
            .windows(2)
            .map(|pair| pair[1].time_ms - pair[0].time_ms)
            .max()
            .unwrap_or(0);

        if max_gap > self.config.max_gap_ms {
            report.add(
                "coverage",
                ValidationLevel::Warning(format!(
                    "Max gap {:.1}s exceeds {:.1}s",
                    max_gap as f64 / 1e3,
                    self.config.max_gap_ms as f64 / 1e3
                )),
            );
        } else {
            report.add("coverage", ValidationLevel::Valid);
        }
    }
}

/// Validate a series with default configuration.
pub fn validate_series(series: &Series) -> ValidationReport {
    SeriesValidator::new().validate(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_series() -> Series {
        vec![
            Sample::new(1_700_000_000_000, 42.0),
            Sample::new(1_700_000_001_000, 43.5),
            Sample::new(1_700_000_002_000, 41.8),
            Sample::new(1_700_000_003_000, 44.2),
        ]
    }

    #[test]
    fn test_valid_series() {
        let validator = SeriesValidator::new();
        let report = validator.validate(&create_valid_series());

        assert!(report.is_valid());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
        assert_eq!(report.passed_count(), report.check_count());
    }

    #[test]
    fn test_non_finite_values_flagged() {
        let validator = SeriesValidator::new();
        let mut series = create_valid_series();
        series[1].value = f64::NAN;
        series[2].value = f64::INFINITY;

        let report = validator.validate(&series);

        assert!(report.has_errors());
        assert!(report.errors()[0].contains("2 non-finite"));
        assert!(report.errors()[0].contains("index 1"));
    }

    #[test]
    fn test_out_of_order_timestamps_flagged() {
        let validator = SeriesValidator::new();
        let mut series = create_valid_series();
        series.swap(1, 2);

        let report = validator.validate(&series);

        assert!(report.has_errors());
        assert!(report.errors()[0].contains("Out-of-order"));
    }

    #[test]
    fn test_duplicate_timestamps_warn() {
        let validator = SeriesValidator::new();
        let mut series = create_valid_series();
        series[2].time_ms = series[1].time_ms;

        let report = validator.validate(&series);

        assert!(report.has_warnings());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_implausible_timestamp_warns() {
        let validator = SeriesValidator::new();
        let mut series = create_valid_series();
        series[0].time_ms = -5;

        let report = validator.validate(&series);

        assert!(report.has_warnings());
        assert!(report
            .warnings()
            .iter()
            .any(|w| w.contains("timestamp_range")));
    }

    #[test]
    fn test_empty_series_warns_by_default() {
        let validator = SeriesValidator::new();
        let report = validator.validate(&Vec::new());

        assert!(report.has_warnings());
        assert_eq!(report.check_count(), 1);
    }

    #[test]
    fn test_empty_series_allowed_when_configured() {
        let validator = SeriesValidator::with_config(ValidationConfig {
            allow_empty: true,
            ..ValidationConfig::default()
        });
        let report = validator.validate(&Vec::new());

        assert!(report.is_valid());
    }

    #[test]
    fn test_gap_warning() {
        let validator = SeriesValidator::new();
        let series = vec![
            Sample::new(1_700_000_000_000, 1.0),
            // 2 hours later, past the default 1 hour limit
            Sample::new(1_700_007_200_000, 2.0),
        ];

        let report = validator.validate(&series);

        assert!(report.has_warnings());
        assert!(report.warnings().iter().any(|w| w.contains("coverage")));
    }

    #[test]
    fn test_sanitize_repairs_series() {
        let validator = SeriesValidator::new();
        let series = vec![
            Sample::new(3_000, 3.0),
            Sample::new(1_000, f64::NAN),
            Sample::new(1_000, 1.0),
            Sample::new(2_000, 2.0),
            Sample::new(-50, 9.0),
            Sample::new(1_000, 1.5), // duplicate, received later
        ];

        let cleaned = validator.sanitize(series);

        let times: Vec<i64> = cleaned.iter().map(|s| s.time_ms).collect();
        assert_eq!(times, vec![1_000, 2_000, 3_000]);
        // Keep-last semantics for the duplicated timestamp
        assert_eq!(cleaned[0].value, 1.5);
        assert!(validator.validate(&cleaned).is_valid());
    }

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new();
        report.add("test1", ValidationLevel::Valid);
        report.add("test2", ValidationLevel::Warning("minor issue".to_string()));
        report.add("test3", ValidationLevel::Error("major issue".to_string()));

        let display = format!("{report}");
        assert!(display.contains("1/3"));
        assert!(display.contains("test3"));
        assert!(!display.contains("test1:"));
    }

    #[test]
    fn test_convenience_function() {
        let report = validate_series(&create_valid_series());
        assert!(report.is_valid());
    }
}
