//! Core time-series data model.
//!
//! Every transformation in this crate consumes and produces [`Series`]
//! values: flat vectors of timestamped [`Sample`]s. Timestamps are epoch
//! milliseconds, matching what telemetry collectors emit on the wire.
//!
//! Input order is never assumed. Chronology-dependent operations sort a
//! working copy by timestamp first; callers keep ownership semantics simple
//! by passing series by value through the pipeline.

use serde::{Deserialize, Serialize};

/// Arbitrary per-sample annotations (source channel, quality flags, etc.).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A single telemetry reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp in epoch milliseconds
    pub time_ms: i64,

    /// Numeric reading
    pub value: f64,

    /// Optional categorical tag (e.g. sensor channel, vehicle id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Optional annotations carried through transformations untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// A telemetry series: samples in whatever order the collector produced them.
pub type Series = Vec<Sample>;

impl Sample {
    /// Create a plain sample.
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self {
            time_ms,
            value,
            category: None,
            metadata: None,
        }
    }

    /// Attach a category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Insert a single metadata entry, creating the map if absent.
    pub fn set_meta(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value);
    }

    /// Whether the reading is usable for numeric work.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

/// Sort a series ascending by timestamp (stable, preserves ties).
pub fn sort_by_time(series: &mut Series) {
    series.sort_by_key(|s| s.time_ms);
}

/// Check whether a series is already in ascending timestamp order.
pub fn is_sorted_by_time(series: &[Sample]) -> bool {
    series.windows(2).all(|w| w[0].time_ms <= w[1].time_ms)
}

/// Extract the finite values of a series, dropping NaN and infinities.
pub fn finite_values(series: &[Sample]) -> Vec<f64> {
    series
        .iter()
        .filter(|s| s.is_finite())
        .map(|s| s.value)
        .collect()
}

/// Return a copy sorted by time, for operations that need chronology.
pub fn sorted_copy(series: &[Sample]) -> Series {
    let mut copy = series.to_vec();
    sort_by_time(&mut copy);
    copy
}

/// Timestamp span (first, last) of a time-sorted series.
pub fn time_span(sorted: &[Sample]) -> Option<(i64, i64)> {
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => Some((first.time_ms, last.time_ms)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(values: &[(i64, f64)]) -> Series {
        values.iter().map(|&(t, v)| Sample::new(t, v)).collect()
    }

    #[test]
    fn test_sample_builders() {
        let mut sample = Sample::new(1_000, 42.5).with_category("engine_temp");
        assert_eq!(sample.time_ms, 1_000);
        assert_eq!(sample.value, 42.5);
        assert_eq!(sample.category.as_deref(), Some("engine_temp"));
        assert!(sample.metadata.is_none());

        sample.set_meta("interpolated", serde_json::Value::Bool(true));
        let meta = sample.metadata.as_ref().unwrap();
        assert_eq!(meta.get("interpolated"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_sort_by_time_is_stable() {
        let mut series = series_of(&[(300, 3.0), (100, 1.0), (300, 4.0), (200, 2.0)]);
        sort_by_time(&mut series);

        let times: Vec<i64> = series.iter().map(|s| s.time_ms).collect();
        assert_eq!(times, vec![100, 200, 300, 300]);
        // Ties keep input order
        assert_eq!(series[2].value, 3.0);
        assert_eq!(series[3].value, 4.0);
    }

    #[test]
    fn test_finite_values_filters_nan_and_inf() {
        let series = series_of(&[
            (1, 1.0),
            (2, f64::NAN),
            (3, 3.0),
            (4, f64::INFINITY),
            (5, f64::NEG_INFINITY),
        ]);
        assert_eq!(finite_values(&series), vec![1.0, 3.0]);
    }

    #[test]
    fn test_is_sorted_by_time() {
        assert!(is_sorted_by_time(&series_of(&[(1, 0.0), (2, 0.0), (2, 0.0)])));
        assert!(!is_sorted_by_time(&series_of(&[(2, 0.0), (1, 0.0)])));
        assert!(is_sorted_by_time(&[]));
    }

    #[test]
    fn test_time_span() {
        let series = series_of(&[(100, 0.0), (500, 0.0), (900, 0.0)]);
        assert_eq!(time_span(&series), Some((100, 900)));
        assert_eq!(time_span(&[]), None);
    }

    #[test]
    fn test_sample_serde_round_trip() {
        let sample = Sample::new(1_700_000_000_000, 98.6).with_category("coolant");
        let json = serde_json::to_string(&sample).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
        // Absent optionals stay off the wire
        assert!(!json.contains("metadata"));
    }
}
