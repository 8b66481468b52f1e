//! Adaptive Scale Selection
//!
//! Picks a scale kind from the data instead of asking the caller to
//! know one up front. Inference looks at value shape first and numeric
//! spread second:
//!
//! ```text
//! any category present          → band
//! any timestamp present         → time
//! positive values spanning more
//!   than the decade threshold   → log
//! otherwise                     → linear
//! ```
//!
//! [`create_adaptive_scale`] goes one step further for numeric data: it
//! computes the domain from the values, applies zero-anchoring or
//! symmetry when asked, widens degenerate extents, and returns a ready
//! [`Scale`].
//!
//! # Example
//!
//! ```
//! use telemetry_charts::scale::{infer_scale_kind, DomainValue, ScaleKind};
//!
//! let mixed = vec![
//!     DomainValue::Number(3.5),
//!     DomainValue::Category("api-server".to_string()),
//! ];
//! assert_eq!(infer_scale_kind(&mixed, 3.0), ScaleKind::Band);
//! ```

use crate::error::{ChartError, Result};
use crate::scale::continuous::{LinearScale, LogScale};
use crate::scale::{Scale, ScaleKind};

/// A raw domain value before a scale kind has been chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    Number(f64),
    /// Epoch milliseconds.
    Time(i64),
    Category(String),
}

impl From<f64> for DomainValue {
    fn from(value: f64) -> Self {
        DomainValue::Number(value)
    }
}

impl From<i64> for DomainValue {
    fn from(time_ms: i64) -> Self {
        DomainValue::Time(time_ms)
    }
}

impl From<&str> for DomainValue {
    fn from(category: &str) -> Self {
        DomainValue::Category(category.to_string())
    }
}

/// Tuning knobs for [`create_adaptive_scale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveScaleOptions {
    /// Extend the domain to include zero (bar-chart convention).
    pub force_zero: bool,
    /// Center the domain on zero with equal spread both ways.
    pub symmetric: bool,
    /// Decades of spread beyond which positive data switches to log.
    pub log_threshold_decades: f64,
}

impl Default for AdaptiveScaleOptions {
    fn default() -> Self {
        Self {
            force_zero: false,
            symmetric: false,
            log_threshold_decades: 3.0,
        }
    }
}

/// Infer the scale kind that fits a set of domain values.
///
/// Categories dominate timestamps, timestamps dominate numbers. Pure
/// numeric data picks log only when every value is strictly positive
/// and the spread exceeds `log_threshold_decades`. Empty input falls
/// back to linear.
pub fn infer_scale_kind(values: &[DomainValue], log_threshold_decades: f64) -> ScaleKind {
    if values.iter().any(|v| matches!(v, DomainValue::Category(_))) {
        return ScaleKind::Band;
    }
    if values.iter().any(|v| matches!(v, DomainValue::Time(_))) {
        return ScaleKind::Time;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for v in values {
        if let DomainValue::Number(n) = v {
            if n.is_finite() {
                any = true;
                min = min.min(*n);
                max = max.max(*n);
            }
        }
    }
    if !any {
        return ScaleKind::Linear;
    }

    if min > 0.0 && (max / min).log10() > log_threshold_decades {
        ScaleKind::Log
    } else {
        ScaleKind::Linear
    }
}

/// Build a continuous scale whose domain is computed from the values.
///
/// The returned scale is niced and unclamped. Symmetry wins over
/// zero-anchoring when both are set; either one rules out the log
/// switch since log domains cannot touch zero.
///
/// # Errors
///
/// [`ChartError::InvalidDomain`] when no finite value is present.
pub fn create_adaptive_scale(
    values: &[f64],
    range: [f64; 2],
    options: AdaptiveScaleOptions,
) -> Result<Scale> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if lo > hi {
        return Err(ChartError::invalid_domain(
            "cannot derive a domain: no finite values",
        ));
    }

    if options.symmetric {
        let m = lo.abs().max(hi.abs());
        let m = if m == 0.0 { 1.0 } else { m };
        let scale = LinearScale::new([-m, m], range, true, false)?;
        return Ok(Scale::Linear(scale));
    }

    if options.force_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }

    if lo == hi {
        let pad = (lo.abs() * 0.1).max(1.0);
        lo -= pad;
        hi += pad;
    }

    let use_log = !options.force_zero
        && lo > 0.0
        && (hi / lo).log10() > options.log_threshold_decades;

    if use_log {
        Ok(Scale::Log(LogScale::new([lo, hi], range, true, false)?))
    } else {
        Ok(Scale::Linear(LinearScale::new([lo, hi], range, true, false)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_infer_band() {
        let values = vec![
            DomainValue::from(1.0),
            DomainValue::from("web"),
            DomainValue::from(1_700_000_000_000i64),
        ];
        assert_eq!(infer_scale_kind(&values, 3.0), ScaleKind::Band);
    }

    #[test]
    fn test_timestamps_infer_time() {
        let values = vec![
            DomainValue::from(1_700_000_000_000i64),
            DomainValue::from(42.0),
        ];
        assert_eq!(infer_scale_kind(&values, 3.0), ScaleKind::Time);
    }

    #[test]
    fn test_wide_positive_spread_infers_log() {
        let values: Vec<DomainValue> =
            [1.0, 35.0, 8_000.0, 500_000.0].iter().map(|&v| v.into()).collect();
        assert_eq!(infer_scale_kind(&values, 3.0), ScaleKind::Log);
    }

    #[test]
    fn test_narrow_or_signed_spread_infers_linear() {
        let narrow: Vec<DomainValue> = [10.0, 55.0, 90.0].iter().map(|&v| v.into()).collect();
        assert_eq!(infer_scale_kind(&narrow, 3.0), ScaleKind::Linear);

        // A zero rules out log no matter the spread
        let signed: Vec<DomainValue> =
            [0.0, 35.0, 500_000.0].iter().map(|&v| v.into()).collect();
        assert_eq!(infer_scale_kind(&signed, 3.0), ScaleKind::Linear);
    }

    #[test]
    fn test_empty_input_infers_linear() {
        assert_eq!(infer_scale_kind(&[], 3.0), ScaleKind::Linear);
    }

    #[test]
    fn test_adaptive_linear_from_values() {
        let scale = create_adaptive_scale(
            &[12.0, 47.0, 89.0],
            [0.0, 100.0],
            AdaptiveScaleOptions::default(),
        )
        .unwrap();
        assert_eq!(scale.kind(), ScaleKind::Linear);
        // Niced domain covers the raw extent
        match &scale {
            Scale::Linear(linear) => {
                let (lo, hi) = linear.domain();
                assert!(lo <= 12.0 && hi >= 89.0);
            }
            other => panic!("expected linear scale, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_adaptive_switches_to_log_for_wide_spread() {
        let scale = create_adaptive_scale(
            &[0.002, 1.5, 4_800.0],
            [0.0, 1.0],
            AdaptiveScaleOptions::default(),
        )
        .unwrap();
        assert_eq!(scale.kind(), ScaleKind::Log);
    }

    #[test]
    fn test_force_zero_anchors_domain() {
        let options = AdaptiveScaleOptions {
            force_zero: true,
            ..AdaptiveScaleOptions::default()
        };
        let scale = create_adaptive_scale(&[40.0, 90.0], [0.0, 100.0], options).unwrap();
        match &scale {
            Scale::Linear(linear) => assert_eq!(linear.domain().0, 0.0),
            other => panic!("expected linear scale, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_symmetric_centers_on_zero() {
        let options = AdaptiveScaleOptions {
            symmetric: true,
            ..AdaptiveScaleOptions::default()
        };
        let scale = create_adaptive_scale(&[-3.0, 7.0], [0.0, 100.0], options).unwrap();
        match &scale {
            Scale::Linear(linear) => {
                let (lo, hi) = linear.domain();
                assert_eq!(lo, -hi);
                assert!(hi >= 7.0);
            }
            other => panic!("expected linear scale, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_constant_values_widen_domain() {
        let scale = create_adaptive_scale(
            &[5.0, 5.0, 5.0],
            [0.0, 100.0],
            AdaptiveScaleOptions::default(),
        )
        .unwrap();
        match &scale {
            Scale::Linear(linear) => {
                let (lo, hi) = linear.domain();
                assert!(lo < 5.0 && hi > 5.0);
            }
            other => panic!("expected linear scale, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_no_finite_values_is_an_error() {
        let err = create_adaptive_scale(
            &[f64::NAN, f64::INFINITY],
            [0.0, 1.0],
            AdaptiveScaleOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InvalidDomain(_)));
    }
}
