//! Error types for chart data processing.
//!
//! Most operations in this crate tolerate bad data: malformed samples are
//! filtered, underpopulated windows fall back, and a failing pipeline step
//! is logged and skipped. The errors here cover the cases that cannot be
//! papered over, such as a logarithmic scale asked to span zero.

use thiserror::Error;

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Error types for transformation and scale construction
#[derive(Debug, Error)]
pub enum ChartError {
    /// Scale domain is unusable for the requested scale kind
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Scale kind or interpolator name is not recognized
    #[error("Unsupported scale kind: {0}")]
    UnsupportedScaleKind(String),

    /// Not enough data points to evaluate a dynamic threshold
    #[error("Insufficient data: need {needed} points, have {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A pipeline step failed; callers see this only through step reports
    #[error("Transform step '{step}' failed: {message}")]
    TransformStep { step: String, message: String },

    /// Degenerate operation parameter (zero budget, non-positive window)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Underlying I/O failure when persisting or loading configurations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// Shorthand for an invalid-domain error.
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        ChartError::InvalidDomain(msg.into())
    }

    /// Shorthand for an unsupported-kind error.
    pub fn unsupported_kind(msg: impl Into<String>) -> Self {
        ChartError::UnsupportedScaleKind(msg.into())
    }

    /// Shorthand for an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ChartError::InvalidArgument(msg.into())
    }

    /// Wrap a step failure with the step's name for fault reports.
    pub fn transform_step(step: impl Into<String>, source: &ChartError) -> Self {
        ChartError::TransformStep {
            step: step.into(),
            message: source.to_string(),
        }
    }

    /// True for conditions the pipeline recovers from rather than aborts on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ChartError::InsufficientData { .. } | ChartError::TransformStep { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::invalid_domain("log scale requires positive bounds, got [0, 10]");
        assert_eq!(
            err.to_string(),
            "Invalid domain: log scale requires positive bounds, got [0, 10]"
        );

        let err = ChartError::InsufficientData {
            needed: 50,
            available: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: need 50 points, have 10"
        );
    }

    #[test]
    fn test_transform_step_wrapping() {
        let inner = ChartError::invalid_argument("max_points must be > 0");
        let wrapped = ChartError::transform_step("decimate", &inner);
        assert_eq!(
            wrapped.to_string(),
            "Transform step 'decimate' failed: Invalid argument: max_points must be > 0"
        );
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(ChartError::InsufficientData {
            needed: 50,
            available: 0
        }
        .is_recoverable());
        assert!(!ChartError::invalid_domain("empty").is_recoverable());
    }
}
