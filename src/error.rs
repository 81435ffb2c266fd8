use thiserror::Error;

/// Top-level error type for surface measurement.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by polygon capture operations.
///
/// A tap on a different surface is not an error; see
/// [`AnchorSequence::try_add`](crate::capture::AnchorSequence::try_add).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("insufficient vertices: {count} captured, at least {required} required")]
    InsufficientVertices { count: usize, required: usize },
}

/// Errors related to capture configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Convenience type alias for results using [`MeasureError`].
pub type Result<T> = std::result::Result<T, MeasureError>;
