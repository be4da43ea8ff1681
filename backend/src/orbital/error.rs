//! Error types for the orbital engine.

/// Result type for orbital computations
pub type OrbitalResult<T> = Result<T, OrbitalError>;

/// Error type for orbital computations.
///
/// Every failure is deterministic: the same inputs always produce the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitalError {
    /// Orbital elements do not describe a closed orbit (e >= 1, non-positive axis or period).
    #[error("Invalid orbit: {0}")]
    InvalidOrbit(String),

    /// Vis-viva term `2/r - 1/a` is not positive.
    #[error("Non-elliptical orbit: {0}")]
    NonEllipticalOrbit(String),

    /// Simulation end date is not after its start date.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Simulation range exceeds the allowed span.
    #[error("Range too large: {0}")]
    RangeTooLarge(String),

    /// Simulation time step is zero, negative, or too large.
    #[error("Invalid step: {0}")]
    InvalidStep(String),

    /// Kepler solver parameters outside the supported bounds.
    #[error("Invalid solver: {0}")]
    InvalidSolver(String),

    /// Timestamp is NaN or infinite.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Orbit path resolution outside the supported bounds.
    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    /// Simulation would produce more frames than allowed.
    #[error("Too many frames: {0}")]
    TooManyFrames(String),

    /// Unknown body identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Simulation was cancelled before completion.
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl OrbitalError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidOrbit(_) => "INVALID_ORBIT",
            Self::NonEllipticalOrbit(_) => "NON_ELLIPTICAL_ORBIT",
            Self::InvalidRange(_) => "INVALID_RANGE",
            Self::RangeTooLarge(_) => "RANGE_TOO_LARGE",
            Self::InvalidStep(_) => "INVALID_STEP",
            Self::InvalidSolver(_) => "INVALID_SOLVER",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            Self::InvalidResolution(_) => "INVALID_RESOLUTION",
            Self::TooManyFrames(_) => "TOO_MANY_FRAMES",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Cancelled(_) => "CANCELLED",
        }
    }

    /// Whether the error comes from a caller-supplied parameter.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange(_)
                | Self::RangeTooLarge(_)
                | Self::InvalidStep(_)
                | Self::InvalidSolver(_)
                | Self::InvalidTimestamp(_)
                | Self::InvalidResolution(_)
                | Self::TooManyFrames(_)
        )
    }

    pub(crate) fn not_found_body(body_id: &str) -> Self {
        Self::NotFound(format!("Planet '{}' not found", body_id))
    }
}
