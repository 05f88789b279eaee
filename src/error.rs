use thiserror::Error;

/// Top-level error type for fork generation.
#[derive(Debug, Error)]
pub enum TubeForkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while validating fork parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("{parameter} must be positive, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },

    #[error("{parameter} must not be negative, got {value}")]
    Negative { parameter: &'static str, value: f64 },

    #[error(
        "branch length {branch_length} is shorter than two sample spacings ({sample_spacing} each)"
    )]
    BranchTooShort {
        branch_length: f64,
        sample_spacing: f64,
    },

    #[error("{parameter} = {value} does not fit in half the branch length ({half_length})")]
    ExceedsHalfBranch {
        parameter: &'static str,
        value: f64,
        half_length: f64,
    },

    #[error("{parameter} must be at least {min}, got {value}")]
    TooFew {
        parameter: &'static str,
        value: usize,
        min: usize,
    },

    #[error("{parameter} must be at least 1.0, got {value}")]
    ShrinkingFlare { parameter: &'static str, value: f64 },

    #[error("both branches lie on the same lateral side ({0:?})")]
    SameLateralSide(crate::fork::LateralSide),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to mesh generation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`TubeForkError`].
pub type Result<T> = std::result::Result<T, TubeForkError>;
