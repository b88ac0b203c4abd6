//! Error types for the crypto primitives.

use thiserror::Error;

/// Primitive-layer errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A point failed the curve-membership check.
    #[error("point ({0}, {1}) is not on the curve")]
    PointNotOnCurve(String, String),

    /// Affine coordinates were requested for the point at infinity.
    #[error("point at infinity has no affine coordinates")]
    PointAtInfinity,

    /// The random source kept producing out-of-range scalars.
    #[error("scalar sampling exceeded {0} redraws")]
    SamplingExhausted(usize),
}

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
