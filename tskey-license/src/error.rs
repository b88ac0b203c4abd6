//! Error types for the licensing protocol.
//!
//! Validation failure is deliberately absent: "this key is not valid" is an
//! expected outcome and is reported as a boolean, never as an error.

use thiserror::Error;

/// Licensing protocol errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Product identifier is too short or its numeric segment is unparsable.
    #[error("invalid product identifier: {0}")]
    InvalidIdentifier(String),

    /// Key string has the wrong shape or an out-of-alphabet character.
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Pack metadata is out of bounds or does not fit the packed field.
    #[error("invalid pack parameters: {0}")]
    InvalidPackParams(String),

    /// Channel selector string does not parse.
    #[error("invalid channel selector: {0}")]
    InvalidChannelSelector(String),

    /// No attempt produced an acceptable signature within the ceiling.
    #[error("no acceptable signature after {0} attempts")]
    GenerationExhausted(usize),

    /// Curve parameters failed validation at load time. Fatal for the
    /// affected key class.
    #[error("curve initialization failed: {0}")]
    CurveInitialization(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
