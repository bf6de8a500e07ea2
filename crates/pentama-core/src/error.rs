//! # Errors
//!
//! The progress engine itself is total and has no error type. Errors only
//! arise at the serialization seam (session tokens, snapshot input).

use thiserror::Error;

/// Failure to encode or decode a session token.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("session token is too short ({0} bytes)")]
    Truncated(usize),
    #[error("session token has an invalid header")]
    BadMagic,
    #[error("unsupported session token version {0}")]
    UnsupportedVersion(u8),
    #[error(transparent)]
    Codec(#[from] postcard::Error),
}

/// A stored percentage above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("percentage {0} is out of range (0..=100)")]
pub struct PercentageOutOfRange(pub u8);
