//! Error taxonomy.
//!
//! Everything here is fatal for a single-shot generation tool: the affected
//! worker (or the whole process, for configuration errors) stops and the
//! diagnostic is surfaced by the top-level handler in `main`.

use thiserror::Error;

/// Failures inside the Base58Check encoder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// A base-58 division remainder did not fit a digit index. This can only
    /// happen if the big-integer state is corrupted.
    #[error("base58 division produced an out-of-range remainder")]
    DigitOutOfRange,

    /// The checksum contributed leading zero bytes beyond those of the
    /// payload. The numeric conversion would swallow them and no decoder
    /// could recover the original length, so the result would be a
    /// malformed address indistinguishable from a valid shorter one.
    #[error("checksummed payload has unrecoverable leading zero bytes")]
    LeadingZeroAmbiguity,
}

/// Failures in elliptic-curve key derivation.
#[derive(Debug, Error)]
pub enum CurveError {
    /// The secret scalar was rejected by the curve library (zero or not
    /// below the group order).
    #[error("invalid secret scalar: {0}")]
    InvalidScalar(#[source] secp256k1::Error),

    /// An affine coordinate does not fit in 32 bytes.
    #[error("public key {axis} coordinate is {len} bytes, expected at most 32")]
    CoordinateTooLong { axis: char, len: usize },
}

/// Invalid user configuration, rejected before any worker starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pattern cannot be empty")]
    EmptyPattern,

    /// Lists every offending character so the user can fix the pattern in
    /// one pass. Note that `0`, `O`, `I` and `l` are not base58 symbols.
    #[error("pattern contains characters outside the base58 alphabet: {0}")]
    InvalidPatternChars(String),

    #[error("pattern cannot be longer than {max} characters")]
    PatternTooLong { max: usize },
}

/// The secure random source was unavailable.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("random source unavailable: {0}")]
    Rng(#[from] rand::Error),
}

/// Top-level error for the CLI handler.
#[derive(Debug, Error)]
pub enum Error {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("curve error: {0}")]
    Curve(#[from] CurveError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),
}
