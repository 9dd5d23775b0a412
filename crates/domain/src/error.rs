use thiserror::Error;

/// Errors raised when parsing a decimal amount into minor units.
///
/// All variants are caller errors (bad input), not transient conditions;
/// they propagate synchronously so the caller can surface a validation
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    /// Input string is not a valid signed decimal.
    #[error("invalid numeric value: {0}")]
    InvalidFormat(String),
    /// Fractional precision exceeds the target scale.
    #[error("too many decimal places: got {actual}, expected <= {max}")]
    TooManyDecimals {
        /// Fractional digits supplied.
        actual: usize,
        /// Fractional digits the scale allows.
        max: usize,
    },
    /// Magnitude does not fit in 256 bits.
    #[error("value does not fit in 256 bits: {0}")]
    ValueTooLarge(String),
}
