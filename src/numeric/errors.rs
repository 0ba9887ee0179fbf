// ============================================================================
// Numeric Errors
// Error types for precision-bounded decimal arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur inside a [`PrecisionContext`](super::PrecisionContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result magnitude exceeded what the decimal backend can represent
    Overflow,
    /// Non-zero result too small to keep the working precision
    Underflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Input string is not a decimal literal
    InvalidInput,
    /// Requested precision is outside the supported range
    InvalidPrecision,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeds the representable range")
            },
            NumericError::Underflow => write!(
                f,
                "arithmetic underflow: result too small to keep the working precision"
            ),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::InvalidPrecision => write!(
                f,
                "invalid precision: significant digits must be between 1 and 28"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::Overflow.to_string(),
            "arithmetic overflow: result exceeds the representable range"
        );
        assert_eq!(NumericError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::Overflow, NumericError::Overflow);
        assert_ne!(NumericError::Overflow, NumericError::Underflow);
    }
}
