// ============================================================================
// Evaluation Errors
// Per-expression failures reported by the evaluator
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Category of an evaluation failure, without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    IllegalCharacter,
    NumberParseFailure,
    MissingUnaryOperand,
    UnmatchedParenthesis,
    DivisionByZero,
    MalformedExpression,
    Overflow,
    Underflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::EmptyExpression => "EmptyExpression",
            ErrorKind::IllegalCharacter => "IllegalCharacter",
            ErrorKind::NumberParseFailure => "NumberParseFailure",
            ErrorKind::MissingUnaryOperand => "MissingUnaryOperand",
            ErrorKind::UnmatchedParenthesis => "UnmatchedParenthesis",
            ErrorKind::DivisionByZero => "DivisionByZero",
            ErrorKind::MalformedExpression => "MalformedExpression",
            ErrorKind::Overflow => "Overflow",
            ErrorKind::Underflow => "Underflow",
        };
        f.write_str(name)
    }
}

/// Errors that abort a single `evaluate` call.
///
/// Positions are character offsets into the whitespace-stripped expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Nothing left after removing whitespace
    EmptyExpression,
    /// A character that is not a digit, `.`, operator, or parenthesis
    IllegalCharacter { found: char, position: usize },
    /// No number could be read at `position`
    NumberParseFailure { position: usize },
    /// A sign at `position` ends the expression
    MissingUnaryOperand { position: usize },
    /// A `)` without an opener, or a `(` that is never closed
    UnmatchedParenthesis,
    /// Right operand of `/` is zero
    DivisionByZero,
    /// Operands and operators do not combine into a single value
    MalformedExpression,
    /// A literal or result is outside the decimal range
    Overflow,
    /// A non-zero literal or result is too small to keep the working precision
    Underflow,
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::EmptyExpression => ErrorKind::EmptyExpression,
            EvalError::IllegalCharacter { .. } => ErrorKind::IllegalCharacter,
            EvalError::NumberParseFailure { .. } => ErrorKind::NumberParseFailure,
            EvalError::MissingUnaryOperand { .. } => ErrorKind::MissingUnaryOperand,
            EvalError::UnmatchedParenthesis => ErrorKind::UnmatchedParenthesis,
            EvalError::DivisionByZero => ErrorKind::DivisionByZero,
            EvalError::MalformedExpression => ErrorKind::MalformedExpression,
            EvalError::Overflow => ErrorKind::Overflow,
            EvalError::Underflow => ErrorKind::Underflow,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::EmptyExpression => write!(f, "expression is empty"),
            EvalError::IllegalCharacter { found, position } => {
                write!(f, "illegal character '{}' at position {}", found, position)
            },
            EvalError::NumberParseFailure { position } => {
                write!(f, "could not parse a number at position {}", position)
            },
            EvalError::MissingUnaryOperand { position } => write!(
                f,
                "sign at position {} must be followed by a number or parenthesis",
                position
            ),
            EvalError::UnmatchedParenthesis => write!(f, "unmatched parenthesis"),
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::MalformedExpression => write!(f, "malformed expression"),
            EvalError::Overflow => {
                write!(f, "arithmetic overflow: value exceeds the representable range")
            },
            EvalError::Underflow => write!(
                f,
                "arithmetic underflow: value too small to keep the working precision"
            ),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<NumericError> for EvalError {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::DivisionByZero => EvalError::DivisionByZero,
            NumericError::Overflow => EvalError::Overflow,
            NumericError::Underflow => EvalError::Underflow,
            // Unreachable during evaluation: precision is validated when the
            // context is built, and literal errors are mapped by the scanner
            // with their position.
            NumericError::InvalidPrecision | NumericError::InvalidInput => {
                EvalError::MalformedExpression
            },
        }
    }
}

/// Result type alias for evaluation
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(EvalError::EmptyExpression.to_string(), "expression is empty");
        assert_eq!(
            EvalError::IllegalCharacter {
                found: 'a',
                position: 2
            }
            .to_string(),
            "illegal character 'a' at position 2"
        );
        assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            EvalError::NumberParseFailure { position: 0 }.kind(),
            ErrorKind::NumberParseFailure
        );
        assert_eq!(
            EvalError::UnmatchedParenthesis.kind(),
            ErrorKind::UnmatchedParenthesis
        );
        assert_eq!(ErrorKind::MalformedExpression.to_string(), "MalformedExpression");
    }

    #[test]
    fn test_from_numeric_error() {
        assert_eq!(
            EvalError::from(NumericError::DivisionByZero),
            EvalError::DivisionByZero
        );
        assert_eq!(EvalError::from(NumericError::Overflow), EvalError::Overflow);
        assert_eq!(
            EvalError::from(NumericError::Underflow),
            EvalError::Underflow
        );
        assert_eq!(EvalError::Underflow.kind(), ErrorKind::Underflow);
    }
}
