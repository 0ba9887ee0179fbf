// ============================================================================
// Operators
// Binary operator symbols, their precedence, and operator-stack entries
// ============================================================================

use std::fmt;

/// One of the four binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Precedence table: `+ -` bind at 1, `* /` at 2.
    #[inline]
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    /// Map an input character to its operator, if it is one.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Whether this operator may also appear as a sign (`+5`, `-x`).
    #[inline]
    pub const fn is_sign(self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An entry on the operator stack.
///
/// `OpenParen` is structural: it scopes a sub-expression and is discarded
/// when its `)` arrives, never applied to operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackEntry {
    Operator(Operator),
    OpenParen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        assert_eq!(Operator::Add.precedence(), 1);
        assert_eq!(Operator::Subtract.precedence(), 1);
        assert_eq!(Operator::Multiply.precedence(), 2);
        assert_eq!(Operator::Divide.precedence(), 2);
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
    }

    #[test]
    fn test_from_char_round_trips_symbol() {
        for c in ['+', '-', '*', '/'] {
            let op = Operator::from_char(c).unwrap();
            assert_eq!(op.symbol(), c);
            assert_eq!(op.to_string(), c.to_string());
        }
        assert_eq!(Operator::from_char('^'), None);
        assert_eq!(Operator::from_char('('), None);
    }

    #[test]
    fn test_is_sign() {
        assert!(Operator::Add.is_sign());
        assert!(Operator::Subtract.is_sign());
        assert!(!Operator::Multiply.is_sign());
        assert!(!Operator::Divide.is_sign());
    }
}
