// ============================================================================
// Scanner
// Whitespace normalization, number scanning, and sign classification
// ============================================================================

use super::error::{EvalError, EvalResult};
use crate::domain::Operator;
use crate::numeric::{NumericError, PrecisionContext};
use rust_decimal::Decimal;

/// Strip every whitespace character, keeping the rest in order.
///
/// # Errors
/// Returns `EmptyExpression` if nothing remains.
pub fn normalize(expression: &str) -> EvalResult<Vec<char>> {
    let normalized: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
    if normalized.is_empty() {
        return Err(EvalError::EmptyExpression);
    }
    Ok(normalized)
}

/// Read the maximal run of ASCII digits with at most one `.` starting at
/// `start`.
///
/// A second `.` ends the run without error; whatever follows is left for
/// the caller. Returns the value, rounded to `context`, and the offset just
/// past the run.
///
/// # Errors
/// - `NumberParseFailure` if the run is empty or holds no digit
/// - `Overflow` if the literal is out of range
/// - `Underflow` if its kept digits lie past the 28th decimal place
pub fn parse_number(
    input: &[char],
    start: usize,
    context: &PrecisionContext,
) -> EvalResult<(Decimal, usize)> {
    let mut index = start;
    let mut has_dot = false;

    while let Some(&current) = input.get(index) {
        match current {
            '0'..='9' => index += 1,
            '.' if !has_dot => {
                has_dot = true;
                index += 1;
            },
            _ => break,
        }
    }

    if index == start {
        return Err(EvalError::NumberParseFailure { position: start });
    }

    let literal: String = input[start..index].iter().collect();
    let value = context.parse(&literal).map_err(|err| match err {
        NumericError::Overflow => EvalError::Overflow,
        NumericError::Underflow => EvalError::Underflow,
        _ => EvalError::NumberParseFailure { position: start },
    })?;

    Ok((value, index))
}

/// Whether the `+`/`-` at `index` is a sign rather than a binary operator.
///
/// It is a sign at the start of the input, right after `(`, or right after
/// another operator. Any other character at `index` yields `false`.
pub fn is_unary_context(input: &[char], index: usize) -> bool {
    match input.get(index).copied().and_then(Operator::from_char) {
        Some(operator) if operator.is_sign() => {},
        _ => return false,
    }

    match index.checked_sub(1).map(|prev| input[prev]) {
        None => true,
        Some('(') => true,
        Some(prev) => Operator::from_char(prev).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_strips_whitespace() {
        assert_eq!(normalize(" 2 +\t3\n").unwrap(), chars("2+3"));
        assert_eq!(normalize("(1)").unwrap(), chars("(1)"));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), Err(EvalError::EmptyExpression));
        assert_eq!(normalize("   \t "), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn test_parse_number_integer_and_decimal() {
        let ctx = PrecisionContext::DECIMAL64;

        let input = chars("123+4");
        assert_eq!(parse_number(&input, 0, &ctx).unwrap(), (dec("123"), 3));

        let input = chars("2*3.75)");
        assert_eq!(parse_number(&input, 2, &ctx).unwrap(), (dec("3.75"), 6));

        let input = chars(".5");
        assert_eq!(parse_number(&input, 0, &ctx).unwrap(), (dec("0.5"), 2));
    }

    #[test]
    fn test_parse_number_stops_at_second_dot() {
        let ctx = PrecisionContext::DECIMAL64;
        let input = chars("1.2.3");
        assert_eq!(parse_number(&input, 0, &ctx).unwrap(), (dec("1.2"), 3));
    }

    #[test]
    fn test_parse_number_failures() {
        let ctx = PrecisionContext::DECIMAL64;

        let input = chars("+");
        assert_eq!(
            parse_number(&input, 0, &ctx),
            Err(EvalError::NumberParseFailure { position: 0 })
        );

        // Past the end
        assert_eq!(
            parse_number(&input, 1, &ctx),
            Err(EvalError::NumberParseFailure { position: 1 })
        );

        let input = chars(".+1");
        assert_eq!(
            parse_number(&input, 0, &ctx),
            Err(EvalError::NumberParseFailure { position: 0 })
        );
    }

    #[test]
    fn test_unary_context() {
        let input = chars("-2*-3+(+4)-5");
        assert!(is_unary_context(&input, 0));
        assert!(is_unary_context(&input, 3));
        assert!(!is_unary_context(&input, 5));
        assert!(is_unary_context(&input, 7));
        assert!(!is_unary_context(&input, 10));
    }

    #[test]
    fn test_unary_context_ignores_non_signs() {
        let input = chars("*2/3");
        assert!(!is_unary_context(&input, 0));
        assert!(!is_unary_context(&input, 2));
        assert!(!is_unary_context(&input, 99));
    }
}
