// ============================================================================
// Result Formatting
// ============================================================================

use rust_decimal::Decimal;

/// Render a result for display: trailing zeros stripped, `-0` shown as `0`,
/// plain (never exponential) notation.
///
/// # Example
/// ```
/// use decimal_calc::numeric::format_plain;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_plain(Decimal::new(250, 2)), "2.5");
/// assert_eq!(format_plain(Decimal::new(20, 1)), "2");
/// ```
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}
