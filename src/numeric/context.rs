// ============================================================================
// Precision Context
// Significant-digit bounded decimal arithmetic on top of rust_decimal
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Largest significant-digit budget the decimal backend can honour.
pub const MAX_PRECISION: u32 = 28;

/// How a result is rounded once it exceeds the working precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round to nearest, ties to the even neighbour (banker's rounding)
    #[default]
    HalfEven,
    /// Round to nearest, ties away from zero
    HalfUp,
    /// Round to nearest, ties toward zero
    HalfDown,
    /// Truncate toward zero
    Down,
    /// Round away from zero
    Up,
    /// Round toward negative infinity
    Floor,
    /// Round toward positive infinity
    Ceiling,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::HalfEven => "half-even",
            RoundingMode::HalfUp => "half-up",
            RoundingMode::HalfDown => "half-down",
            RoundingMode::Down => "down",
            RoundingMode::Up => "up",
            RoundingMode::Floor => "floor",
            RoundingMode::Ceiling => "ceiling",
        };
        f.write_str(name)
    }
}

impl FromStr for RoundingMode {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-even" | "half_even" => Ok(RoundingMode::HalfEven),
            "half-up" | "half_up" => Ok(RoundingMode::HalfUp),
            "half-down" | "half_down" => Ok(RoundingMode::HalfDown),
            "down" => Ok(RoundingMode::Down),
            "up" => Ok(RoundingMode::Up),
            "floor" => Ok(RoundingMode::Floor),
            "ceiling" => Ok(RoundingMode::Ceiling),
            _ => Err(NumericError::InvalidInput),
        }
    }
}

/// Working precision for a single evaluation: a significant-digit budget
/// plus a rounding mode.
///
/// Every literal parsed through the context and every arithmetic result it
/// produces is rounded to `digits` significant digits before it is returned.
///
/// # Example
/// ```
/// use decimal_calc::numeric::PrecisionContext;
/// use rust_decimal::Decimal;
///
/// let ctx = PrecisionContext::DECIMAL64;
/// let third = ctx.div(Decimal::ONE, Decimal::from(3)).unwrap();
/// assert_eq!(third.to_string(), "0.3333333333333333");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrecisionContext {
    digits: u32,
    rounding: RoundingMode,
}

impl PrecisionContext {
    /// 7 significant digits, half-even
    pub const DECIMAL32: Self = Self {
        digits: 7,
        rounding: RoundingMode::HalfEven,
    };

    /// 16 significant digits, half-even
    pub const DECIMAL64: Self = Self {
        digits: 16,
        rounding: RoundingMode::HalfEven,
    };

    /// The widest budget the backend supports, half-even
    pub const EXTENDED: Self = Self {
        digits: MAX_PRECISION,
        rounding: RoundingMode::HalfEven,
    };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a context with the given significant-digit budget.
    ///
    /// # Errors
    /// Returns `InvalidPrecision` unless `1 <= digits <= MAX_PRECISION`.
    pub fn new(digits: u32, rounding: RoundingMode) -> NumericResult<Self> {
        if digits == 0 || digits > MAX_PRECISION {
            return Err(NumericError::InvalidPrecision);
        }
        Ok(Self { digits, rounding })
    }

    #[inline]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    #[inline]
    pub const fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    // ========================================================================
    // Rounding and Parsing
    // ========================================================================

    /// Round `value` to the working precision.
    ///
    /// The result is normalized: trailing zeros are dropped, so `2` stays
    /// `2` rather than being padded out to the full digit budget.
    ///
    /// # Errors
    /// Returns `Overflow` if rounding carries past the backend's range.
    #[inline]
    pub fn round(&self, value: Decimal) -> NumericResult<Decimal> {
        let value = value.normalize();
        if significant_digits(value) <= self.digits {
            return Ok(value);
        }
        value
            .round_sf_with_strategy(self.digits, self.rounding.strategy())
            .map(|rounded| rounded.normalize())
            .ok_or(NumericError::Overflow)
    }

    /// Parse an unsigned decimal literal (digits with at most one `.`).
    ///
    /// A leading or trailing point is accepted: `".5"` and `"5."` are both
    /// valid. The literal must contain at least one digit.
    ///
    /// # Errors
    /// - `InvalidInput` if the text is not such a literal
    /// - `Overflow` if it is too large for the backend
    /// - `Underflow` if the digits to keep lie past the 28th decimal place
    pub fn parse(&self, literal: &str) -> NumericResult<Decimal> {
        let mut seen_point = false;
        let mut seen_digit = false;
        for c in literal.chars() {
            match c {
                '0'..='9' => seen_digit = true,
                '.' if !seen_point => seen_point = true,
                _ => return Err(NumericError::InvalidInput),
            }
        }
        if !seen_digit {
            return Err(NumericError::InvalidInput);
        }

        let trimmed = literal.strip_suffix('.').unwrap_or(literal);
        let canonical = if trimmed.starts_with('.') {
            format!("0{}", trimmed)
        } else {
            trimmed.to_string()
        };

        if let Some((integer, fraction)) = canonical.split_once('.') {
            self.check_fraction_fits(integer, fraction)?;
        }

        let value = Decimal::from_str(&canonical).map_err(|_| NumericError::Overflow)?;
        self.round(value)
    }

    /// A literal below one whose kept digits would need more than
    /// `MAX_SCALE` decimal places cannot be stored.
    fn check_fraction_fits(&self, integer: &str, fraction: &str) -> NumericResult<()> {
        if integer.bytes().any(|b| b != b'0') {
            return Ok(());
        }
        let Some(first) = fraction.bytes().position(|b| b != b'0') else {
            return Ok(());
        };
        let last = fraction.bytes().rposition(|b| b != b'0').unwrap_or(first);

        let kept = ((last - first + 1) as u32).min(self.digits);
        if first as u32 + kept > MAX_SCALE {
            return Err(NumericError::Underflow);
        }
        Ok(())
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Addition rounded to the working precision.
    ///
    /// Sums of in-range operands are exact in the backend, so addition never
    /// underflows.
    #[inline]
    pub fn add(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        let sum = lhs.checked_add(rhs).ok_or(NumericError::Overflow)?;
        self.round(sum)
    }

    /// Subtraction rounded to the working precision.
    #[inline]
    pub fn sub(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        let difference = lhs.checked_sub(rhs).ok_or(NumericError::Overflow)?;
        self.round(difference)
    }

    /// Multiplication rounded to the working precision.
    ///
    /// # Errors
    /// Returns `Overflow` when the product is out of range, `Underflow`
    /// when it is too small to keep the working precision.
    #[inline]
    pub fn mul(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        let product = lhs.checked_mul(rhs).ok_or(NumericError::Overflow)?;
        if product.is_zero() && !lhs.is_zero() && !rhs.is_zero() {
            return Err(NumericError::Underflow);
        }
        self.guard_truncation(product, || exact_product_scale(lhs, rhs) <= MAX_SCALE)?;
        self.round(product)
    }

    /// Division rounded to the working precision.
    ///
    /// The backend computes the quotient to its full 28 digits first, so a
    /// recurring expansion such as 1/3 ends up as a bounded approximation.
    ///
    /// # Errors
    /// Returns `DivisionByZero` when `rhs` is zero, `Overflow` when the
    /// quotient is out of range, `Underflow` when it is too small to keep
    /// the working precision.
    #[inline]
    pub fn div(&self, lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let quotient = lhs.checked_div(rhs).ok_or(NumericError::Overflow)?;
        if quotient.is_zero() && !lhs.is_zero() {
            return Err(NumericError::Underflow);
        }
        self.guard_truncation(quotient, || {
            exact_product_scale(quotient, rhs) <= MAX_SCALE
                && quotient.checked_mul(rhs) == Some(lhs)
        })?;
        self.round(quotient)
    }

    /// Reject a raw backend result that sits at the 28-place cap with fewer
    /// significant digits than the working precision, unless it is exact.
    fn guard_truncation(&self, raw: Decimal, is_exact: impl FnOnce() -> bool) -> NumericResult<()> {
        if raw.scale() < MAX_SCALE || significant_digits(raw.normalize()) >= self.digits {
            return Ok(());
        }
        if is_exact() {
            Ok(())
        } else {
            Err(NumericError::Underflow)
        }
    }
}

// ============================================================================
// Digit Helpers
// ============================================================================

/// Decimal places the backend can hold
const MAX_SCALE: u32 = 28;

/// Number of digits in the mantissa (0 for zero).
fn significant_digits(value: Decimal) -> u32 {
    let mut mantissa = value.mantissa().unsigned_abs();
    let mut count = 0;
    while mantissa > 0 {
        mantissa /= 10;
        count += 1;
    }
    count
}

/// How many times `factor` divides `n` (0 for zero).
fn multiplicity(mut n: u128, factor: u128) -> u32 {
    if n == 0 {
        return 0;
    }
    let mut count = 0;
    while n % factor == 0 {
        n /= factor;
        count += 1;
    }
    count
}

/// Scale of the exact product `lhs * rhs` with trailing zeros removed.
///
/// Trailing zeros of a product come from paired factors of 2 and 5, so the
/// count is known without forming the (possibly 192-bit) product.
fn exact_product_scale(lhs: Decimal, rhs: Decimal) -> u32 {
    let a = lhs.mantissa().unsigned_abs();
    let b = rhs.mantissa().unsigned_abs();
    let twos = multiplicity(a, 2) + multiplicity(b, 2);
    let fives = multiplicity(a, 5) + multiplicity(b, 5);
    (lhs.scale() + rhs.scale()).saturating_sub(twos.min(fives))
}

impl Default for PrecisionContext {
    fn default() -> Self {
        Self::DECIMAL64
    }
}

impl fmt::Display for PrecisionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits, {}", self.digits, self.rounding)
    }
}

// ============================================================================
// Tests
// ============================================================================
