// ============================================================================
// Numeric Module
// Precision-bounded decimal arithmetic for expression evaluation
// ============================================================================
//
// This module provides:
// - PrecisionContext: significant-digit budget + rounding mode
// - RoundingMode: the rounding rules a context can apply
// - NumericError: Error types for arithmetic operations
// - format_plain: display formatting for results
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Every result is rounded to the working precision immediately

mod context;
mod errors;
mod format;

pub use context::{PrecisionContext, RoundingMode, MAX_PRECISION};
pub use errors::{NumericError, NumericResult};
pub use format::format_plain;
