// ============================================================================
// Decimal Calculator Library
// Shunting-yard evaluation of infix expressions at a fixed decimal precision
// ============================================================================

//! # Decimal Calculator
//!
//! Evaluates infix arithmetic expressions over decimal numbers.
//!
//! ## Features
//!
//! - **Two-stack shunting-yard evaluation** with standard precedence and
//!   left associativity, no syntax tree and no recursion
//! - **Unary signs** anywhere an operand may start: `-5`, `2*-3`, `-(1+2)`, `--5`
//! - **Bounded decimal precision**: every literal and result is rounded to a
//!   significant-digit budget (16 digits, half-even by default)
//! - **Step events** for tracing how an expression was folded
//!
//! ## Example
//!
//! ```rust
//! use decimal_calc::prelude::*;
//! use decimal_calc::numeric::format_plain;
//! use std::sync::Arc;
//!
//! let evaluator = Evaluator::new(PrecisionContext::DECIMAL64, Arc::new(NoOpEventHandler));
//!
//! let value = evaluator.evaluate("(2 + 3) * 4").unwrap();
//! assert_eq!(format_plain(value), "20");
//!
//! let third = evaluator.evaluate("1/3").unwrap();
//! assert_eq!(format_plain(third), "0.3333333333333333");
//!
//! let err = evaluator.evaluate("1/(2-2)").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DivisionByZero);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod repl;

pub use engine::evaluate;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{EvaluatorConfig, Operator, StackEntry};
    pub use crate::engine::{evaluate, ErrorKind, EvalError, EvalResult, Evaluator};
    pub use crate::interfaces::{
        EvalEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
    };
    pub use crate::numeric::{PrecisionContext, RoundingMode};
}
