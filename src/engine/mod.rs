// ============================================================================
// Engine Module
// Contains the expression scanning and evaluation logic
// ============================================================================

mod error;
mod evaluator;

pub mod scanner;

pub use error::{ErrorKind, EvalError, EvalResult};
pub use evaluator::{evaluate, Evaluator};
