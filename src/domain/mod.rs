// ============================================================================
// Domain Models Module
// Operators, operator-stack entries, and evaluator configuration
// ============================================================================

pub mod config;
pub mod operator;

pub use config::{EvaluatorConfig, DEFAULT_EXIT_KEYWORD, DEFAULT_PROMPT};
pub use operator::{Operator, StackEntry};
