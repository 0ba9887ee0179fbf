// ============================================================================
// Evaluator Configuration
// Working precision and REPL session settings
// ============================================================================

use crate::numeric::{PrecisionContext, RoundingMode, MAX_PRECISION};

/// Default keyword that ends an interactive session (matched case-insensitively)
pub const DEFAULT_EXIT_KEYWORD: &str = "exit";

/// Default prompt shown before each line is read
pub const DEFAULT_PROMPT: &str = "> ";

// ============================================================================
// Complete Evaluator Configuration
// ============================================================================

/// Configuration for an evaluator and the session that drives it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Significant digits kept after every literal and every operation
    pub precision: u32,

    /// Rounding applied when a result exceeds `precision`
    pub rounding: RoundingMode,

    /// Keyword that ends the session
    pub exit_keyword: String,

    /// Prompt printed before each input line
    pub prompt: String,

    /// Print the evaluation steps before each result
    pub trace: bool,
}

impl EvaluatorConfig {
    /// Create a new configuration with the given precision budget
    pub fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
            exit_keyword: DEFAULT_EXIT_KEYWORD.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            trace: false,
        }
    }

    /// Builder method: Set significant digits
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set rounding mode
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Builder method: Set the session exit keyword
    pub fn with_exit_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.exit_keyword = keyword.into();
        self
    }

    /// Builder method: Set the input prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method: Enable or disable step tracing
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.precision == 0 {
            return Err("Precision must be at least one significant digit".to_string());
        }

        if self.precision > MAX_PRECISION {
            return Err(format!(
                "Precision cannot exceed {} significant digits",
                MAX_PRECISION
            ));
        }

        if self.exit_keyword.trim().is_empty() {
            return Err("Exit keyword cannot be empty".to_string());
        }

        Ok(())
    }

    /// Build the precision context this configuration describes
    pub fn precision_context(&self) -> Result<PrecisionContext, String> {
        self.validate()?;
        PrecisionContext::new(self.precision, self.rounding).map_err(|e| e.to_string())
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::decimal64()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EvaluatorConfig {
    /// 7 significant digits, half-even
    pub fn decimal32() -> Self {
        Self::new(
            PrecisionContext::DECIMAL32.digits(),
            RoundingMode::HalfEven,
        )
    }

    /// 16 significant digits, half-even
    pub fn decimal64() -> Self {
        Self::new(
            PrecisionContext::DECIMAL64.digits(),
            RoundingMode::HalfEven,
        )
    }

    /// Widest precision the decimal backend supports
    pub fn extended() -> Self {
        Self::new(MAX_PRECISION, RoundingMode::HalfEven)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = EvaluatorConfig::new(10, RoundingMode::HalfUp);

        assert_eq!(config.precision, 10);
        assert_eq!(config.rounding, RoundingMode::HalfUp);
        assert_eq!(config.exit_keyword, DEFAULT_EXIT_KEYWORD);
        assert!(!config.trace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvaluatorConfig::decimal64()
            .with_precision(20)
            .with_rounding(RoundingMode::Down)
            .with_exit_keyword("quit")
            .with_prompt("calc> ")
            .with_trace(true);

        assert_eq!(config.precision, 20);
        assert_eq!(config.rounding, RoundingMode::Down);
        assert_eq!(config.exit_keyword, "quit");
        assert_eq!(config.prompt, "calc> ");
        assert!(config.trace);
    }

    #[test]
    fn test_validation() {
        assert!(EvaluatorConfig::decimal64()
            .with_precision(0)
            .validate()
            .is_err());
        assert!(EvaluatorConfig::decimal64()
            .with_precision(MAX_PRECISION + 1)
            .validate()
            .is_err());
        assert!(EvaluatorConfig::decimal64()
            .with_exit_keyword("  ")
            .validate()
            .is_err());
    }

    #[test]
    fn test_preset_configs() {
        assert_eq!(EvaluatorConfig::decimal32().precision, 7);
        assert_eq!(EvaluatorConfig::default(), EvaluatorConfig::decimal64());
        assert_eq!(EvaluatorConfig::extended().precision, MAX_PRECISION);
    }

    #[test]
    fn test_precision_context() {
        let ctx = EvaluatorConfig::default().precision_context().unwrap();
        assert_eq!(ctx, PrecisionContext::DECIMAL64);

        assert!(EvaluatorConfig::default()
            .with_precision(0)
            .precision_context()
            .is_err());
    }
}
