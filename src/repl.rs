// ============================================================================
// Interactive Session
// Line-oriented read-evaluate-print loop around the evaluator
// ============================================================================

use crate::domain::EvaluatorConfig;
use crate::engine::{EvalError, Evaluator};
use crate::interfaces::{EventHandler, LoggingEventHandler, RecordingEventHandler};
use crate::numeric::format_plain;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// What a single input line amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// The exit keyword was entered
    Exit,
    /// Blank line, nothing evaluated
    Skip,
    Value(Decimal),
    Error(EvalError),
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub evaluated: usize,
    pub failed: usize,
}

pub struct Repl {
    config: EvaluatorConfig,
    evaluator: Evaluator,
    recorder: Option<Arc<RecordingEventHandler>>,
}

impl Repl {
    /// Build a session from configuration.
    ///
    /// With `trace` enabled the evaluation steps are recorded and printed
    /// ahead of each result; otherwise they go to `tracing` at debug level.
    pub fn new(config: EvaluatorConfig) -> Result<Self, String> {
        let recorder = config.trace.then(|| Arc::new(RecordingEventHandler::new()));
        let handler: Arc<dyn EventHandler> = match &recorder {
            Some(recorder) => recorder.clone(),
            None => Arc::new(LoggingEventHandler),
        };
        let evaluator = Evaluator::from_config(&config, handler)?;

        Ok(Self {
            config,
            evaluator,
            recorder,
        })
    }

    /// Classify and, if needed, evaluate one raw input line.
    pub fn handle_line(&self, line: &str) -> LineOutcome {
        let input = line.trim();
        if input.eq_ignore_ascii_case(self.config.exit_keyword.trim()) {
            return LineOutcome::Exit;
        }
        if input.is_empty() {
            return LineOutcome::Skip;
        }
        match self.evaluator.evaluate(input) {
            Ok(value) => LineOutcome::Value(value),
            Err(error) => LineOutcome::Error(error),
        }
    }

    /// Run until the exit keyword or end of input.
    ///
    /// Expression errors are reported and the loop continues; only I/O
    /// errors end the session early.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut lines = input.lines();

        writeln!(output, "Decimal calculator ({})", self.evaluator.context())?;
        writeln!(output, "Supports + - * / and parentheses")?;
        writeln!(output, "Type {} to quit", self.config.exit_keyword)?;

        loop {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line?;

            let outcome = self.handle_line(&line);
            self.print_trace(output)?;

            match outcome {
                LineOutcome::Exit => {
                    writeln!(output, "Bye!")?;
                    break;
                },
                LineOutcome::Skip => {},
                LineOutcome::Value(value) => {
                    summary.evaluated += 1;
                    writeln!(output, "= {}", format_plain(value))?;
                },
                LineOutcome::Error(error) => {
                    summary.failed += 1;
                    writeln!(output, "error[{}]: {}", error.kind(), error)?;
                },
            }
        }

        tracing::debug!(
            evaluated = summary.evaluated,
            failed = summary.failed,
            "session finished"
        );
        Ok(summary)
    }

    fn print_trace<W: Write>(&self, output: &mut W) -> io::Result<()> {
        if let Some(recorder) = &self.recorder {
            for event in recorder.take() {
                writeln!(output, "  {}", event)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ErrorKind;
    use std::io::Cursor;

    fn run_session(config: EvaluatorConfig, input: &str) -> (SessionSummary, String) {
        let repl = Repl::new(config).unwrap();
        let mut output = Vec::new();
        let summary = repl.run(Cursor::new(input), &mut output).unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_handle_line() {
        let repl = Repl::new(EvaluatorConfig::default()).unwrap();

        assert_eq!(repl.handle_line("  EXIT "), LineOutcome::Exit);
        assert_eq!(repl.handle_line("   "), LineOutcome::Skip);
        assert_eq!(repl.handle_line("1+1"), LineOutcome::Value(Decimal::from(2)));
        assert!(matches!(
            repl.handle_line("1/0"),
            LineOutcome::Error(EvalError::DivisionByZero)
        ));
    }

    #[test]
    fn test_session_prints_results_and_errors() {
        let (summary, output) =
            run_session(EvaluatorConfig::default(), "1.0+1\n\n5/2\n2+a\nexit\n3*3\n");

        assert_eq!(
            summary,
            SessionSummary {
                evaluated: 2,
                failed: 1
            }
        );
        assert!(output.contains("= 2\n"));
        assert!(output.contains("= 2.5\n"));
        assert!(output.contains(&format!(
            "error[{}]: illegal character 'a' at position 2",
            ErrorKind::IllegalCharacter
        )));
        assert!(output.contains("Bye!"));
        // Nothing after exit is evaluated
        assert!(!output.contains("= 9"));
    }

    #[test]
    fn test_session_ends_at_end_of_input() {
        let (summary, output) = run_session(EvaluatorConfig::default(), "2*3");
        assert_eq!(summary.evaluated, 1);
        assert!(output.contains("= 6\n"));
        assert!(!output.contains("Bye!"));
    }

    #[test]
    fn test_custom_exit_keyword_and_prompt() {
        let config = EvaluatorConfig::default()
            .with_exit_keyword("quit")
            .with_prompt("calc> ");
        let (summary, output) = run_session(config, "exit\nQuit\n1+1\n");

        // "exit" is just an illegal expression here
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.evaluated, 0);
        assert!(output.contains("calc> "));
        assert!(output.contains("Type quit to quit"));
    }

    #[test]
    fn test_trace_mode_prints_steps() {
        let config = EvaluatorConfig::default().with_trace(true);
        let (_, output) = run_session(config, "2*3\n");

        assert!(output.contains("  normalized: 2*3\n"));
        assert!(output.contains("  apply 2 * 3 = 6\n"));
        assert!(output.contains("= 6\n"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(Repl::new(EvaluatorConfig::default().with_precision(0)).is_err());
    }
}
