// ============================================================================
// Event Handler Interface
// Defines the contract for observing evaluation steps
// ============================================================================

use crate::domain::Operator;
use crate::engine::EvalError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::fmt;

/// Events emitted by the evaluator while it scans and folds an expression.
///
/// Positions are offsets into the whitespace-stripped expression.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalEvent {
    /// Whitespace removed; scanning is about to start
    Normalized { expression: String },

    /// Operand pushed onto the value stack
    ValuePushed { value: Decimal, position: usize },

    /// Binary operator pushed onto the operator stack
    OperatorPushed { operator: Operator, position: usize },

    /// Sign in front of a group or another sign, rewritten as `0 <sign> ...`
    SignRewritten { sign: Operator, position: usize },

    /// `(` marker pushed
    ParenthesisOpened { position: usize },

    /// `)` matched and its marker discarded
    ParenthesisClosed { position: usize },

    /// Two operands combined
    OperatorApplied {
        operator: Operator,
        left: Decimal,
        right: Decimal,
        result: Decimal,
    },

    /// Evaluation finished with a single value
    Completed { result: Decimal },

    /// Evaluation aborted
    Failed { error: EvalError },
}

impl fmt::Display for EvalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalEvent::Normalized { expression } => write!(f, "normalized: {}", expression),
            EvalEvent::ValuePushed { value, position } => {
                write!(f, "[{}] push value {}", position, value)
            },
            EvalEvent::OperatorPushed { operator, position } => {
                write!(f, "[{}] push operator {}", position, operator)
            },
            EvalEvent::SignRewritten { sign, position } => {
                write!(f, "[{}] rewrite sign as 0 {} ...", position, sign)
            },
            EvalEvent::ParenthesisOpened { position } => write!(f, "[{}] open (", position),
            EvalEvent::ParenthesisClosed { position } => write!(f, "[{}] close )", position),
            EvalEvent::OperatorApplied {
                operator,
                left,
                right,
                result,
            } => write!(f, "apply {} {} {} = {}", left, operator, right, result),
            EvalEvent::Completed { result } => write!(f, "result {}", result),
            EvalEvent::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Event handler trait for processing evaluator events
/// Implementations can handle logging, step tracing, test assertions, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an evaluation event
    fn on_event(&self, event: EvalEvent);
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: EvalEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: EvalEvent) {
        tracing::debug!("Evaluator event: {}", event);
    }
}

/// Collects every event it receives, in order.
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<EvalEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far
    pub fn events(&self) -> Vec<EvalEvent> {
        self.events.lock().clone()
    }

    /// Remove and return the recorded events
    pub fn take(&self) -> Vec<EvalEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: EvalEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(EvalEvent::ParenthesisOpened { position: 0 });
        // Should not panic
    }

    #[test]
    fn test_recording_handler() {
        let handler = RecordingEventHandler::new();
        assert!(handler.is_empty());

        handler.on_event(EvalEvent::ParenthesisOpened { position: 0 });
        handler.on_event(EvalEvent::ParenthesisClosed { position: 2 });
        assert_eq!(handler.len(), 2);
        assert_eq!(
            handler.events()[1],
            EvalEvent::ParenthesisClosed { position: 2 }
        );

        let taken = handler.take();
        assert_eq!(taken.len(), 2);
        assert!(handler.is_empty());
    }

    #[test]
    fn test_event_display() {
        let event = EvalEvent::OperatorApplied {
            operator: Operator::Multiply,
            left: Decimal::from(3),
            right: Decimal::from(4),
            result: Decimal::from(12),
        };
        assert_eq!(event.to_string(), "apply 3 * 4 = 12");
        assert_eq!(
            EvalEvent::Failed {
                error: EvalError::DivisionByZero
            }
            .to_string(),
            "failed: division by zero"
        );
    }
}
