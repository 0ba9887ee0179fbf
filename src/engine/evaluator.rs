// ============================================================================
// Evaluator
// Two-stack shunting-yard evaluation of infix decimal expressions
// ============================================================================

use super::error::{EvalError, EvalResult};
use super::scanner::{is_unary_context, normalize, parse_number};
use crate::domain::{EvaluatorConfig, Operator, StackEntry};
use crate::interfaces::{EvalEvent, EventHandler, NoOpEventHandler};
use crate::numeric::PrecisionContext;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, trace};

/// Inline capacity of the evaluation stacks before they spill to the heap
const STACK_INLINE: usize = 16;

/// Evaluates infix expressions at a fixed working precision.
///
/// An evaluator holds no per-expression state; every call to
/// [`evaluate`](Self::evaluate) owns its own stacks and cursor.
pub struct Evaluator {
    /// Working precision for literals and results
    context: PrecisionContext,

    /// Event handler for step tracing
    event_handler: Arc<dyn EventHandler>,
}

impl Evaluator {
    /// Create a new evaluator
    pub fn new(context: PrecisionContext, event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            context,
            event_handler,
        }
    }

    /// Create an evaluator that emits no events
    pub fn with_context(context: PrecisionContext) -> Self {
        Self::new(context, Arc::new(NoOpEventHandler))
    }

    /// Create an evaluator from configuration
    ///
    /// # Example
    /// ```
    /// use decimal_calc::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let config = EvaluatorConfig::decimal32();
    /// let evaluator = Evaluator::from_config(&config, Arc::new(NoOpEventHandler)).unwrap();
    /// assert_eq!(evaluator.context().digits(), 7);
    /// ```
    pub fn from_config(
        config: &EvaluatorConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Self, String> {
        let context = config.precision_context()?;
        Ok(Self::new(context, event_handler))
    }

    pub fn context(&self) -> PrecisionContext {
        self.context
    }

    /// Evaluate one expression.
    ///
    /// # Errors
    /// Any [`EvalError`]; the call is abandoned at the first failure.
    pub fn evaluate(&self, expression: &str) -> EvalResult<Decimal> {
        let outcome = self.run(expression);
        match &outcome {
            Ok(result) => {
                debug!(expression, %result, "evaluated");
                self.event_handler
                    .on_event(EvalEvent::Completed { result: *result });
            },
            Err(error) => {
                debug!(expression, %error, "evaluation failed");
                self.event_handler.on_event(EvalEvent::Failed {
                    error: error.clone(),
                });
            },
        }
        outcome
    }

    fn run(&self, expression: &str) -> EvalResult<Decimal> {
        let input = normalize(expression)?;
        self.event_handler.on_event(EvalEvent::Normalized {
            expression: input.iter().collect(),
        });

        let mut stacks = Stacks::new(&self.context, self.event_handler.as_ref());
        let mut index = 0;

        while index < input.len() {
            let current = input[index];
            trace!(position = index, character = %current, "scan");

            index = match current {
                '(' => {
                    stacks.open_paren(index);
                    index + 1
                },
                ')' => {
                    stacks.close_paren(index)?;
                    index + 1
                },
                '0'..='9' | '.' => {
                    let (value, next) = parse_number(&input, index, &self.context)?;
                    stacks.push_value(value, index);
                    next
                },
                _ => match Operator::from_char(current) {
                    Some(operator) if is_unary_context(&input, index) => {
                        self.scan_sign(&input, index, operator, &mut stacks)?
                    },
                    Some(operator) => {
                        stacks.fold_for(operator)?;
                        stacks.push_operator(operator, index);
                        index + 1
                    },
                    None => {
                        return Err(EvalError::IllegalCharacter {
                            found: current,
                            position: index,
                        })
                    },
                },
            };
        }

        stacks.drain()
    }

    /// Handle a `+`/`-` in sign position; returns the next scan offset.
    fn scan_sign(
        &self,
        input: &[char],
        index: usize,
        sign: Operator,
        stacks: &mut Stacks<'_>,
    ) -> EvalResult<usize> {
        let next = index + 1;
        match input.get(next) {
            None => Err(EvalError::MissingUnaryOperand { position: index }),

            // Sign in front of a group or of another sign: evaluate as
            // `0 <sign> operand`. The zero and the sign go on the stacks
            // without folding, so the sign binds to whatever the following
            // group or signed operand produces.
            Some('(') | Some('+') | Some('-') => {
                stacks.rewrite_sign(sign, index);
                Ok(next)
            },

            Some(_) => {
                let (value, after) = parse_number(input, next, &self.context)?;
                let signed = match sign {
                    Operator::Subtract => -value,
                    _ => value,
                };
                stacks.push_value(signed, index);
                Ok(after)
            },
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_context(PrecisionContext::DECIMAL64)
    }
}

/// Evaluate `expression` at the default 16-digit half-even precision.
///
/// # Example
/// ```
/// use decimal_calc::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap().to_string(), "14");
/// ```
pub fn evaluate(expression: &str) -> EvalResult<Decimal> {
    Evaluator::default().evaluate(expression)
}

// ============================================================================
// Evaluation Stacks
// ============================================================================

/// Value and operator stacks for a single evaluation.
struct Stacks<'a> {
    values: SmallVec<[Decimal; STACK_INLINE]>,
    operators: SmallVec<[StackEntry; STACK_INLINE]>,
    context: &'a PrecisionContext,
    event_handler: &'a dyn EventHandler,
}

impl<'a> Stacks<'a> {
    fn new(context: &'a PrecisionContext, event_handler: &'a dyn EventHandler) -> Self {
        Self {
            values: SmallVec::new(),
            operators: SmallVec::new(),
            context,
            event_handler,
        }
    }

    fn push_value(&mut self, value: Decimal, position: usize) {
        self.values.push(value);
        self.event_handler
            .on_event(EvalEvent::ValuePushed { value, position });
    }

    fn push_operator(&mut self, operator: Operator, position: usize) {
        self.operators.push(StackEntry::Operator(operator));
        self.event_handler
            .on_event(EvalEvent::OperatorPushed { operator, position });
    }

    fn rewrite_sign(&mut self, sign: Operator, position: usize) {
        self.values.push(Decimal::ZERO);
        self.operators.push(StackEntry::Operator(sign));
        self.event_handler
            .on_event(EvalEvent::SignRewritten { sign, position });
    }

    fn open_paren(&mut self, position: usize) {
        self.operators.push(StackEntry::OpenParen);
        self.event_handler
            .on_event(EvalEvent::ParenthesisOpened { position });
    }

    /// Apply operators down to the nearest `(` marker, then discard it.
    fn close_paren(&mut self, position: usize) -> EvalResult<()> {
        loop {
            match self.operators.pop() {
                None => return Err(EvalError::UnmatchedParenthesis),
                Some(StackEntry::OpenParen) => break,
                Some(StackEntry::Operator(operator)) => self.apply(operator)?,
            }
        }
        self.event_handler
            .on_event(EvalEvent::ParenthesisClosed { position });
        Ok(())
    }

    /// Apply stacked operators of equal or higher precedence than `incoming`.
    /// Equal precedence folds too, which keeps `-` and `/` left-associative.
    fn fold_for(&mut self, incoming: Operator) -> EvalResult<()> {
        while let Some(&StackEntry::Operator(top)) = self.operators.last() {
            if top.precedence() < incoming.precedence() {
                break;
            }
            self.operators.pop();
            self.apply(top)?;
        }
        Ok(())
    }

    /// Pop two operands, combine them as `left <op> right`, push the result.
    fn apply(&mut self, operator: Operator) -> EvalResult<()> {
        if self.values.len() < 2 {
            return Err(EvalError::MalformedExpression);
        }
        let (Some(right), Some(left)) = (self.values.pop(), self.values.pop()) else {
            return Err(EvalError::MalformedExpression);
        };

        let result = match operator {
            Operator::Add => self.context.add(left, right)?,
            Operator::Subtract => self.context.sub(left, right)?,
            Operator::Multiply => self.context.mul(left, right)?,
            Operator::Divide => self.context.div(left, right)?,
        };
        trace!(%left, %operator, %right, %result, "apply");

        self.values.push(result);
        self.event_handler.on_event(EvalEvent::OperatorApplied {
            operator,
            left,
            right,
            result,
        });
        Ok(())
    }

    /// Apply everything left on the operator stack and return the sole value.
    fn drain(mut self) -> EvalResult<Decimal> {
        while let Some(entry) = self.operators.pop() {
            match entry {
                StackEntry::OpenParen => return Err(EvalError::UnmatchedParenthesis),
                StackEntry::Operator(operator) => self.apply(operator)?,
            }
        }

        if self.values.len() != 1 {
            return Err(EvalError::MalformedExpression);
        }
        self.values.pop().ok_or(EvalError::MalformedExpression)
    }
}

// ============================================================================
// Tests
// ============================================================================
