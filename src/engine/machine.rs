//! The expression engine.
//!
//! A single `Engine` instance is constructed by the surrounding
//! application and driven exclusively through [`Engine::apply`]; the
//! caller owns it and passes it by reference to whatever layer handles
//! input events. There is no global instance.

use crate::core::{
    next_state, EngineState, InputToken, OperandBuffer, Operator, TransitionLog, TransitionRecord,
};
use crate::engine::error::{EngineError, SignalSink};
use crate::engine::snapshot::EngineSnapshot;
use chrono::Utc;
use log::{debug, warn};

/// Finite-state machine accumulating a left operand, an operator, and a
/// right operand from discrete input tokens.
///
/// The engine is an opaque state container: buffers are never exposed
/// mutably, and every mutation flows through [`apply`](Self::apply).
/// All operations are synchronous and run to completion; rejected
/// inputs leave the state unchanged and are surfaced only through the
/// `log` facade and the optional signal sink.
///
/// # Example
///
/// ```rust
/// use tally::core::{EngineState, InputToken, Operator};
/// use tally::engine::Engine;
///
/// let mut engine = Engine::new();
/// engine.apply(InputToken::Digit('1'));
/// engine.apply(InputToken::Digit('2'));
/// engine.apply(InputToken::Operator(Operator::Add));
/// engine.apply(InputToken::Digit('3'));
/// let snapshot = engine.apply(InputToken::Equal);
///
/// assert_eq!(snapshot.state, EngineState::Equal);
/// assert_eq!(snapshot.result, Some(15.0));
/// ```
pub struct Engine {
    state: EngineState,
    left: OperandBuffer,
    operator: Option<Operator>,
    right: OperandBuffer,
    result: Option<f64>,
    log: TransitionLog,
    signal_sink: Option<SignalSink>,
}

impl Engine {
    /// Create an engine in the `Initial` state with all fields absent.
    pub fn new() -> Self {
        Self {
            state: EngineState::Initial,
            left: OperandBuffer::new(),
            operator: None,
            right: OperandBuffer::new(),
            result: None,
            log: TransitionLog::new(),
            signal_sink: None,
        }
    }

    /// Install a callback that receives every [`EngineError`] as it is
    /// raised, so a UI can notify the user. Replaces any previous sink.
    pub fn set_signal_sink(&mut self, sink: impl Fn(&EngineError) + Send + Sync + 'static) {
        self.signal_sink = Some(Box::new(sink));
    }

    /// Process one input token and return the updated snapshot.
    ///
    /// Tokens are handled strictly in arrival order; each call runs to
    /// completion with no suspension. Structural state changes are
    /// recorded in the transition log.
    pub fn apply(&mut self, token: InputToken) -> EngineSnapshot {
        let from = self.state;
        match token {
            InputToken::Digit(digit) => self.submit_digit(digit),
            InputToken::Decimal => self.submit_decimal(),
            InputToken::Operator(operator) => self.submit_operator(operator),
            InputToken::Equal => self.evaluate(),
            InputToken::ClearDigit => self.clear_digit(),
            InputToken::ClearMemory => self.reset_memory(),
        }
        if self.state != from {
            debug!("{} -> {} on {}", from.name(), self.state.name(), token.kind());
            self.log = self.log.record(TransitionRecord {
                from,
                to: self.state,
                token,
                timestamp: Utc::now(),
            });
        }
        self.snapshot()
    }

    /// Pure guard: would [`apply`](Self::apply) with this token be
    /// accepted in the current state?
    ///
    /// Intended for the caller's affordance logic (enabling and
    /// disabling buttons). A token for which this returns false is
    /// rejected by `apply` without any state change.
    pub fn accepts(&self, token: &InputToken) -> bool {
        match token {
            InputToken::Digit(digit) => digit.is_ascii_digit(),
            InputToken::Decimal => true,
            InputToken::Operator(_) => {
                self.state != EngineState::Initial && !self.left.is_empty()
            }
            InputToken::Equal => {
                matches!(self.state, EngineState::Right | EngineState::Equal)
            }
            InputToken::ClearDigit | InputToken::ClearMemory => true,
        }
    }

    /// Unconditionally return every field to its initial absent value
    /// and the state to `Initial`. Idempotent. The diagnostic transition
    /// log is retained.
    pub fn reset_memory(&mut self) {
        self.clear_fields();
        self.state = EngineState::Initial;
    }

    /// Current machine state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Left operand text as entered.
    pub fn left_text(&self) -> &str {
        self.left.as_str()
    }

    /// Right operand text as entered.
    pub fn right_text(&self) -> &str {
        self.right.as_str()
    }

    /// Pending operator, if one has been selected.
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// Last computed value; present only in the `Equal` state.
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    /// Left operand parsed to a floating-point value, lazily on read.
    pub fn left_value(&self) -> Option<f64> {
        self.left.value()
    }

    /// Right operand parsed to a floating-point value, lazily on read.
    pub fn right_value(&self) -> Option<f64> {
        self.right.value()
    }

    /// The diagnostic transition log.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Immutable view of the current memory for a display sink.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state,
            left: (!self.left.is_empty()).then(|| self.left.as_str().to_string()),
            operator: self.operator,
            right: (!self.right.is_empty()).then(|| self.right.as_str().to_string()),
            result: self.result,
        }
    }

    /// Rebuild an engine from checkpointed memory.
    ///
    /// Returns `None` when the snapshot violates the structural
    /// invariants (an operand text the buffer could never have
    /// produced, or fields inconsistent with the recorded state).
    /// Decimal flags are derived from the text, which is lossless
    /// because a buffer's flag is set exactly when its text contains a
    /// point.
    pub(crate) fn from_snapshot(snapshot: &EngineSnapshot, log: TransitionLog) -> Option<Self> {
        let left = OperandBuffer::from_text(snapshot.left.as_deref().unwrap_or(""))?;
        let right = OperandBuffer::from_text(snapshot.right.as_deref().unwrap_or(""))?;

        let consistent = match snapshot.state {
            EngineState::Initial => {
                left.is_empty()
                    && snapshot.operator.is_none()
                    && right.is_empty()
                    && snapshot.result.is_none()
            }
            EngineState::Left => {
                !left.is_empty() && snapshot.operator.is_none() && right.is_empty()
            }
            EngineState::Operand => {
                !left.is_empty() && snapshot.operator.is_some() && right.is_empty()
            }
            EngineState::Right => {
                !left.is_empty() && snapshot.operator.is_some() && !right.is_empty()
            }
            EngineState::Equal => {
                !left.is_empty()
                    && snapshot.operator.is_some()
                    && !right.is_empty()
                    && snapshot.result.is_some()
            }
        };

        consistent.then(|| Self {
            state: snapshot.state,
            left,
            operator: snapshot.operator,
            right,
            result: snapshot.result,
            log,
            signal_sink: None,
        })
    }

    fn submit_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            self.signal(EngineError::RejectedInput {
                token: "Digit",
                state: self.state.name(),
            });
            return;
        }
        match self.state {
            EngineState::Initial | EngineState::Left => {
                self.left.push_digit(digit);
            }
            EngineState::Operand | EngineState::Right => {
                self.right.push_digit(digit);
            }
            EngineState::Equal => {
                // A digit after "=" starts a fresh expression
                self.clear_fields();
                self.left.push_digit(digit);
            }
        }
        self.state = next_state(self.state, &InputToken::Digit(digit));
    }

    fn submit_decimal(&mut self) {
        match self.state {
            EngineState::Initial | EngineState::Left => {
                self.left.push_decimal();
            }
            EngineState::Operand | EngineState::Right => {
                self.right.push_decimal();
            }
            EngineState::Equal => {
                self.clear_fields();
                self.left.push_decimal();
            }
        }
        self.state = next_state(self.state, &InputToken::Decimal);
    }

    fn submit_operator(&mut self, operator: Operator) {
        let token = InputToken::Operator(operator);
        match self.state {
            EngineState::Initial => {
                self.signal(EngineError::RejectedInput {
                    token: "Operator",
                    state: self.state.name(),
                });
                return;
            }
            EngineState::Left | EngineState::Operand => {
                if self.left.is_empty() {
                    self.signal(EngineError::RejectedInput {
                        token: "Operator",
                        state: self.state.name(),
                    });
                    return;
                }
                // In Operand this replaces the pending operator
                self.operator = Some(operator);
            }
            EngineState::Right => {
                // Chaining: evaluate the pending expression and fold the
                // result into the left slot before adopting the new
                // operator. A zero divisor has already reset the engine
                // by the time compute returns.
                let value = match self.compute() {
                    Ok(value) => value,
                    Err(_) => return,
                };
                self.left.replace_with_value(value);
                self.right.clear();
                self.operator = Some(operator);
            }
            EngineState::Equal => {
                // The result becomes the left operand of the next expression
                if let Some(value) = self.result.take() {
                    self.left.replace_with_value(value);
                }
                self.right.clear();
                self.operator = Some(operator);
            }
        }
        self.state = next_state(self.state, &token);
    }

    fn evaluate(&mut self) {
        match self.state {
            EngineState::Right => {
                if let Ok(value) = self.compute() {
                    self.result = Some(value);
                    self.state = next_state(EngineState::Right, &InputToken::Equal);
                }
            }
            EngineState::Equal => {
                // Repeated "=": the buffers are unchanged, so this
                // recomputes the same value (idempotent)
                if let Ok(value) = self.compute() {
                    self.result = Some(value);
                }
            }
            _ => {
                self.signal(EngineError::RejectedInput {
                    token: "Equal",
                    state: self.state.name(),
                });
            }
        }
    }

    fn clear_digit(&mut self) {
        match self.state {
            EngineState::Initial | EngineState::Equal => {
                self.reset_memory();
            }
            EngineState::Left => {
                self.left.pop();
                // A chained result can leave a bare minus sign behind;
                // text that no longer parses counts as emptied
                if self.left.is_empty() || self.left.value().is_none() {
                    self.reset_memory();
                }
            }
            EngineState::Operand => {
                self.operator = None;
                self.state = next_state(EngineState::Operand, &InputToken::ClearDigit);
            }
            EngineState::Right => {
                self.right.pop();
                if self.right.is_empty() {
                    self.state = next_state(EngineState::Right, &InputToken::ClearDigit);
                }
            }
        }
    }

    /// Compute left∘right for the pending operator.
    ///
    /// The zero divisor is detected before the divide is attempted and
    /// voids the entire engine: full reset, then the error is signalled.
    fn compute(&mut self) -> Result<f64, EngineError> {
        let (Some(left), Some(operator), Some(right)) =
            (self.left.value(), self.operator, self.right.value())
        else {
            let error = EngineError::IncompleteExpression;
            self.signal(error.clone());
            return Err(error);
        };

        if operator == Operator::Divide && right == 0.0 {
            self.reset_memory();
            self.signal(EngineError::DivideByZero);
            return Err(EngineError::DivideByZero);
        }

        Ok(operator.apply(left, right))
    }

    fn clear_fields(&mut self) {
        self.left.clear();
        self.operator = None;
        self.right.clear();
        self.result = None;
    }

    fn signal(&self, error: EngineError) {
        warn!("{error}");
        if let Some(sink) = &self.signal_sink {
            sink(&error);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
