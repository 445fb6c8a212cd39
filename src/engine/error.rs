//! Engine error taxonomy and the signal side-channel.

use thiserror::Error;

/// Errors the engine can raise while processing a token.
///
/// None of these are fatal: every variant leaves the engine in a valid,
/// resumable state. `RejectedInput` and `IncompleteExpression` leave
/// state untouched; `DivideByZero` performs a full memory reset before
/// being signalled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An input that is not legal for the current state. Logged at warn
    /// level, signalled, and otherwise ignored.
    #[error("input {token} rejected in state {state}")]
    RejectedInput {
        token: &'static str,
        state: &'static str,
    },

    /// Evaluation was requested with a missing operand or operator.
    #[error("cannot evaluate an incomplete expression")]
    IncompleteExpression,

    /// A zero divisor was detected before the divide was attempted.
    /// The engine resets fully rather than producing NaN or infinity.
    #[error("division by zero; memory cleared")]
    DivideByZero,
}

/// Callback through which the engine surfaces errors to its caller.
///
/// The display sink may subscribe to render a notice; the engine itself
/// never renders anything. Independent of the `log` output.
pub type SignalSink = Box<dyn Fn(&EngineError) + Send + Sync>;
