//! The transition table and the transition log.
//!
//! [`next_state`] is the pure table at the heart of the engine: given
//! the current state and an input token it names the structural state
//! the engine lands in. The engine consults it whenever an input
//! changes structure; inputs that only lengthen or shorten a buffer
//! (a digit onto an existing operand, a backspace that leaves text
//! behind) keep the state they are in.
//!
//! [`TransitionLog`] is an append-only diagnostic record of the states
//! actually traversed, in the immutable-record style: `record` returns
//! a new log rather than mutating in place.

use super::state::{EngineState, InputToken};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest the diagnostic log is allowed to grow; the oldest records
/// are dropped past this point so a long-lived session stays bounded.
pub const MAX_LOG_LEN: usize = 256;

/// Structural target state for a token received in a given state.
///
/// This is a total function: tokens that are invalid for the state map
/// back to the same state (the engine rejects them without moving).
/// Three rows deserve a note:
///
/// - `Right` + operator lands in `Operand`: the pending expression is
///   evaluated first and its result becomes the new left operand
///   (chaining), so no user-visible reset occurs.
/// - `Equal` + digit/decimal lands in `Left`: memory is cleared and the
///   input starts a fresh expression.
/// - `Equal` + operator lands in `Operand`: the result is reused as the
///   new left operand.
///
/// # Example
///
/// ```rust
/// use tally::core::{next_state, EngineState, InputToken, Operator};
///
/// let state = next_state(EngineState::Initial, &InputToken::Digit('5'));
/// assert_eq!(state, EngineState::Left);
///
/// let state = next_state(state, &InputToken::Operator(Operator::Add));
/// assert_eq!(state, EngineState::Operand);
/// ```
pub fn next_state(current: EngineState, token: &InputToken) -> EngineState {
    use EngineState::*;

    match (current, token) {
        (_, InputToken::ClearMemory) => Initial,

        (Initial, InputToken::Digit(_) | InputToken::Decimal) => Left,
        (Initial, InputToken::Operator(_) | InputToken::Equal | InputToken::ClearDigit) => Initial,

        (Left, InputToken::Digit(_) | InputToken::Decimal) => Left,
        (Left, InputToken::Operator(_)) => Operand,
        (Left, InputToken::Equal) => Left,
        (Left, InputToken::ClearDigit) => Initial,

        (Operand, InputToken::Digit(_) | InputToken::Decimal) => Right,
        (Operand, InputToken::Operator(_)) => Operand,
        (Operand, InputToken::Equal) => Operand,
        (Operand, InputToken::ClearDigit) => Left,

        (Right, InputToken::Digit(_) | InputToken::Decimal) => Right,
        (Right, InputToken::Operator(_)) => Operand,
        (Right, InputToken::Equal) => Equal,
        (Right, InputToken::ClearDigit) => Operand,

        (Equal, InputToken::Digit(_) | InputToken::Decimal) => Left,
        (Equal, InputToken::Operator(_)) => Operand,
        (Equal, InputToken::Equal) => Equal,
        (Equal, InputToken::ClearDigit) => Initial,
    }
}

/// Record of a single structural transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: EngineState,
    /// The state being transitioned to
    pub to: EngineState,
    /// The token that caused the transition
    pub token: InputToken,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded log of structural transitions.
///
/// The log is immutable - `record` returns a new log with the
/// transition added. It exists for diagnostics and session inspection,
/// not for undo; the engine never reads it back.
///
/// # Example
///
/// ```rust
/// use tally::core::{EngineState, InputToken, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: EngineState::Initial,
///     to: EngineState::Left,
///     token: InputToken::Digit('1'),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.path(), vec![EngineState::Initial, EngineState::Left]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition, returning a new log.
    ///
    /// When the log is at [`MAX_LOG_LEN`] the oldest record is dropped.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        if records.len() >= MAX_LOG_LEN {
            records.remove(0);
        }
        records.push(record);
        Self { records }
    }

    /// The path of states traversed: the first record's origin followed
    /// by the target of every record.
    pub fn path(&self) -> Vec<EngineState> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }

    /// Elapsed time between the first and last recorded transition.
    ///
    /// `None` while the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// All recorded transitions in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
