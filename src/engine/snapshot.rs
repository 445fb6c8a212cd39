//! The snapshot an engine emits after every applied token.
//!
//! A snapshot is the whole interface between the engine and its display
//! sink: the sink renders it, the engine never renders anything itself.

use crate::core::{EngineState, Operator};
use serde::{Deserialize, Serialize};

/// Number of fractional digits a result is rounded to for display.
pub const DISPLAY_FRACTION_DIGITS: u32 = 4;

/// Immutable view of the engine after an applied token.
///
/// Operand fields carry the text exactly as entered (`"12."` stays
/// `"12."`); `result` carries the full floating-point value, with
/// rounding applied only when formatting for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Current machine state
    pub state: EngineState,
    /// Left operand text as entered, if any
    pub left: Option<String>,
    /// Pending operator, if any
    pub operator: Option<Operator>,
    /// Right operand text as entered, if any
    pub right: Option<String>,
    /// Last computed value, present only in the `Equal` state
    pub result: Option<f64>,
}

impl EngineSnapshot {
    /// An empty snapshot, as emitted in the `Initial` state.
    pub fn empty() -> Self {
        Self {
            state: EngineState::Initial,
            left: None,
            operator: None,
            right: None,
            result: None,
        }
    }

    /// Whether every memory field is absent.
    pub fn is_empty(&self) -> bool {
        self.left.is_none()
            && self.operator.is_none()
            && self.right.is_none()
            && self.result.is_none()
    }

    /// Render the expression for a display sink.
    ///
    /// Returns the empty string when nothing has been entered; showing
    /// a placeholder zero instead is the sink's decision.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::core::InputToken;
    /// use tally::engine::Engine;
    ///
    /// let mut engine = Engine::new();
    /// let snapshot = InputToken::script("12+3=")
    ///     .into_iter()
    ///     .map(|token| engine.apply(token))
    ///     .last()
    ///     .unwrap();
    ///
    /// assert_eq!(snapshot.render(), "12 + 3 = 15");
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(left) = &self.left {
            out.push_str(left);
        }
        if let Some(operator) = self.operator {
            out.push(' ');
            out.push(operator.symbol());
        }
        if let Some(right) = &self.right {
            out.push(' ');
            out.push_str(right);
        }
        if self.state == EngineState::Equal {
            if let Some(result) = self.result {
                out.push_str(" = ");
                out.push_str(&format_result(result));
            }
        }
        out
    }
}

/// Format a computed value for display.
///
/// Rounds to at most [`DISPLAY_FRACTION_DIGITS`] fractional digits,
/// half away from zero, and drops trailing zeros: `1.0 / 3.0` renders
/// as `"0.3333"`, `15.0` as `"15"`.
pub fn format_result(value: f64) -> String {
    let factor = 10f64.powi(DISPLAY_FRACTION_DIGITS as i32);
    // f64::round is round-half-away-from-zero
    let rounded = (value * factor).round() / factor;
    rounded.to_string()
}
