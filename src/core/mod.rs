//! Core expression-entry types and logic.
//!
//! This module contains the pure functional core of the engine:
//! - State, token, and operator vocabularies
//! - The transition table as a pure total function
//! - Operand text accumulation with lazy numeric parsing
//! - An immutable, bounded transition log
//!
//! Nothing in this module performs I/O or touches a display; it is all
//! state-in, state-out.

mod operand;
mod state;
mod transition;

pub use operand::OperandBuffer;
pub use state::{EngineState, InputToken, Operator};
pub use transition::{next_state, TransitionLog, TransitionRecord, MAX_LOG_LEN};
