//! Tally: a finite-state expression engine for four-function calculators
//!
//! Tally is the "pure core" of a calculator: a state machine that
//! accumulates a left operand, an operator, and a right operand from
//! discrete input tokens and produces a numeric result on evaluation.
//! The "imperative shell" (button grids, keyboards, displays) stays
//! outside: an input source feeds [`InputToken`]s to
//! [`Engine::apply`], and a display sink renders the returned
//! [`EngineSnapshot`].
//!
//! # Core Concepts
//!
//! - **States**: `Initial → Left → Operand → Right → Equal`, with
//!   chaining looping `Right → Operand`
//! - **Tokens**: digits, the decimal point, operators, equals, and the
//!   two clears
//! - **Snapshots**: immutable views the caller renders; the engine
//!   itself never touches a display
//!
//! # Example
//!
//! ```rust
//! use tally::core::{EngineState, InputToken, Operator};
//! use tally::engine::Engine;
//!
//! let mut engine = Engine::new();
//!
//! engine.apply(InputToken::Digit('5'));
//! engine.apply(InputToken::Operator(Operator::Add));
//! engine.apply(InputToken::Digit('6'));
//!
//! // Choosing another operator chains: 5 + 6 is evaluated and 11
//! // becomes the left operand of the next expression.
//! let snapshot = engine.apply(InputToken::Operator(Operator::Subtract));
//! assert_eq!(snapshot.state, EngineState::Operand);
//! assert_eq!(snapshot.left.as_deref(), Some("11"));
//!
//! engine.apply(InputToken::Digit('7'));
//! let snapshot = engine.apply(InputToken::Equal);
//! assert_eq!(snapshot.result, Some(4.0));
//! assert_eq!(snapshot.render(), "11 - 7 = 4");
//! ```

pub mod checkpoint;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use checkpoint::Checkpoint;
pub use core::{EngineState, InputToken, Operator};
pub use engine::{Engine, EngineError, EngineSnapshot};
