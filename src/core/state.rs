//! States, input tokens, and operators for the expression engine.
//!
//! These are the closed vocabularies the engine is driven by. Every
//! match over them is exhaustive; an unrecognized operator symbol is a
//! construction-time `None`, never a runtime string comparison.

use serde::{Deserialize, Serialize};

/// Position of the engine within expression entry.
///
/// The entry pattern is `Initial => Left => Operand => Right => Equal`,
/// with chaining looping `Right => Operand` and repeated evaluation
/// holding at `Equal`.
///
/// # Example
///
/// ```rust
/// use tally::core::EngineState;
///
/// assert_eq!(EngineState::Initial.name(), "Initial");
/// assert!(EngineState::Initial.is_initial());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EngineState {
    /// No input accepted yet; memory is empty.
    Initial,
    /// Building the left operand.
    Left,
    /// Operator selected, right operand not started.
    Operand,
    /// Building the right operand.
    Right,
    /// Expression evaluated; a result is available.
    Equal,
}

impl EngineState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Left => "Left",
            Self::Operand => "Operand",
            Self::Right => "Right",
            Self::Equal => "Equal",
        }
    }

    /// Check if this is the empty-memory state.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Check if the engine is accumulating an operand in this state.
    ///
    /// True for `Left` and `Right`, the two states in which a digit
    /// extends an existing text buffer.
    pub fn is_accumulating(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// One of the four binary arithmetic functions.
///
/// # Example
///
/// ```rust
/// use tally::core::Operator;
///
/// assert_eq!(Operator::from_symbol('+'), Some(Operator::Add));
/// assert_eq!(Operator::from_symbol('%'), None);
/// assert_eq!(Operator::Multiply.symbol(), '×');
/// assert_eq!(Operator::Subtract.apply(9.0, 4.0), 5.0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse an operator from a display symbol.
    ///
    /// Accepts the ASCII spellings (`*`, `x`, `/`) alongside the
    /// typographic ones (`×`, `÷`). Returns `None` for anything else.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// The typographic symbol a display sink renders for this operator.
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Operator name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }

    /// Apply the operator to two operands.
    ///
    /// The engine guards the zero divisor before ever calling this with
    /// `Divide`, so the raw division here cannot produce an infinity in
    /// practice.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

/// A discrete input submitted to the engine.
///
/// Tokens are what the input source (keyboard handler, button grid)
/// produces; the engine consumes them in arrival order through
/// [`Engine::apply`](crate::engine::Engine::apply).
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum InputToken {
    /// A single digit character, `'0'..='9'`.
    Digit(char),
    /// The decimal point.
    Decimal,
    /// Selection of a binary operator.
    Operator(Operator),
    /// Request to evaluate the pending expression.
    Equal,
    /// Single-step backspace.
    ClearDigit,
    /// Full memory clear.
    ClearMemory,
}

impl InputToken {
    /// Token kind for log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Digit(_) => "Digit",
            Self::Decimal => "Decimal",
            Self::Operator(_) => "Operator",
            Self::Equal => "Equal",
            Self::ClearDigit => "ClearDigit",
            Self::ClearMemory => "ClearMemory",
        }
    }

    /// Map a character from a raw input stream to a token.
    ///
    /// Digits, the decimal point, the four operator symbols (ASCII or
    /// typographic), and `=` are recognized. Control inputs like clear
    /// and backspace have no universal character and are left to the
    /// input source.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tally::core::{InputToken, Operator};
    ///
    /// assert_eq!(InputToken::from_char('7'), Some(InputToken::Digit('7')));
    /// assert_eq!(InputToken::from_char('÷'), Some(InputToken::Operator(Operator::Divide)));
    /// assert_eq!(InputToken::from_char('q'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_digit() {
            return Some(Self::Digit(c));
        }
        match c {
            '.' => Some(Self::Decimal),
            '=' => Some(Self::Equal),
            _ => Operator::from_symbol(c).map(Self::Operator),
        }
    }

    /// Tokenize a script of expression characters, skipping whitespace.
    ///
    /// Unrecognized characters are dropped; this is a convenience for
    /// tests and demos, not a validating parser.
    pub fn script(input: &str) -> Vec<Self> {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(Self::from_char)
            .collect()
    }
}
