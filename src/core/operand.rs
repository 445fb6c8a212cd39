//! Text accumulation for a single operand slot.
//!
//! An operand is entered one character at a time, so it lives as a text
//! buffer until something needs its numeric value. Parsing happens
//! lazily on read; partial entries like `"12."` or `"0."` stay valid in
//! the buffer instead of being rejected as malformed numbers mid-entry.

use serde::{Deserialize, Serialize};

/// Accumulating text buffer for one operand slot.
///
/// Invariant: the text holds digit characters plus at most one decimal
/// point, and `decimal_active` is true exactly when the text contains a
/// point. (A buffer rebuilt from a computed result may additionally
/// carry a leading minus sign.)
///
/// # Example
///
/// ```rust
/// use tally::core::OperandBuffer;
///
/// let mut buffer = OperandBuffer::new();
/// assert!(buffer.push_digit('1'));
/// assert!(buffer.push_digit('2'));
/// assert!(buffer.push_decimal());
/// assert_eq!(buffer.as_str(), "12.");
/// assert_eq!(buffer.value(), Some(12.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperandBuffer {
    text: String,
    decimal_active: bool,
}

impl OperandBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a buffer from stored operand text.
    ///
    /// Validates the buffer invariant: at most one decimal point, and
    /// nothing the lazy parse could not read back. Returns `None` for
    /// text that was never produced by this type.
    pub fn from_text(text: &str) -> Option<Self> {
        if text.is_empty() {
            return Some(Self::new());
        }
        if text.matches('.').count() > 1 {
            return None;
        }
        let numeric = text.strip_suffix('.').unwrap_or(text);
        numeric.parse::<f64>().ok()?;
        Some(Self {
            text: text.to_string(),
            decimal_active: text.contains('.'),
        })
    }

    /// Append a digit character.
    ///
    /// Returns false (buffer unchanged) for anything that is not an
    /// ASCII digit.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        self.text.push(digit);
        true
    }

    /// Append the decimal point, once.
    ///
    /// A second point is ignored and returns false. An empty buffer
    /// gains a leading zero so the text reads `"0."` rather than `"."`.
    pub fn push_decimal(&mut self) -> bool {
        if self.decimal_active {
            return false;
        }
        if self.text.is_empty() {
            self.text.push('0');
        }
        self.text.push('.');
        self.decimal_active = true;
        true
    }

    /// Remove and return the last character (backspace).
    ///
    /// Popping the decimal point clears the decimal flag.
    pub fn pop(&mut self) -> Option<char> {
        let removed = self.text.pop()?;
        if removed == '.' {
            self.decimal_active = false;
        }
        Some(removed)
    }

    /// Overwrite the buffer with the canonical text of a computed value.
    ///
    /// Used when a chained evaluation folds its result back into the
    /// left operand slot.
    pub fn replace_with_value(&mut self, value: f64) {
        self.text = value.to_string();
        self.decimal_active = self.text.contains('.');
    }

    /// Parse the accumulated text to a floating-point value.
    ///
    /// The parse is lazy and tolerant of a trailing decimal point:
    /// `"12."` reads as 12.0. An empty buffer reads as `None`.
    pub fn value(&self) -> Option<f64> {
        if self.text.is_empty() {
            return None;
        }
        let numeric = self.text.strip_suffix('.').unwrap_or(&self.text);
        numeric.parse().ok()
    }

    /// The raw accumulated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether a decimal point has been accepted into this operand.
    pub fn decimal_active(&self) -> bool {
        self.decimal_active
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Reset to the empty buffer.
    pub fn clear(&mut self) {
        self.text.clear();
        self.decimal_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_accumulate_in_order() {
        let mut buffer = OperandBuffer::new();
        for digit in ['1', '2', '0'] {
            assert!(buffer.push_digit(digit));
        }
        assert_eq!(buffer.as_str(), "120");
        assert_eq!(buffer.value(), Some(120.0));
    }

    #[test]
    fn non_digit_characters_are_rejected() {
        let mut buffer = OperandBuffer::new();
        assert!(!buffer.push_digit('a'));
        assert!(!buffer.push_digit('.'));
        assert!(!buffer.push_digit('-'));
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_buffer_reads_as_none() {
        let buffer = OperandBuffer::new();
        assert_eq!(buffer.value(), None);
    }

    #[test]
    fn decimal_on_empty_buffer_gains_leading_zero() {
        let mut buffer = OperandBuffer::new();
        assert!(buffer.push_decimal());
        assert_eq!(buffer.as_str(), "0.");
        assert_eq!(buffer.value(), Some(0.0));
    }

    #[test]
    fn second_decimal_is_ignored() {
        let mut buffer = OperandBuffer::new();
        buffer.push_digit('3');
        assert!(buffer.push_decimal());
        assert!(!buffer.push_decimal());
        assert_eq!(buffer.as_str(), "3.");
    }

    #[test]
    fn trailing_decimal_parses_without_error() {
        let mut buffer = OperandBuffer::new();
        buffer.push_digit('1');
        buffer.push_digit('2');
        buffer.push_decimal();
        assert_eq!(buffer.value(), Some(12.0));

        buffer.push_digit('5');
        assert_eq!(buffer.value(), Some(12.5));
    }

    #[test]
    fn pop_removes_last_character() {
        let mut buffer = OperandBuffer::new();
        buffer.push_digit('4');
        buffer.push_digit('2');
        assert_eq!(buffer.pop(), Some('2'));
        assert_eq!(buffer.as_str(), "4");
    }

    #[test]
    fn popping_the_point_clears_the_decimal_flag() {
        let mut buffer = OperandBuffer::new();
        buffer.push_digit('1');
        buffer.push_decimal();
        assert!(buffer.decimal_active());

        assert_eq!(buffer.pop(), Some('.'));
        assert!(!buffer.decimal_active());

        // The point can be re-entered after being cleared
        assert!(buffer.push_decimal());
        assert_eq!(buffer.as_str(), "1.");
    }

    #[test]
    fn pop_on_empty_buffer_returns_none() {
        let mut buffer = OperandBuffer::new();
        assert_eq!(buffer.pop(), None);
    }

    #[test]
    fn replace_with_value_writes_canonical_text() {
        let mut buffer = OperandBuffer::new();
        buffer.replace_with_value(11.0);
        assert_eq!(buffer.as_str(), "11");
        assert!(!buffer.decimal_active());

        buffer.replace_with_value(2.5);
        assert_eq!(buffer.as_str(), "2.5");
        assert!(buffer.decimal_active());
    }

    #[test]
    fn clear_resets_text_and_flag() {
        let mut buffer = OperandBuffer::new();
        buffer.push_digit('7');
        buffer.push_decimal();
        buffer.clear();
        assert!(buffer.is_empty());
        assert!(!buffer.decimal_active());
    }

    #[test]
    fn from_text_restores_flag_from_text() {
        let buffer = OperandBuffer::from_text("12.").unwrap();
        assert!(buffer.decimal_active());
        assert_eq!(buffer.value(), Some(12.0));

        let buffer = OperandBuffer::from_text("120").unwrap();
        assert!(!buffer.decimal_active());

        let buffer = OperandBuffer::from_text("").unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn from_text_rejects_malformed_buffers() {
        assert!(OperandBuffer::from_text("1.2.3").is_none());
        assert!(OperandBuffer::from_text("abc").is_none());
    }

    #[test]
    fn from_text_accepts_negative_results() {
        // Chained results may fold a negative value into the left slot
        let buffer = OperandBuffer::from_text("-5").unwrap();
        assert_eq!(buffer.value(), Some(-5.0));
    }

    #[test]
    fn buffer_serializes_correctly() {
        let mut buffer = OperandBuffer::new();
        buffer.push_digit('9');
        buffer.push_decimal();

        let json = serde_json::to_string(&buffer).unwrap();
        let deserialized: OperandBuffer = serde_json::from_str(&json).unwrap();
        assert_eq!(buffer, deserialized);
    }
}
