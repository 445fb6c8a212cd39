//! Property-based tests for the expression engine.
//!
//! These tests use proptest to verify the engine's invariants hold
//! across many randomly generated input sequences.

use proptest::prelude::*;
use tally::core::{EngineState, InputToken, Operator};
use tally::engine::Engine;

prop_compose! {
    fn arbitrary_digit()(value in 0..10u32) -> char {
        char::from_digit(value, 10).unwrap()
    }
}

prop_compose! {
    fn arbitrary_operator()(variant in 0..4u8) -> Operator {
        match variant {
            0 => Operator::Add,
            1 => Operator::Subtract,
            2 => Operator::Multiply,
            _ => Operator::Divide,
        }
    }
}

prop_compose! {
    fn non_divide_operator()(variant in 0..3u8) -> Operator {
        match variant {
            0 => Operator::Add,
            1 => Operator::Subtract,
            _ => Operator::Multiply,
        }
    }
}

fn arbitrary_token() -> impl Strategy<Value = InputToken> {
    prop_oneof![
        4 => arbitrary_digit().prop_map(InputToken::Digit),
        2 => Just(InputToken::Decimal),
        2 => arbitrary_operator().prop_map(InputToken::Operator),
        1 => Just(InputToken::Equal),
        2 => Just(InputToken::ClearDigit),
        1 => Just(InputToken::ClearMemory),
    ]
}

fn feed_digits(engine: &mut Engine, digits: &[char]) {
    for &digit in digits {
        engine.apply(InputToken::Digit(digit));
    }
}

proptest! {
    #[test]
    fn digit_sequences_accumulate_to_their_concatenated_value(
        digits in prop::collection::vec(arbitrary_digit(), 1..9)
    ) {
        let mut engine = Engine::new();
        feed_digits(&mut engine, &digits);

        let text: String = digits.iter().collect();
        let expected: f64 = text.parse().unwrap();

        prop_assert_eq!(engine.state(), EngineState::Left);
        prop_assert_eq!(engine.left_text(), text.as_str());
        prop_assert_eq!(engine.left_value(), Some(expected));
    }

    #[test]
    fn decimal_entry_is_idempotent(
        digits in prop::collection::vec(arbitrary_digit(), 0..5),
        repeats in 1..5usize
    ) {
        let mut once = Engine::new();
        feed_digits(&mut once, &digits);
        once.apply(InputToken::Decimal);

        let mut many = Engine::new();
        feed_digits(&mut many, &digits);
        for _ in 0..repeats {
            many.apply(InputToken::Decimal);
        }

        prop_assert_eq!(once.snapshot(), many.snapshot());
    }

    #[test]
    fn divide_by_zero_always_resets(
        digits in prop::collection::vec(arbitrary_digit(), 1..6)
    ) {
        let mut engine = Engine::new();
        feed_digits(&mut engine, &digits);
        engine.apply(InputToken::Operator(Operator::Divide));
        engine.apply(InputToken::Digit('0'));
        let snapshot = engine.apply(InputToken::Equal);

        prop_assert_eq!(snapshot.state, EngineState::Initial);
        prop_assert!(snapshot.is_empty());
    }

    #[test]
    fn backspace_round_trip_undoes_left_operand_entry(
        digits in prop::collection::vec(arbitrary_digit(), 1..8)
    ) {
        let mut engine = Engine::new();
        feed_digits(&mut engine, &digits);

        let entered = engine.left_text().len();
        for _ in 0..entered {
            engine.apply(InputToken::ClearDigit);
        }

        prop_assert_eq!(engine.state(), EngineState::Initial);
        prop_assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn backspace_round_trip_undoes_right_operand_entry(
        left in prop::collection::vec(arbitrary_digit(), 1..4),
        operator in arbitrary_operator(),
        right in prop::collection::vec(arbitrary_digit(), 1..6)
    ) {
        let mut engine = Engine::new();
        feed_digits(&mut engine, &left);
        engine.apply(InputToken::Operator(operator));
        feed_digits(&mut engine, &right);

        let entered = engine.right_text().len();
        for _ in 0..entered {
            engine.apply(InputToken::ClearDigit);
        }

        let expected_left: String = left.iter().collect();
        prop_assert_eq!(engine.state(), EngineState::Operand);
        prop_assert_eq!(engine.left_text(), expected_left.as_str());
        prop_assert_eq!(engine.operator(), Some(operator));
        prop_assert!(engine.right_text().is_empty());
    }

    #[test]
    fn chaining_folds_the_pending_expression_into_the_left_slot(
        left in prop::collection::vec(arbitrary_digit(), 1..5),
        first in non_divide_operator(),
        right in prop::collection::vec(arbitrary_digit(), 1..5),
        second in arbitrary_operator()
    ) {
        let mut engine = Engine::new();
        feed_digits(&mut engine, &left);
        engine.apply(InputToken::Operator(first));
        feed_digits(&mut engine, &right);
        let snapshot = engine.apply(InputToken::Operator(second));

        let left_value: f64 = left.iter().collect::<String>().parse().unwrap();
        let right_value: f64 = right.iter().collect::<String>().parse().unwrap();
        let expected = first.apply(left_value, right_value);

        prop_assert_eq!(snapshot.state, EngineState::Operand);
        prop_assert_eq!(engine.left_value(), Some(expected));
        prop_assert_eq!(engine.operator(), Some(second));
        prop_assert!(engine.right_text().is_empty());
    }

    #[test]
    fn repeated_equal_is_idempotent(
        left in prop::collection::vec(arbitrary_digit(), 1..5),
        operator in non_divide_operator(),
        right in prop::collection::vec(arbitrary_digit(), 1..5),
        presses in 1..5usize
    ) {
        let mut engine = Engine::new();
        feed_digits(&mut engine, &left);
        engine.apply(InputToken::Operator(operator));
        feed_digits(&mut engine, &right);

        let first = engine.apply(InputToken::Equal);
        let mut last = first.clone();
        for _ in 1..presses {
            last = engine.apply(InputToken::Equal);
        }

        prop_assert_eq!(first.result, last.result);
        prop_assert_eq!(last.state, EngineState::Equal);
    }

    #[test]
    fn arbitrary_token_sequences_preserve_invariants(
        tokens in prop::collection::vec(arbitrary_token(), 0..60)
    ) {
        let mut engine = Engine::new();
        for token in tokens {
            let snapshot = engine.apply(token);

            // At most one decimal point per operand text
            if let Some(left) = &snapshot.left {
                prop_assert!(left.matches('.').count() <= 1);
            }
            if let Some(right) = &snapshot.right {
                prop_assert!(right.matches('.').count() <= 1);
            }

            // The operator exists only once a left operand does
            if snapshot.operator.is_some() {
                prop_assert!(matches!(
                    snapshot.state,
                    EngineState::Operand | EngineState::Right | EngineState::Equal
                ));
                prop_assert!(snapshot.left.is_some());
            }

            // A result exists only in the Equal state, and it is never
            // NaN or infinite
            if let Some(result) = snapshot.result {
                prop_assert_eq!(snapshot.state, EngineState::Equal);
                prop_assert!(result.is_finite());
            }

            // Structural states imply their fields
            match snapshot.state {
                EngineState::Initial => prop_assert!(snapshot.is_empty()),
                EngineState::Left => prop_assert!(snapshot.left.is_some()),
                EngineState::Operand | EngineState::Right | EngineState::Equal => {
                    prop_assert!(snapshot.left.is_some());
                    prop_assert!(snapshot.operator.is_some());
                }
            }
        }
    }

    #[test]
    fn rejected_tokens_leave_the_snapshot_unchanged(
        setup in prop::collection::vec(arbitrary_token(), 0..20),
        probe in arbitrary_token()
    ) {
        let mut engine = Engine::new();
        for token in setup {
            engine.apply(token);
        }

        if !engine.accepts(&probe) {
            let before = engine.snapshot();
            let after = engine.apply(probe);
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn lazy_parse_never_fails_mid_entry(
        tokens in prop::collection::vec(
            prop_oneof![
                3 => arbitrary_digit().prop_map(InputToken::Digit),
                1 => Just(InputToken::Decimal),
            ],
            1..12
        )
    ) {
        let mut engine = Engine::new();
        for token in tokens {
            engine.apply(token);
        }

        // Whatever partial text was entered ("12.", "0.", "007"),
        // reading it back parses
        prop_assert!(engine.left_value().is_some());
    }
}
