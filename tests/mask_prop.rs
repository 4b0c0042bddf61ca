//! Masked phone input property tests
//!
//! Formatting laws of the template plus invariants that must survive any
//! sequence of editing events on a focused field.

use phonebook::field::{FieldEvent, PhoneInput};
use phonebook::mask::{format_display, is_separator, EditKey, RawDigits, MAX_DIGITS};
use proptest::test_runner::Config as ProptestConfig;
use proptest::{prelude::*, prop_oneof};

#[derive(Debug, Clone)]
enum Operation {
    Key(EditKey),
    Paste(String),
}

impl Operation {
    /// 内容を書き換えうる操作か（カーソル移動以外）
    fn edits(&self) -> bool {
        !matches!(
            self,
            Operation::Key(EditKey::Left | EditKey::Right | EditKey::Home | EditKey::End)
        )
    }
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    let typed = prop::sample::select(vec!['0', '1', '5', '7', '8', '9', 'a', ' ', '-', '(', '+'])
        .prop_map(|ch| Operation::Key(EditKey::Char(ch)));
    let keys = prop::sample::select(vec![
        EditKey::Backspace,
        EditKey::Delete,
        EditKey::Left,
        EditKey::Right,
        EditKey::Home,
        EditKey::End,
    ])
    .prop_map(Operation::Key);
    let paste = "[0-9 ()+-]{1,14}".prop_map(Operation::Paste);

    prop_oneof![4 => typed, 3 => keys, 1 => paste]
}

fn caret_after_separator(value: &str, caret: usize) -> bool {
    caret > 0 && value.chars().nth(caret - 1).is_some_and(is_separator)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn formatting_is_idempotent(text in "[0-9a-z +()-]{0,30}") {
        let display = format_display(&text);
        prop_assert_eq!(format_display(&display), display);
    }

    #[test]
    fn digits_survive_formatting(digits in "[0-689][0-9]{0,9}") {
        let display = format_display(&digits);
        let parsed = RawDigits::from_input(&display);
        prop_assert_eq!(parsed.as_str(), digits.as_str());
    }

    #[test]
    fn leading_country_digit_is_normalised(digits in "[0-689][0-9]{9}") {
        prop_assert_eq!(format_display(&format!("7{}", digits)), format_display(&digits));
    }

    #[test]
    fn long_input_keeps_first_ten_digits(digits in "[0-689][0-9]{10,20}") {
        let raw = RawDigits::from_input(&digits);
        prop_assert_eq!(raw.len(), MAX_DIGITS);
        prop_assert!(digits.starts_with(raw.as_str()));
    }

    #[test]
    fn typed_digits_are_kept_and_a_full_number_never_changes(digits in "[0-9]{1,16}") {
        let mut input = PhoneInput::new();
        input.handle(FieldEvent::Focus);
        let mut full: Option<String> = None;

        for ch in digits.chars() {
            input.handle(FieldEvent::Key(EditKey::Char(ch)));
            let current = input.digits().as_str().to_string();
            if let Some(first_ten) = &full {
                prop_assert_eq!(&current, first_ten);
            } else if input.digits().is_complete() {
                full = Some(current);
            }
        }

        let expected: String = digits.chars().take(MAX_DIGITS).collect();
        let actual = input.digits();
        prop_assert_eq!(actual.as_str(), expected.as_str());
    }

    #[test]
    fn edits_keep_field_canonical_and_caret_on_digits(
        ops in proptest::collection::vec(operation_strategy(), 0..40)
    ) {
        let mut input = PhoneInput::new();
        input.handle(FieldEvent::Focus);

        for op in ops {
            let edits = op.edits();
            match op {
                Operation::Key(key) => input.handle(FieldEvent::Key(key)),
                Operation::Paste(text) => input.handle(FieldEvent::Paste(text)),
            }

            let value = input.value().to_string();
            prop_assert_eq!(format_display(&value), value.clone());
            prop_assert!(input.caret() <= value.chars().count());
            prop_assert!(!input.has_pending_tasks());

            if edits && input.selection().is_collapsed() {
                prop_assert!(
                    !caret_after_separator(&value, input.caret()),
                    "caret {} rests after a separator in {:?}",
                    input.caret(),
                    value
                );
            }
        }
    }
}
