//! Phone input end-to-end scenarios
//!
//! Drives `PhoneInput` the way the terminal does: focus, key presses and
//! pastes, each followed by the end of the event-loop turn.

use phonebook::field::{FieldEvent, PhoneInput};
use phonebook::mask::{CaretSettle, EditKey};
use phonebook::validation::is_valid_phone;

fn focused() -> PhoneInput {
    let mut input = PhoneInput::new();
    input.handle(FieldEvent::Focus);
    input
}

fn type_keys(input: &mut PhoneInput, text: &str) {
    for ch in text.chars() {
        input.handle(FieldEvent::Key(EditKey::Char(ch)));
    }
}

fn press(input: &mut PhoneInput, key: EditKey, times: usize) {
    for _ in 0..times {
        input.handle(FieldEvent::Key(key));
    }
}

#[test]
fn typing_builds_the_template_progressively() {
    let mut input = focused();
    assert_eq!(input.value(), "+7");
    assert_eq!(input.caret(), 2);

    let expected = [
        ('9', "+7 (9"),
        ('1', "+7 (91"),
        ('2', "+7 (912"),
        ('3', "+7 (912) 3"),
        ('4', "+7 (912) 34"),
        ('5', "+7 (912) 345"),
        ('6', "+7 (912) 345-6"),
        ('7', "+7 (912) 345-67"),
        ('8', "+7 (912) 345-67-8"),
        ('9', "+7 (912) 345-67-89"),
    ];
    for (ch, display) in expected {
        type_keys(&mut input, &ch.to_string());
        assert_eq!(input.value(), display);
        assert_eq!(input.caret(), display.chars().count());
    }
    assert!(is_valid_phone(input.value()));
}

#[test]
fn eleventh_digit_is_dropped_silently() {
    let mut input = focused();
    type_keys(&mut input, "99912345678");
    assert_eq!(input.value(), "+7 (999) 123-45-67");
    assert!(input.digits().is_complete());
}

#[test]
fn extra_digit_never_shifts_a_number_starting_with_seven() {
    let mut input = focused();
    type_keys(&mut input, "7991234567");
    assert_eq!(input.value(), "+7 (799) 123-45-67");

    type_keys(&mut input, "1");
    assert_eq!(input.value(), "+7 (799) 123-45-67");
    assert_eq!(input.caret(), 18);
    assert_eq!(input.digits().as_str(), "7991234567");

    type_keys(&mut input, "77");
    assert_eq!(input.value(), "+7 (799) 123-45-67");
}

#[test]
fn backspace_walks_back_over_group_boundaries() {
    let mut input = focused();
    type_keys(&mut input, "9991");
    assert_eq!(input.value(), "+7 (999) 1");

    press(&mut input, EditKey::Backspace, 1);
    assert_eq!(input.value(), "+7 (999");
    assert_eq!(input.caret(), 7);

    press(&mut input, EditKey::Backspace, 3);
    assert_eq!(input.value(), "+7");
    assert_eq!(input.caret(), 2);
}

#[test]
fn delete_skips_separators_then_removes_the_digit() {
    let mut input = focused();
    type_keys(&mut input, "912345");
    press(&mut input, EditKey::Left, 5);
    assert_eq!(input.caret(), 7);

    // 1回目は区切りを選択するだけ
    press(&mut input, EditKey::Delete, 1);
    assert_eq!(input.value(), "+7 (912) 345");
    assert_eq!((input.selection().start, input.selection().end), (7, 9));

    press(&mut input, EditKey::Delete, 1);
    assert_eq!(input.value(), "+7 (912) 45");
    assert!(input.selection().is_collapsed());
}

#[test]
fn insertion_in_the_middle_reflows_groups() {
    let mut input = focused();
    type_keys(&mut input, "912345");
    press(&mut input, EditKey::Left, 7);
    assert_eq!(input.caret(), 5);

    type_keys(&mut input, "0");
    assert_eq!(input.value(), "+7 (901) 234-5");
    assert_eq!(input.caret(), 14);
}

#[test]
fn seven_after_prefix_is_kept_as_a_digit() {
    let mut input = focused();
    type_keys(&mut input, "79");
    assert_eq!(input.value(), "+7 (79");
    assert_eq!(input.digits().as_str(), "79");
}

#[test]
fn pasted_numbers_are_normalised() {
    let cases = [
        ("79991234567", "+7 (999) 123-45-67"),
        ("+7 (999) 123-45-67", "+7 (999) 123-45-67"),
        ("999-123-45-67 доб. 89", "+7 (999) 123-45-67"),
        ("12", "+7 (12"),
        ("7991234567", "+7 (799) 123-45-67"),
    ];
    for (paste, expected) in cases {
        let mut input = focused();
        input.handle(FieldEvent::Paste(paste.to_string()));
        assert_eq!(input.value(), expected, "paste {paste:?}");
    }
}

#[test]
fn focus_does_not_move_caret_inside_a_number() {
    let mut input = focused();
    type_keys(&mut input, "912");
    press(&mut input, EditKey::Left, 2);

    input.handle(FieldEvent::Focus);
    assert_eq!(input.value(), "+7 (912");
    assert_eq!(input.caret(), 5);
}

#[test]
fn immediate_and_deferred_settle_agree() {
    let script = "9a12 3";
    let mut deferred = PhoneInput::with_caret_settle(CaretSettle::Deferred);
    let mut immediate = PhoneInput::with_caret_settle(CaretSettle::Immediate);

    for input in [&mut deferred, &mut immediate] {
        input.handle(FieldEvent::Focus);
        type_keys(input, script);
        press(input, EditKey::Backspace, 2);
    }

    assert_eq!(deferred.value(), immediate.value());
    assert_eq!(deferred.caret(), immediate.caret());
    assert!(!deferred.has_pending_tasks());
}
