//! End-to-end keypad scenarios against the public API.

use rpn_core::{Calculator, Outcome, VariableSlot};

#[test]
fn test_five_enter_three_enter_add() {
    let mut calc = Calculator::new();

    calc.append_digit("5");
    calc.commit_entry().unwrap();
    assert_eq!(calc.registers(), [5.0, 0.0, 0.0, 0.0]);

    calc.append_digit("3");
    calc.commit_entry().unwrap();
    assert_eq!(calc.registers(), [3.0, 5.0, 0.0, 0.0]);

    calc.apply_binary("add");
    assert_eq!(calc.registers(), [8.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_square_root_of_injected_value() {
    let mut calc = Calculator::new();
    calc.apply_constant("e");
    calc.apply_constant("pi");
    calc.set_x(9.0);
    let before = calc.registers();

    calc.apply_unary("square-root");
    let after = calc.registers();
    assert_eq!(after[0], 3.0);
    assert_eq!(after[1..], before[1..]);
}

#[test]
fn test_toggle_sign_twice_on_empty_buffer() {
    let mut calc = Calculator::new();
    calc.toggle_sign();
    assert_eq!(calc.entry(), "-");

    // Only the first character is inspected; a leading '-' gets a '+' in front
    calc.toggle_sign();
    assert_eq!(calc.entry(), "+-");
}

#[test]
fn test_toggle_sign_piles_up_on_digits() {
    let mut calc = Calculator::new();
    calc.append_digit("42");
    let mut seen = Vec::new();
    for _ in 0..4 {
        calc.toggle_sign();
        seen.push(calc.entry().to_string());
    }
    assert_eq!(seen, ["-42", "+-42", "--42", "+--42"]);
}

#[test]
fn test_pi_discards_old_t() {
    let mut calc = Calculator::new();
    for v in [1.0, 2.0, 3.0, 4.0] {
        calc.set_x(v);
        if v < 4.0 {
            calc.apply_constant("e");
        }
    }
    assert_eq!(calc.registers(), [4.0, 3.0, 2.0, 1.0]);

    calc.apply_constant("pi");
    let regs = calc.registers();
    assert!((regs[0] - 3.14159265358979).abs() < 1e-13);
    assert_eq!(regs[1..], [4.0, 3.0, 2.0]);
}

#[test]
fn test_double_separator_leaves_one() {
    let mut calc = Calculator::new();
    calc.append_digit("1");
    assert_eq!(calc.append_separator(), Outcome::Applied);
    assert_eq!(calc.append_separator(), Outcome::Ignored);
    assert_eq!(calc.entry(), "1.");
}

#[test]
fn test_commit_on_empty_buffer_changes_nothing() {
    let mut calc = Calculator::new();
    calc.set_x(7.0);
    let before = calc.render();
    assert_eq!(calc.commit_entry().unwrap(), Outcome::Ignored);
    assert_eq!(calc.render(), before);
}

#[test]
fn test_commit_then_render() {
    let mut calc = Calculator::new();
    calc.append_digit("4");
    calc.append_separator();
    calc.append_digit("25");
    assert_eq!(calc.render(), "0\n0\n0\n0\n4.25");

    calc.commit_entry().unwrap();
    assert_eq!(calc.render(), "0\n0\n0\n4.25\n");
}

#[test]
fn test_hypotenuse_with_variables() {
    // sqrt(3^2 + 4^2) keeping the legs in A and B
    let mut calc = Calculator::new();
    calc.append_digit("3");
    calc.commit_entry().unwrap();
    calc.store(VariableSlot::A);
    calc.apply_unary("square");

    calc.append_digit("4");
    calc.commit_entry().unwrap();
    calc.store(VariableSlot::B);
    calc.apply_unary("square");

    calc.apply_binary("add");
    calc.apply_unary("square-root");
    assert_eq!(calc.x(), 5.0);

    calc.recall(VariableSlot::A).unwrap();
    calc.recall(VariableSlot::B).unwrap();
    calc.apply_binary("multiply");
    let regs = calc.registers();
    assert_eq!(regs[..2], [12.0, 5.0]);
}

#[test]
fn test_t_stays_stable_across_repeated_binary_ops() {
    let mut calc = Calculator::new();
    for digit in ["2", "3", "4", "5"] {
        calc.append_digit(digit);
        calc.commit_entry().unwrap();
    }
    assert_eq!(calc.registers(), [5.0, 4.0, 3.0, 2.0]);

    calc.apply_binary("multiply");
    assert_eq!(calc.registers(), [20.0, 3.0, 2.0, 2.0]);
    calc.apply_binary("add");
    assert_eq!(calc.registers(), [23.0, 2.0, 2.0, 2.0]);
    calc.apply_binary("subtract");
    assert_eq!(calc.registers(), [-21.0, 2.0, 2.0, 2.0]);
}
