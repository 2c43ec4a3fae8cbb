//! Keypad token mapping.
//!
//! Translates what a user types on the command line (words, operator
//! symbols, calculator glyphs, plain numbers) into engine [`Command`]s.
//! Display glyphs stop here; the engine only sees typed operations.

use rpn_core::{BinaryOp, Command, Constant, RpnError, RpnResult, UnaryOp, VariableSlot};

/// Resolve one whitespace-separated token into the commands it stands for.
///
/// A number such as `12`, `-3` or `0.25` expands to ENTER (finishing any
/// number already typed, a no-op otherwise) followed by the digit, separator
/// and sign keys that type it. The new number stays in the entry buffer.
pub fn parse_token(token: &str) -> RpnResult<Vec<Command>> {
    if let Some(commands) = parse_number(token) {
        return Ok(commands);
    }
    parse_key(token).map(|command| vec![command])
}

/// Whether a pending entry should be committed before running `command`.
///
/// Matches a hardware keypad: pressing an operation key finishes the number
/// being typed.
pub fn commits_entry_first(command: &Command) -> bool {
    matches!(
        command,
        Command::Binary(_)
            | Command::Unary(_)
            | Command::Constant(_)
            | Command::RollUp
            | Command::Store(_)
            | Command::Recall(_)
    )
}

fn parse_number(token: &str) -> Option<Vec<Command>> {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }
    if body.matches(['.', ',']).count() > 1 {
        return None;
    }

    let mut commands = vec![Command::Enter];
    commands.extend(body.chars().map(|c| match c {
        '.' | ',' => Command::Separator,
        digit => Command::Digit(digit.to_string()),
    }));
    if negative {
        commands.push(Command::ToggleSign);
    }
    Some(commands)
}

fn parse_key(token: &str) -> RpnResult<Command> {
    if let Some((verb, slot)) = token.split_once(':') {
        let slot = VariableSlot::from_str_flexible(slot)?;
        return match verb.to_lowercase().as_str() {
            "sto" | "store" => Ok(Command::Store(slot)),
            "rcl" | "recall" => Ok(Command::Recall(slot)),
            "clv" => Ok(Command::ClearVariable(slot)),
            _ => Err(RpnError::unknown_command(token)),
        };
    }

    let lower = token.to_lowercase();
    let command = match lower.as_str() {
        "enter" | "⏎" | "↵" => Command::Enter,
        "chs" | "±" | "+/-" => Command::ToggleSign,
        "." | "," => Command::Separator,
        "bksp" | "⌫" | "←" => Command::Backspace,
        "clx" | "ce" => Command::ClearEntry,
        "clear" | "ac" => Command::ClearAll,
        "roll" | "r↑" | "rup" => Command::RollUp,

        "+" => Command::Binary(BinaryOp::Add),
        "-" | "−" => Command::Binary(BinaryOp::Subtract),
        "*" | "×" | "x" => Command::Binary(BinaryOp::Multiply),
        "/" | "÷" => Command::Binary(BinaryOp::Divide),
        "^" | "yˣ" | "y^x" | "pow" => Command::Binary(BinaryOp::Power),
        "ˣ√y" | "xrt" => Command::Binary(BinaryOp::Root),

        "x²" | "sq" | "x^2" => Command::Unary(UnaryOp::Square),
        "√" | "sqrt" => Command::Unary(UnaryOp::SquareRoot),
        "log" => Command::Unary(UnaryOp::Log10),
        "10ˣ" | "10^x" | "alog" => Command::Unary(UnaryOp::TenToX),
        "eˣ" | "e^x" => Command::Unary(UnaryOp::Exp),

        "π" => Command::Constant(Constant::Pi),

        other => {
            if let Some(op) = BinaryOp::from_token(other) {
                Command::Binary(op)
            } else if let Some(op) = UnaryOp::from_token(other) {
                Command::Unary(op)
            } else if let Some(constant) = Constant::from_token(other) {
                Command::Constant(constant)
            } else {
                return Err(RpnError::unknown_command(token));
            }
        }
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(token: &str) -> Command {
        let mut commands = parse_token(token).unwrap();
        assert_eq!(commands.len(), 1, "token {:?}", token);
        commands.remove(0)
    }

    #[test]
    fn test_numbers_expand_to_keystrokes() {
        assert_eq!(
            parse_token("12").unwrap(),
            vec![
                Command::Enter,
                Command::Digit("1".to_string()),
                Command::Digit("2".to_string()),
            ]
        );
        assert_eq!(
            parse_token("-0.5").unwrap(),
            vec![
                Command::Enter,
                Command::Digit("0".to_string()),
                Command::Separator,
                Command::Digit("5".to_string()),
                Command::ToggleSign,
            ]
        );
    }

    #[test]
    fn test_glyphs_map_to_operations() {
        assert_eq!(single("×"), Command::Binary(BinaryOp::Multiply));
        assert_eq!(single("÷"), Command::Binary(BinaryOp::Divide));
        assert_eq!(single("−"), Command::Binary(BinaryOp::Subtract));
        assert_eq!(single("-"), Command::Binary(BinaryOp::Subtract));
        assert_eq!(single("ˣ√y"), Command::Binary(BinaryOp::Root));
        assert_eq!(single("√"), Command::Unary(UnaryOp::SquareRoot));
        assert_eq!(single("x²"), Command::Unary(UnaryOp::Square));
        assert_eq!(single("π"), Command::Constant(Constant::Pi));
        assert_eq!(single("±"), Command::ToggleSign);
    }

    #[test]
    fn test_engine_tokens_pass_through() {
        assert_eq!(single("square-root"), Command::Unary(UnaryOp::SquareRoot));
        assert_eq!(single("ten-to-x"), Command::Unary(UnaryOp::TenToX));
        assert_eq!(single("ADD"), Command::Binary(BinaryOp::Add));
        assert_eq!(single("e"), Command::Constant(Constant::E));
        assert_eq!(single("atan"), Command::Unary(UnaryOp::Atan));
    }

    #[test]
    fn test_variable_keys() {
        assert_eq!(single("sto:a"), Command::Store(VariableSlot::A));
        assert_eq!(single("RCL:C"), Command::Recall(VariableSlot::C));
        assert_eq!(single("clv:b"), Command::ClearVariable(VariableSlot::B));
        assert_eq!(
            parse_token("sto:z").unwrap_err(),
            RpnError::unknown_slot("z")
        );
        assert_eq!(
            parse_token("put:a").unwrap_err(),
            RpnError::unknown_command("put:a")
        );
    }

    #[test]
    fn test_unknown_tokens() {
        for token in ["foo", "--", "1.2.x", "1.2.3", "1,2.5", "modulo"] {
            let err = parse_token(token).unwrap_err();
            assert_eq!(err.error_code(), "UNKNOWN_COMMAND", "token {:?}", token);
        }
        // A bare sign is an operator, not a number
        assert_eq!(single("+"), Command::Binary(BinaryOp::Add));
    }

    #[test]
    fn test_commit_before_operations() {
        assert!(commits_entry_first(&Command::Binary(BinaryOp::Add)));
        assert!(commits_entry_first(&Command::Recall(VariableSlot::A)));
        assert!(!commits_entry_first(&Command::Digit("1".to_string())));
        assert!(!commits_entry_first(&Command::ToggleSign));
        assert!(!commits_entry_first(&Command::ClearEntry));
    }
}
