//! # Calculator Engine
//!
//! [`Calculator`] combines the register stack, the entry buffer and the
//! variable slots into the state machine behind an RPN keypad.
//!
//! Every keypad action is one method call. Inputs a constrained keypad can
//! legitimately send but that make no sense in the current state (a second
//! decimal point, ENTER on an empty buffer, an unknown operation token) are
//! swallowed and reported as [`Outcome::Ignored`]. Only a malformed entry
//! buffer on commit and recalling an empty variable slot are errors.
//!
//! ## Example
//!
//! ```rust
//! use rpn_core::Calculator;
//!
//! let mut calc = Calculator::new();
//! calc.append_digit("5");
//! calc.commit_entry()?;
//! calc.append_digit("3");
//! calc.commit_entry()?;
//! calc.apply_binary("add");
//!
//! assert_eq!(calc.render(), "0\n0\n0\n8\n");
//! # Ok::<(), rpn_core::RpnError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::entry::EntryBuffer;
use crate::errors::{RpnError, RpnResult};
use crate::operations::{BinaryOp, Constant, UnaryOp};
use crate::settings::CalculatorSettings;
use crate::stack::{Register, RegisterStack, REGISTER_COUNT};
use crate::variables::{VariableSlot, VariableStore};

/// Whether a request changed calculator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// State changed
    Applied,
    /// Request was a no-op in the current state
    Ignored,
}

impl Outcome {
    fn from_bool(applied: bool) -> Self {
        if applied {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// A single keypad action, already resolved to a typed operation.
///
/// Front ends translate whatever their buttons or key bindings produce into
/// one of these and hand it to [`Calculator::execute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "kebab-case")]
pub enum Command {
    /// Append a digit token to the entry buffer
    Digit(String),
    /// Append the decimal separator
    Separator,
    /// Flip the entry sign
    ToggleSign,
    /// Commit the entry buffer (ENTER)
    Enter,
    /// Remove the last typed character
    Backspace,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Constant(Constant),
    /// Rotate T into X
    RollUp,
    Store(VariableSlot),
    Recall(VariableSlot),
    /// Clear the entry buffer, or zero X when there is no entry
    ClearEntry,
    /// Forget the value stored in one slot
    ClearVariable(VariableSlot),
    /// Zero every register and the entry buffer
    ClearAll,
}

/// Four-register RPN calculator state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Calculator {
    stack: RegisterStack,
    entry: EntryBuffer,
    #[serde(default)]
    variables: VariableStore,
    #[serde(default)]
    settings: CalculatorSettings,
}

impl Calculator {
    /// Create a calculator with zeroed registers and an empty entry buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with custom settings.
    pub fn with_settings(settings: CalculatorSettings) -> RpnResult<Self> {
        settings.validate()?;
        Ok(Calculator {
            settings,
            ..Self::default()
        })
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    /// Replace the settings.
    ///
    /// A number being typed keeps its digits; its separator is rewritten to
    /// the new one so the entry still commits.
    pub fn set_settings(&mut self, settings: CalculatorSettings) -> RpnResult<()> {
        settings.validate()?;
        self.entry
            .convert_separator(self.settings.decimal_separator, settings.decimal_separator);
        self.settings = settings;
        Ok(())
    }

    /// Check state restored from outside the keypad (e.g. a session file).
    ///
    /// Settings must be in range and the entry buffer must be something the
    /// keypad could have produced.
    pub fn validate(&self) -> RpnResult<()> {
        self.settings.validate()?;
        if !self.entry.is_well_formed(self.settings.decimal_separator) {
            return Err(RpnError::SerializationError {
                reason: format!("entry buffer '{}' is not a number being typed", self.entry),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn stack(&self) -> &RegisterStack {
        &self.stack
    }

    /// Register values indexed X first
    pub fn registers(&self) -> [f64; REGISTER_COUNT] {
        self.stack.values()
    }

    pub fn register(&self, register: Register) -> f64 {
        self.stack.get(register)
    }

    pub fn x(&self) -> f64 {
        self.stack.x()
    }

    /// Text currently in the entry buffer
    pub fn entry(&self) -> &str {
        self.entry.as_str()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Multi-line display: T, Z, Y, X, then the entry buffer.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Register::DISPLAY_ORDER
            .iter()
            .map(|r| self.settings.format_value(self.stack.get(*r)))
            .collect();
        lines.push(self.entry.as_str().to_string());
        lines.join("\n")
    }

    // ------------------------------------------------------------------
    // Entry editing
    // ------------------------------------------------------------------

    pub fn append_digit(&mut self, token: &str) -> Outcome {
        let applied = self.entry.append_digit(token);
        if !applied {
            debug!(token, "ignoring non-integer digit token");
        }
        Outcome::from_bool(applied)
    }

    pub fn append_separator(&mut self) -> Outcome {
        let applied = self.entry.append_separator(self.settings.decimal_separator);
        if !applied {
            debug!(entry = self.entry.as_str(), "entry already has a separator");
        }
        Outcome::from_bool(applied)
    }

    pub fn toggle_sign(&mut self) -> Outcome {
        self.entry.toggle_sign();
        Outcome::Applied
    }

    pub fn backspace(&mut self) -> Outcome {
        Outcome::from_bool(self.entry.backspace())
    }

    /// Push the entry buffer onto the stack.
    ///
    /// An empty buffer is a no-op. A buffer that does not parse as a number
    /// returns [`crate::RpnError::Parse`] and leaves both stack and buffer
    /// untouched.
    pub fn commit_entry(&mut self) -> RpnResult<Outcome> {
        let Some(value) = self.entry.parse(self.settings.decimal_separator)? else {
            debug!("commit on empty entry");
            return Ok(Outcome::Ignored);
        };
        self.stack.lift_and_insert(value);
        self.entry.clear();
        trace!(value, "entry committed");
        Ok(Outcome::Applied)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Apply a binary operation by token; unknown tokens are ignored.
    pub fn apply_binary(&mut self, token: &str) -> Outcome {
        match BinaryOp::from_token(token) {
            Some(op) => self.binary(op),
            None => {
                debug!(token, "ignoring unrecognized binary operation");
                Outcome::Ignored
            }
        }
    }

    /// Apply a unary operation by token; unknown tokens are ignored.
    pub fn apply_unary(&mut self, token: &str) -> Outcome {
        match UnaryOp::from_token(token) {
            Some(op) => self.unary(op),
            None => {
                debug!(token, "ignoring unrecognized unary operation");
                Outcome::Ignored
            }
        }
    }

    /// Push a constant by token; unknown tokens are ignored.
    pub fn apply_constant(&mut self, token: &str) -> Outcome {
        match Constant::from_token(token) {
            Some(constant) => self.constant(constant),
            None => {
                debug!(token, "ignoring unrecognized constant");
                Outcome::Ignored
            }
        }
    }

    /// Replace X and Y with `Y <op> X`; the stack drops one level.
    pub fn binary(&mut self, op: BinaryOp) -> Outcome {
        let (y, x) = (self.stack.y(), self.stack.x());
        let result = op.apply(y, x);
        self.stack.drop_and_replace(result);
        trace!(%op, y, x, result, "binary operation");
        Outcome::Applied
    }

    /// Replace X with `op(X)`.
    pub fn unary(&mut self, op: UnaryOp) -> Outcome {
        let x = self.stack.x();
        let result = op.apply(x);
        self.stack.overwrite_x(result);
        trace!(%op, x, result, "unary operation");
        Outcome::Applied
    }

    /// Push a constant; the stack lifts one level.
    pub fn constant(&mut self, constant: Constant) -> Outcome {
        self.stack.lift_and_insert(constant.value());
        trace!(%constant, "constant pushed");
        Outcome::Applied
    }

    // ------------------------------------------------------------------
    // Stack manipulation
    // ------------------------------------------------------------------

    /// Rotate the stack: T moves to X, nothing is lost.
    pub fn roll_up(&mut self) -> Outcome {
        self.stack.roll_up();
        Outcome::Applied
    }

    /// Overwrite X directly, bypassing the entry buffer.
    pub fn set_x(&mut self, value: f64) {
        self.stack.overwrite_x(value);
    }

    /// Clear the entry buffer if anything is typed, otherwise zero X.
    pub fn clear_entry(&mut self) -> Outcome {
        if self.entry.is_empty() {
            self.stack.overwrite_x(0.0);
        } else {
            self.entry.clear();
        }
        Outcome::Applied
    }

    /// Zero all registers and the entry buffer. Variables are kept.
    pub fn clear_all(&mut self) -> Outcome {
        self.stack.clear();
        self.entry.clear();
        Outcome::Applied
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Save X under `slot`; the stack is unchanged.
    pub fn store(&mut self, slot: VariableSlot) {
        let value = self.stack.x();
        self.variables.store(slot, value);
        trace!(%slot, value, "stored");
    }

    /// Forget the value stored under `slot`.
    pub fn clear_variable(&mut self, slot: VariableSlot) -> Outcome {
        let cleared = self.variables.clear_slot(slot);
        if cleared.is_none() {
            debug!(%slot, "slot already empty");
        }
        Outcome::from_bool(cleared.is_some())
    }

    /// Push the value stored under `slot`.
    ///
    /// Fails with [`crate::RpnError::UnsetVariable`] if nothing was stored;
    /// the stack is left unchanged in that case.
    pub fn recall(&mut self, slot: VariableSlot) -> RpnResult<()> {
        let value = self.variables.recall(slot)?;
        self.stack.lift_and_insert(value);
        trace!(%slot, value, "recalled");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Run one keypad command.
    pub fn execute(&mut self, command: Command) -> RpnResult<Outcome> {
        let outcome = match command {
            Command::Digit(token) => self.append_digit(&token),
            Command::Separator => self.append_separator(),
            Command::ToggleSign => self.toggle_sign(),
            Command::Enter => return self.commit_entry(),
            Command::Backspace => self.backspace(),
            Command::Binary(op) => self.binary(op),
            Command::Unary(op) => self.unary(op),
            Command::Constant(constant) => self.constant(constant),
            Command::RollUp => self.roll_up(),
            Command::Store(slot) => {
                self.store(slot);
                Outcome::Applied
            }
            Command::Recall(slot) => {
                self.recall(slot)?;
                Outcome::Applied
            }
            Command::ClearEntry => self.clear_entry(),
            Command::ClearVariable(slot) => self.clear_variable(slot),
            Command::ClearAll => self.clear_all(),
        };
        Ok(outcome)
    }
}

impl std::fmt::Display for Calculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
