//! # Register Stack
//!
//! The four fixed registers of an RPN calculator and the primitives that
//! move values between them.
//!
//! ## Layout
//!
//! ```text
//! index 3  T   bottom, falls off on lift
//! index 2  Z
//! index 1  Y   earlier operand
//! index 0  X   top, the displayed value
//! ```
//!
//! ## Primitives
//!
//! | Primitive            | Used by                         | Effect                          |
//! |----------------------|---------------------------------|---------------------------------|
//! | [`RegisterStack::lift_and_insert`]  | entry commit, constants, recall | X→Y→Z→T, old T lost, new X |
//! | [`RegisterStack::overwrite_x`]      | unary results, `set_x`          | X replaced in place        |
//! | [`RegisterStack::drop_and_replace`] | binary results                  | Y→X, Z→Y, T→Z, T kept, new X |
//! | [`RegisterStack::roll_up`]          | user rotate                     | T→X, nothing lost          |
//!
//! ## Example
//!
//! ```rust
//! use rpn_core::stack::{Register, RegisterStack};
//!
//! let mut stack = RegisterStack::new();
//! stack.lift_and_insert(5.0);
//! stack.lift_and_insert(3.0);
//! let (x, y) = (stack.x(), stack.y());
//! stack.drop_and_replace(y + x);
//! assert_eq!(stack.get(Register::X), 8.0);
//! ```

use serde::{Deserialize, Serialize};

/// Number of registers in the stack
pub const REGISTER_COUNT: usize = 4;

/// Named register positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    X,
    Y,
    Z,
    T,
}

impl Register {
    /// All registers in display order (top of screen first)
    pub const DISPLAY_ORDER: [Register; REGISTER_COUNT] =
        [Register::T, Register::Z, Register::Y, Register::X];

    /// Array index of this register (X = 0)
    pub fn index(&self) -> usize {
        match self {
            Register::X => 0,
            Register::Y => 1,
            Register::Z => 2,
            Register::T => 3,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Register::X => "X",
            Register::Y => "Y",
            Register::Z => "Z",
            Register::T => "T",
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fixed-depth register stack.
///
/// Always holds exactly [`REGISTER_COUNT`] values; a fresh stack is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterStack {
    #[serde(with = "crate::float_json::array")]
    values: [f64; REGISTER_COUNT],
}

impl RegisterStack {
    /// Create a stack with every register set to zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack from explicit values, indexed X first
    pub fn from_values(values: [f64; REGISTER_COUNT]) -> Self {
        RegisterStack { values }
    }

    /// Read one register
    pub fn get(&self, register: Register) -> f64 {
        self.values[register.index()]
    }

    pub fn x(&self) -> f64 {
        self.get(Register::X)
    }

    pub fn y(&self) -> f64 {
        self.get(Register::Y)
    }

    pub fn z(&self) -> f64 {
        self.get(Register::Z)
    }

    pub fn t(&self) -> f64 {
        self.get(Register::T)
    }

    /// All values, indexed X first
    pub fn values(&self) -> [f64; REGISTER_COUNT] {
        self.values
    }

    /// Push a new independent value: every register moves one slot toward T
    /// (old T is discarded) and `value` becomes X.
    pub fn lift_and_insert(&mut self, value: f64) {
        self.values.copy_within(0..REGISTER_COUNT - 1, 1);
        self.values[0] = value;
    }

    /// Replace X in place.
    pub fn overwrite_x(&mut self, value: f64) {
        self.values[0] = value;
    }

    /// Consume X and Y into a single result.
    ///
    /// Performs `reg[i] = reg[i + 1]` for X..Z, so T is left in place and
    /// its value now sits in both Z and T, then writes `value` into X.
    pub fn drop_and_replace(&mut self, value: f64) {
        self.values.copy_within(1..REGISTER_COUNT, 0);
        self.values[0] = value;
    }

    /// Rotate so T becomes X and every other register moves toward T.
    pub fn roll_up(&mut self) {
        self.values.rotate_right(1);
    }

    /// Zero every register
    pub fn clear(&mut self) {
        self.values = [0.0; REGISTER_COUNT];
    }
}
