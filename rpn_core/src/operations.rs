//! # Operations
//!
//! The closed sets of calculator operations, grouped by how many stack
//! values they consume:
//!
//! - [`BinaryOp`] - consumes Y and X, result replaces both (stack drops)
//! - [`UnaryOp`] - consumes X, result overwrites X
//! - [`Constant`] - consumes nothing, value is pushed (stack lifts)
//!
//! Each set parses from a stable lowercase token (`"add"`, `"square-root"`,
//! `"pi"`). Display glyphs such as `×` or `√` belong to the front end and
//! are not accepted here.
//!
//! No operation checks its domain. Division by zero, `ln` of a negative
//! number and similar cases produce IEEE infinities or NaN, which flow
//! through later operations unchanged.
//!
//! ## Example
//!
//! ```rust
//! use rpn_core::operations::{BinaryOp, UnaryOp};
//!
//! let op = BinaryOp::from_token("subtract").unwrap();
//! assert_eq!(op.apply(10.0, 4.0), 6.0); // Y - X
//!
//! assert!(UnaryOp::from_token("cube").is_none());
//! ```

use serde::{Deserialize, Serialize};

/// Two-operand operations, computed as `Y <op> X`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `Y ^ X`
    Power,
    /// `Y ^ (1 / X)`
    Root,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 6] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Power,
        BinaryOp::Root,
    ];

    /// Stable token for dispatch and serialization
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "divide",
            BinaryOp::Power => "power",
            BinaryOp::Root => "root",
        }
    }

    /// Look up an operation by token; `None` if unrecognized
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// Compute the result from the earlier operand `y` and the later `x`
    pub fn apply(&self, y: f64, x: f64) -> f64 {
        match self {
            BinaryOp::Add => y + x,
            BinaryOp::Subtract => y - x,
            BinaryOp::Multiply => y * x,
            BinaryOp::Divide => y / x,
            BinaryOp::Power => y.powf(x),
            BinaryOp::Root => y.powf(1.0 / x),
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Single-operand operations on X. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnaryOp {
    Square,
    SquareRoot,
    #[serde(rename = "log10")]
    Log10,
    Ln,
    TenToX,
    Exp,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 12] = [
        UnaryOp::Square,
        UnaryOp::SquareRoot,
        UnaryOp::Log10,
        UnaryOp::Ln,
        UnaryOp::TenToX,
        UnaryOp::Exp,
        UnaryOp::Sin,
        UnaryOp::Cos,
        UnaryOp::Tan,
        UnaryOp::Asin,
        UnaryOp::Acos,
        UnaryOp::Atan,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            UnaryOp::Square => "square",
            UnaryOp::SquareRoot => "square-root",
            UnaryOp::Log10 => "log10",
            UnaryOp::Ln => "ln",
            UnaryOp::TenToX => "ten-to-x",
            UnaryOp::Exp => "exp",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            UnaryOp::Square => x * x,
            UnaryOp::SquareRoot => x.sqrt(),
            UnaryOp::Log10 => x.log10(),
            UnaryOp::Ln => x.ln(),
            UnaryOp::TenToX => 10f64.powf(x),
            UnaryOp::Exp => x.exp(),
            UnaryOp::Sin => x.sin(),
            UnaryOp::Cos => x.cos(),
            UnaryOp::Tan => x.tan(),
            UnaryOp::Asin => x.asin(),
            UnaryOp::Acos => x.acos(),
            UnaryOp::Atan => x.atan(),
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Zero-operand operations that push a mathematical constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub const ALL: [Constant; 2] = [Constant::Pi, Constant::E];

    pub fn token(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token)
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
