//! # rpn_core - Four-Register RPN Calculator Engine
//!
//! `rpn_core` is the state machine behind a classic RPN handheld: a fixed
//! stack of four `f64` registers (X, Y, Z, T), a text entry buffer for the
//! number being typed, and the operations that move values between them.
//! It does no I/O of its own apart from the optional session files.
//!
//! ## Design Philosophy
//!
//! - **Keypad-shaped**: one method per key; nonsensical keystrokes are no-ops
//! - **Plain IEEE arithmetic**: infinities and NaN propagate, never error
//! - **Closed operation sets**: enums, not string switches
//! - **JSON-First**: state, commands and errors all serialize
//!
//! ## Quick Start
//!
//! ```rust
//! use rpn_core::Calculator;
//!
//! let mut calc = Calculator::new();
//! calc.append_digit("9");
//! calc.commit_entry()?;
//! calc.apply_unary("square-root");
//! assert_eq!(calc.x(), 3.0);
//! # Ok::<(), rpn_core::RpnError>(())
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The [`Calculator`] and its [`Command`] dispatch
//! - [`stack`] - Register layout and shift primitives
//! - [`entry`] - Entry buffer editing rules
//! - [`operations`] - Binary, unary and constant operation sets
//! - [`variables`] - Named storage slots A, B, C
//! - [`settings`] - Separator and display options
//! - [`session`] - Saving and restoring calculator state
//! - [`errors`] - Structured error types

pub mod engine;
pub mod entry;
pub mod errors;
mod float_json;
pub mod operations;
pub mod session;
pub mod settings;
pub mod stack;
pub mod variables;

// Re-export commonly used types at crate root for convenience
pub use engine::{Calculator, Command, Outcome};
pub use errors::{RpnError, RpnResult};
pub use operations::{BinaryOp, Constant, UnaryOp};
pub use session::{load_session, save_session, Session};
pub use settings::{CalculatorSettings, DecimalSeparator};
pub use stack::{Register, RegisterStack};
pub use variables::VariableSlot;
