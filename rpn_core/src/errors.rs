//! # Error Types
//!
//! Structured error types for rpn_core. Most bad input to the calculator is
//! swallowed as a no-op (see [`crate::engine::Outcome`]); the variants here
//! cover the cases a caller genuinely has to react to, such as a malformed
//! entry buffer or an unreadable session file.
//!
//! ## Example
//!
//! ```rust
//! use rpn_core::errors::{RpnError, RpnResult};
//!
//! fn parse_entry(text: &str) -> RpnResult<f64> {
//!     text.parse::<f64>()
//!         .map_err(|e| RpnError::parse(text, e.to_string()))
//! }
//!
//! assert!(parse_entry("-").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rpn_core operations
pub type RpnResult<T> = Result<T, RpnError>;

/// Structured error type for calculator operations.
///
/// Serializes with a `type` tag so front ends can report errors as JSON.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum RpnError {
    /// The entry buffer does not hold a valid number (lone sign, lone separator)
    #[error("Cannot parse entry '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// A variable slot was recalled before anything was stored in it
    #[error("Variable {slot} has no stored value")]
    UnsetVariable { slot: String },

    /// A variable slot name is not one of A, B, C
    #[error("Unknown variable slot: {name}")]
    UnknownSlot { name: String },

    /// A front-end token does not map to any calculator command
    #[error("Unknown command: {token}")]
    UnknownCommand { token: String },

    /// A settings value is out of range
    #[error("Invalid setting '{field}': {value} - {reason}")]
    InvalidSetting {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl RpnError {
    /// Create a Parse error
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        RpnError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsetVariable error
    pub fn unset_variable(slot: impl Into<String>) -> Self {
        RpnError::UnsetVariable { slot: slot.into() }
    }

    /// Create an UnknownSlot error
    pub fn unknown_slot(name: impl Into<String>) -> Self {
        RpnError::UnknownSlot { name: name.into() }
    }

    /// Create an UnknownCommand error
    pub fn unknown_command(token: impl Into<String>) -> Self {
        RpnError::UnknownCommand {
            token: token.into(),
        }
    }

    /// Create an InvalidSetting error
    pub fn invalid_setting(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        RpnError::InvalidSetting {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        RpnError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RpnError::Parse { .. } => "PARSE_ERROR",
            RpnError::UnsetVariable { .. } => "UNSET_VARIABLE",
            RpnError::UnknownSlot { .. } => "UNKNOWN_SLOT",
            RpnError::UnknownCommand { .. } => "UNKNOWN_COMMAND",
            RpnError::InvalidSetting { .. } => "INVALID_SETTING",
            RpnError::FileError { .. } => "FILE_ERROR",
            RpnError::SerializationError { .. } => "SERIALIZATION_ERROR",
            RpnError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for RpnError {
    fn from(e: serde_json::Error) -> Self {
        RpnError::SerializationError {
            reason: e.to_string(),
        }
    }
}
