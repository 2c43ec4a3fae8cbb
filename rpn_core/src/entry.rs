//! # Entry Buffer
//!
//! Text staging area for the number being typed. Nothing here touches the
//! register stack; the engine parses the buffer and pushes the value when
//! the user presses ENTER.
//!
//! The buffer holds leading `+`/`-` sign marks, digits and at most one
//! decimal separator. Rejected keystrokes are no-ops, reported by the `bool`
//! each editing method returns.

use serde::{Deserialize, Serialize};

use crate::errors::{RpnError, RpnResult};
use crate::settings::DecimalSeparator;

/// Pending numeric input for X.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryBuffer {
    text: String,
}

impl EntryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a digit key.
    ///
    /// The token must parse as an integer; its canonical decimal form is
    /// appended (`"07"` appends `"7"`). Anything else leaves the buffer as is.
    pub fn append_digit(&mut self, token: &str) -> bool {
        match token.parse::<i64>() {
            Ok(n) => {
                self.text.push_str(&n.to_string());
                true
            }
            Err(_) => false,
        }
    }

    /// Append the decimal separator unless one is already present.
    pub fn append_separator(&mut self, separator: DecimalSeparator) -> bool {
        let ch = separator.as_char();
        if self.text.contains(ch) {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// Flip the sign marker.
    ///
    /// Only the first character is inspected. A leading `+` becomes `-`, a
    /// leading `-` gets a `+` in front of it, and anything else (including
    /// an empty buffer) gets a `-` prefix. Marks pile up on repeated toggles:
    /// `"42"` → `"-42"` → `"+-42"` → `"--42"`.
    pub fn toggle_sign(&mut self) {
        match self.text.chars().next() {
            Some('+') => self.text.replace_range(0..1, "-"),
            Some('-') => self.text.insert(0, '+'),
            _ => self.text.insert(0, '-'),
        }
    }

    /// Whether the text could have been typed with `separator` configured:
    /// sign marks, then digits with at most one separator.
    pub fn is_well_formed(&self, separator: DecimalSeparator) -> bool {
        let body = self.text.trim_start_matches(['+', '-']);
        let sep = separator.as_char();
        body.chars().all(|c| c.is_ascii_digit() || c == sep) && body.matches(sep).count() <= 1
    }

    /// Rewrite the separator after a settings change
    pub fn convert_separator(&mut self, from: DecimalSeparator, to: DecimalSeparator) {
        if from != to {
            self.text = self.text.replace(from.as_char(), &to.as_char().to_string());
        }
    }

    /// Parse the buffer as a number without consuming it.
    ///
    /// Returns `Ok(None)` for an empty buffer.
    pub fn parse(&self, separator: DecimalSeparator) -> RpnResult<Option<f64>> {
        if self.text.is_empty() {
            return Ok(None);
        }
        let normalized = match separator {
            DecimalSeparator::Point => self.text.clone(),
            DecimalSeparator::Comma => self.text.replace(',', "."),
        };
        normalized
            .parse::<f64>()
            .map(Some)
            .map_err(|e| RpnError::parse(&self.text, e.to_string()))
    }

    /// Drop the last typed character
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl std::fmt::Display for EntryBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
