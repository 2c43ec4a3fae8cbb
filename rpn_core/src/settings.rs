//! # Calculator Settings
//!
//! User-adjustable options that change how numbers are typed and shown,
//! never how they are computed.

use serde::{Deserialize, Serialize};

use crate::errors::{RpnError, RpnResult};

/// Largest supported fixed display precision
pub const MAX_DISPLAY_PRECISION: usize = 15;

/// Character accepted as the decimal point in the entry buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecimalSeparator {
    #[default]
    #[serde(rename = ".")]
    Point,
    #[serde(rename = ",")]
    Comma,
}

impl DecimalSeparator {
    /// The character typed into the entry buffer
    pub fn as_char(&self) -> char {
        match self {
            DecimalSeparator::Point => '.',
            DecimalSeparator::Comma => ',',
        }
    }

    /// Parse from a user-supplied string
    pub fn from_str_flexible(s: &str) -> RpnResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "." | "point" | "dot" => Ok(DecimalSeparator::Point),
            "," | "comma" => Ok(DecimalSeparator::Comma),
            _ => Err(RpnError::invalid_setting(
                "decimal_separator",
                s,
                "Separator must be '.' or ','",
            )),
        }
    }
}

/// Settings applied to a calculator instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    /// Decimal separator for entry
    pub decimal_separator: DecimalSeparator,

    /// Fixed number of decimals when rendering registers.
    ///
    /// `None` renders the shortest representation that round-trips.
    pub display_precision: Option<usize>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            decimal_separator: DecimalSeparator::Point,
            display_precision: None,
        }
    }
}

impl CalculatorSettings {
    /// Builder-style separator override
    pub fn with_separator(mut self, separator: DecimalSeparator) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Builder-style precision override
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.display_precision = precision;
        self
    }

    /// Check that every field is in range
    pub fn validate(&self) -> RpnResult<()> {
        if let Some(precision) = self.display_precision {
            if precision > MAX_DISPLAY_PRECISION {
                return Err(RpnError::invalid_setting(
                    "display_precision",
                    precision.to_string(),
                    format!("Precision must be at most {}", MAX_DISPLAY_PRECISION),
                ));
            }
        }
        Ok(())
    }

    /// Format a register value for display.
    ///
    /// The configured separator replaces `.` so the stack reads the same way
    /// numbers are typed.
    pub fn format_value(&self, value: f64) -> String {
        let text = match self.display_precision {
            Some(precision) if value.is_finite() => format!("{:.*}", precision, value),
            _ => value.to_string(),
        };
        match self.decimal_separator {
            DecimalSeparator::Point => text,
            DecimalSeparator::Comma => text.replace('.', ","),
        }
    }
}
