//! # Variable Slots
//!
//! Named storage registers A, B and C.
//!
//! A slot is empty until something is stored in it. Recalling an empty slot
//! is an error rather than an implicit zero, so a forgotten STO shows up
//! instead of silently feeding 0 into a calculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{RpnError, RpnResult};

/// One of the named storage slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableSlot {
    A,
    B,
    C,
}

impl VariableSlot {
    pub const ALL: [VariableSlot; 3] = [VariableSlot::A, VariableSlot::B, VariableSlot::C];

    /// Parse from common string representations (`"a"`, `"B"`, `"var-c"`)
    pub fn from_str_flexible(s: &str) -> RpnResult<Self> {
        let upper = s.trim().to_uppercase();
        let name = match upper.strip_prefix("VAR") {
            Some(rest) => rest.trim_start_matches(['-', '_', ' ']),
            None => upper.as_str(),
        };
        match name {
            "A" => Ok(VariableSlot::A),
            "B" => Ok(VariableSlot::B),
            "C" => Ok(VariableSlot::C),
            _ => Err(RpnError::unknown_slot(s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VariableSlot::A => "A",
            VariableSlot::B => "B",
            VariableSlot::C => "C",
        }
    }
}

impl std::fmt::Display for VariableSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Stored values keyed by slot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableStore {
    #[serde(with = "crate::float_json::map")]
    values: BTreeMap<VariableSlot, f64>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `value` under `slot`, replacing any earlier value
    pub fn store(&mut self, slot: VariableSlot, value: f64) {
        self.values.insert(slot, value);
    }

    /// Fetch the value stored under `slot`
    pub fn recall(&self, slot: VariableSlot) -> RpnResult<f64> {
        self.values
            .get(&slot)
            .copied()
            .ok_or_else(|| RpnError::unset_variable(slot.display_name()))
    }

    /// Empty a single slot, returning the old value
    pub fn clear_slot(&mut self, slot: VariableSlot) -> Option<f64> {
        self.values.remove(&slot)
    }

    /// Iterate over set slots in A, B, C order
    pub fn iter(&self) -> impl Iterator<Item = (VariableSlot, f64)> + '_ {
        self.values.iter().map(|(slot, value)| (*slot, *value))
    }
}
