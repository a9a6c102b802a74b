//! Quantity value object - how much of an ingredient is left

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LarderError, LarderResult};

/// Remaining amount of an ingredient, in whatever unit the user tracks it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    /// Build a validated quantity: the value must be finite and non-negative.
    pub fn new(value: f64, unit: impl Into<String>) -> LarderResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(LarderError::InvalidArgument {
                what: "quantity",
                message: format!("value must be a non-negative number, got {value}"),
            });
        }
        Ok(Self {
            value,
            unit: unit.into(),
        })
    }

    /// True when some stock remains but no more than one unit.
    ///
    /// Zero is deliberately not "low": it means "none left", which is a
    /// restocking fact rather than a warning.
    pub fn is_low(&self) -> bool {
        self.value > 0.0 && self.value <= 1.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
