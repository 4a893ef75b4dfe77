//! Error kinds for roll registration and game construction.
//!
//! Display strings are part of the public contract: callers match on them.

use thiserror::Error;

use crate::Field;

/// Why a roll was rejected. Checked in declaration order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollError {
    #[error("pins registration failed, not a number")]
    NotANumber,
    #[error("pins registration failed, number smaller than 0")]
    NegativeCount,
    #[error("pins registration failed, number greater than 10")]
    ExceedsTenPins,
    #[error("pins registration failed, number greater than rest of pins")]
    ExceedsPinsRest,
    #[error("pins registration failed, game has ended")]
    GameEnded,
}

impl RollError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RollError::NotANumber => "not_a_number",
            RollError::NegativeCount => "negative_count",
            RollError::ExceedsTenPins => "exceeds_ten_pins",
            RollError::ExceedsPinsRest => "exceeds_pins_rest",
            RollError::GameEnded => "game_ended",
        }
    }
}

/// Why an explicit game state was rejected at construction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupError {
    #[error("player has non-number {0}")]
    NonNumericInput(Field),
    #[error("player has negative {0}")]
    NegativeInput(Field),
    #[error("player has {field} smaller than {min}")]
    BelowMinimum { field: Field, min: i64 },
    #[error("player has {field} greater than {max}")]
    ExceedsMaximum { field: Field, max: i64 },
}

impl SetupError {
    pub fn code(&self) -> &'static str {
        match self {
            SetupError::NonNumericInput(_) => "non_numeric_input",
            SetupError::NegativeInput(_) => "negative_input",
            SetupError::BelowMinimum { .. } => "below_minimum",
            SetupError::ExceedsMaximum { .. } => "exceeds_maximum",
        }
    }

    /// The field that failed validation
    pub fn field(&self) -> Field {
        match self {
            SetupError::NonNumericInput(field) | SetupError::NegativeInput(field) => *field,
            SetupError::BelowMinimum { field, .. } | SetupError::ExceedsMaximum { field, .. } => {
                *field
            }
        }
    }
}
