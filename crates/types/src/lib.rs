//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (the scoring engine, the CLI, the adapter protocol).
//!
//! # Lane Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_PINS` | 10 | Pins racked at the start of a frame |
//! | `FRAMES` | 10 | Frames in a game |
//! | `MAX_SCORE` | 300 | Perfect game |
//! | `MAX_ROLLS` | 21 | Longest possible game (9 open frames + 3 balls in the 10th) |
//!
//! # Boundaries
//!
//! [`BOUNDARIES`] is the table behind `list_boundaries`: every numeric game
//! field together with the range it must fall in. Construction validates
//! fields in table order, so the first offending field wins.
//!
//! # Examples
//!
//! ```
//! use tenpin_types::{Field, Numeric, BOUNDARIES};
//!
//! assert_eq!(Numeric::from("7"), Numeric::Int(7));
//! assert!(!Numeric::from("a").is_int());
//!
//! let first = BOUNDARIES[0];
//! assert_eq!(first.field, Field::PinsRest);
//! assert_eq!(first.max, 10);
//! ```

mod error;

pub use error::{RollError, SetupError};

/// Pins racked at the start of every frame
pub const MAX_PINS: u8 = 10;

/// Frames in a game
pub const FRAMES: u8 = 10;

/// Highest reachable score (twelve strikes)
pub const MAX_SCORE: u16 = 300;

/// Upper bound on rolls in one game (nine open frames plus three balls in the 10th)
pub const MAX_ROLLS: usize = 21;

/// Rolls a strike borrows as bonus
pub const STRIKE_BONUS_ROLLS: u8 = 2;

/// Rolls a spare borrows as bonus
pub const SPARE_BONUS_ROLLS: u8 = 1;

/// Numeric game fields that carry a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PinsRest,
    Frame,
    Roll,
    Score,
    CountNext,
}

impl Field {
    /// Snake-case field name, as used in error messages and on the wire
    ///
    /// # Examples
    ///
    /// ```
    /// use tenpin_types::Field;
    ///
    /// assert_eq!(Field::PinsRest.as_str(), "pins_rest");
    /// assert_eq!(Field::CountNext.as_str(), "count_next");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PinsRest => "pins_rest",
            Field::Frame => "frame",
            Field::Roll => "roll",
            Field::Score => "score",
            Field::CountNext => "count_next",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed range for one numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub field: Field,
    pub min: i64,
    pub max: i64,
}

/// Field boundaries in validation order
pub const BOUNDARIES: [Boundary; 5] = [
    Boundary {
        field: Field::PinsRest,
        min: 0,
        max: MAX_PINS as i64,
    },
    Boundary {
        field: Field::Frame,
        min: 1,
        max: FRAMES as i64,
    },
    Boundary {
        field: Field::Roll,
        min: 1,
        max: 2,
    },
    Boundary {
        field: Field::Score,
        min: 0,
        max: MAX_SCORE as i64,
    },
    Boundary {
        field: Field::CountNext,
        min: 0,
        max: STRIKE_BONUS_ROLLS as i64,
    },
];

/// A caller-supplied number that may not be an integer at all
///
/// Pin counts and resumed state reach the engine from text (CLI arguments,
/// JSON lines), so "not a number" has to be representable and rejected by
/// the engine itself rather than by every caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Numeric {
    Int(i64),
    /// Raw text that did not parse as a base-10 integer
    Invalid(String),
}

impl Numeric {
    pub fn is_int(&self) -> bool {
        matches!(self, Numeric::Int(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Numeric::Int(v) => Some(*v),
            Numeric::Invalid(_) => None,
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<u8> for Numeric {
    fn from(value: u8) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<u16> for Numeric {
    fn from(value: u16) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<i64>() {
            Ok(v) => Numeric::Int(v),
            Err(_) => Numeric::Invalid(trimmed.to_string()),
        }
    }
}

impl From<String> for Numeric {
    fn from(value: String) -> Self {
        Numeric::from(value.as_str())
    }
}
