//! Explicit starting state for a game, used to resume or stage a position.
//!
//! Every numeric field is checked against [`BOUNDARIES`] in table order:
//! non-number first, then negative, then below minimum, then above maximum.
//! The first field that fails decides the error.

use crate::types::{Boundary, Field, Numeric, SetupError, BOUNDARIES, MAX_PINS};

/// Caller-supplied game state
///
/// `Default` is a fresh game. Fields hold [`Numeric`] so text input that is
/// not a number reaches validation instead of failing somewhere upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub pins_rest: Numeric,
    pub frame: Numeric,
    pub roll: Numeric,
    pub score: Numeric,
    pub count_next: Numeric,
    /// Resume a game that has already thrown its last ball.
    ///
    /// The numeric fields alone cannot tell "about to throw roll 2 of
    /// frame 10" from "frame 10 finished", so `(4, 10, 2, 200, 0)` without
    /// this flag is a live game that still accepts its second ball. Set it
    /// to get a game that rejects every roll with `GameEnded`.
    pub ended: bool,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            pins_rest: Numeric::Int(MAX_PINS as i64),
            frame: Numeric::Int(1),
            roll: Numeric::Int(1),
            score: Numeric::Int(0),
            count_next: Numeric::Int(0),
            ended: false,
        }
    }
}

/// Setup that passed validation; every value is inside its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidSetup {
    pub pins_rest: u8,
    pub frame: u8,
    pub roll: u8,
    pub score: u16,
    pub count_next: u8,
    pub ended: bool,
}

impl GameSetup {
    /// Positional constructor mirroring the field order of [`BOUNDARIES`]
    pub fn new(
        pins_rest: impl Into<Numeric>,
        frame: impl Into<Numeric>,
        roll: impl Into<Numeric>,
        score: impl Into<Numeric>,
        count_next: impl Into<Numeric>,
    ) -> Self {
        Self {
            pins_rest: pins_rest.into(),
            frame: frame.into(),
            roll: roll.into(),
            score: score.into(),
            count_next: count_next.into(),
            ended: false,
        }
    }

    /// Replace one field, keeping the rest
    pub fn with(mut self, field: Field, value: impl Into<Numeric>) -> Self {
        *self.value_mut(field) = value.into();
        self
    }

    pub fn ended(mut self, ended: bool) -> Self {
        self.ended = ended;
        self
    }

    /// Value currently held for `field`
    pub fn value(&self, field: Field) -> &Numeric {
        match field {
            Field::PinsRest => &self.pins_rest,
            Field::Frame => &self.frame,
            Field::Roll => &self.roll,
            Field::Score => &self.score,
            Field::CountNext => &self.count_next,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut Numeric {
        match field {
            Field::PinsRest => &mut self.pins_rest,
            Field::Frame => &mut self.frame,
            Field::Roll => &mut self.roll,
            Field::Score => &mut self.score,
            Field::CountNext => &mut self.count_next,
        }
    }

    pub(crate) fn validate(&self) -> Result<ValidSetup, SetupError> {
        for boundary in BOUNDARIES {
            check_field(boundary, self.value(boundary.field))?;
        }

        // All fields are integers within their boundaries from here on.
        let int = |field: Field| self.value(field).as_int().unwrap_or_default();
        Ok(ValidSetup {
            pins_rest: int(Field::PinsRest) as u8,
            frame: int(Field::Frame) as u8,
            roll: int(Field::Roll) as u8,
            score: int(Field::Score) as u16,
            count_next: int(Field::CountNext) as u8,
            ended: self.ended,
        })
    }
}

fn check_field(boundary: Boundary, value: &Numeric) -> Result<i64, SetupError> {
    let field = boundary.field;
    let Some(v) = value.as_int() else {
        return Err(SetupError::NonNumericInput(field));
    };
    if v < 0 {
        return Err(SetupError::NegativeInput(field));
    }
    if v < boundary.min {
        return Err(SetupError::BelowMinimum {
            field,
            min: boundary.min,
        });
    }
    if v > boundary.max {
        return Err(SetupError::ExceedsMaximum {
            field,
            max: boundary.max,
        });
    }
    Ok(v)
}
