//! Game state module - one player's ten-pin game
//!
//! Every roll goes through [`Game::register_pins`]: the pin count is
//! validated, added to the running score (once, plus once per bonus credit
//! an earlier strike or spare holds on this roll), and then the frame/roll
//! position advances.
//!
//! Bonus credits are tracked per upcoming roll rather than as a single
//! counter, so back-to-back strikes each collect their own two rolls.
//! [`Game::count_next`] reports how many upcoming rolls are still owed.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::scoring::{self, Scorecard};
use crate::setup::GameSetup;
use crate::snapshot::GameSnapshot;
use crate::types::{
    Boundary, Numeric, RollError, SetupError, BOUNDARIES, FRAMES, MAX_PINS, MAX_ROLLS, MAX_SCORE,
    SPARE_BONUS_ROLLS, STRIKE_BONUS_ROLLS,
};

/// A single player's game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    player_name: String,
    pins_rest: u8,
    frame: u8,
    roll: u8,
    score: u16,
    /// Extra credits held on the next roll and on the roll after it.
    bonus: [u8; 2],
    /// Fill balls still owed in the 10th frame.
    fill_balls: u8,
    ended: bool,
    rolls: ArrayVec<u8, MAX_ROLLS>,
    /// False for games built from an explicit state (earlier rolls unknown).
    full_history: bool,
}

impl Game {
    /// Create a fresh game: frame 1, roll 1, full rack, no score
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            pins_rest: MAX_PINS,
            frame: 1,
            roll: 1,
            score: 0,
            bonus: [0, 0],
            fill_balls: 0,
            ended: false,
            rolls: ArrayVec::new(),
            full_history: true,
        }
    }

    /// Create a game from an explicit state
    ///
    /// `count_next` is read as the number of upcoming rolls owed to earlier
    /// frames: 2 means a pending strike, 1 a pending spare (or the second half
    /// of a strike).
    pub fn resume(player_name: impl Into<String>, setup: GameSetup) -> Result<Self, SetupError> {
        let valid = setup.validate()?;
        let bonus = match valid.count_next {
            0 => [0, 0],
            1 => [1, 0],
            _ => [1, 1],
        };

        let game = Self {
            player_name: player_name.into(),
            pins_rest: valid.pins_rest,
            frame: valid.frame,
            roll: valid.roll,
            score: valid.score,
            bonus,
            fill_balls: 0,
            ended: valid.ended,
            rolls: ArrayVec::new(),
            full_history: false,
        };
        debug!(
            player = %game.player_name,
            frame = game.frame,
            roll = game.roll,
            score = game.score,
            "game resumed"
        );
        Ok(game)
    }

    /// Rebuild a game by registering `rolls` in order on a fresh game
    ///
    /// Stops at the first rejected roll.
    pub fn replay<I, P>(player_name: impl Into<String>, rolls: I) -> Result<Self, RollError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Numeric>,
    {
        let mut game = Self::new(player_name);
        for pins in rolls {
            game.register_pins(pins)?;
        }
        Ok(game)
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Pins still standing in the current frame
    pub fn pins_rest(&self) -> u8 {
        self.pins_rest
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn roll(&self) -> u8 {
        self.roll
    }

    /// Running score, including bonus credits already collected
    pub fn score(&self) -> u16 {
        self.score
    }

    /// Upcoming rolls still owed as bonus (0, 1 or 2)
    ///
    /// In the 10th frame this also covers the fill balls a strike or spare
    /// has earned.
    pub fn count_next(&self) -> u8 {
        let owed = if self.bonus[1] > 0 {
            2
        } else if self.bonus[0] > 0 {
            1
        } else {
            0
        };
        owed.max(self.fill_balls)
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Pin counts registered on this instance, in order
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Field boundaries checked at construction
    pub fn list_boundaries(&self) -> &'static [Boundary] {
        &BOUNDARIES
    }

    /// Per-frame scorecard, if the whole game history is known
    pub fn scorecard(&self) -> Option<Scorecard> {
        self.full_history.then(|| scoring::frame_scores(&self.rolls))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    /// Register the pins knocked down by one roll
    ///
    /// Rejected rolls leave the game untouched.
    pub fn register_pins(&mut self, pins: impl Into<Numeric>) -> Result<(), RollError> {
        let pins = self.check_pins(&pins.into())?;
        self.apply(pins);
        Ok(())
    }

    fn check_pins(&self, pins: &Numeric) -> Result<u8, RollError> {
        let pins = pins.as_int().ok_or(RollError::NotANumber)?;
        if pins < 0 {
            return Err(RollError::NegativeCount);
        }
        if pins > i64::from(MAX_PINS) {
            return Err(RollError::ExceedsTenPins);
        }
        if pins > i64::from(self.pins_rest) {
            return Err(RollError::ExceedsPinsRest);
        }
        if self.ended {
            return Err(RollError::GameEnded);
        }
        Ok(pins as u8)
    }

    fn apply(&mut self, pins: u8) {
        let credits = 1 + u16::from(self.bonus[0]);
        self.score = self
            .score
            .saturating_add(u16::from(pins) * credits)
            .min(MAX_SCORE);
        self.bonus = [self.bonus[1], 0];
        // A game never throws more than MAX_ROLLS balls.
        let _ = self.rolls.try_push(pins);

        debug!(
            player = %self.player_name,
            frame = self.frame,
            roll = self.roll,
            pins,
            credits,
            score = self.score,
            "pins registered"
        );

        let clears_rack = pins == self.pins_rest;
        if self.frame < FRAMES {
            self.advance(pins, clears_rack);
        } else {
            self.advance_tenth(pins, clears_rack);
        }
    }

    /// Frames 1-9
    fn advance(&mut self, pins: u8, clears_rack: bool) {
        match (self.roll, clears_rack) {
            (1, true) => {
                debug!(player = %self.player_name, frame = self.frame, "strike");
                self.owe_bonus(STRIKE_BONUS_ROLLS);
                self.next_frame();
            }
            (1, false) => {
                self.pins_rest -= pins;
                self.roll = 2;
            }
            (_, true) => {
                debug!(player = %self.player_name, frame = self.frame, "spare");
                self.owe_bonus(SPARE_BONUS_ROLLS);
                self.next_frame();
            }
            (_, false) => self.next_frame(),
        }
    }

    /// Frame 10: strikes and spares earn fill balls instead of bonus credits,
    /// since the fill balls' own pins are the frame's bonus.
    fn advance_tenth(&mut self, pins: u8, clears_rack: bool) {
        if self.fill_balls > 0 {
            self.fill_balls -= 1;
            if self.fill_balls == 0 {
                self.finish();
            } else if clears_rack {
                self.pins_rest = MAX_PINS;
            } else {
                self.pins_rest -= pins;
            }
            return;
        }

        match (self.roll, clears_rack) {
            (1, true) => {
                debug!(player = %self.player_name, frame = self.frame, "strike");
                self.fill_balls = STRIKE_BONUS_ROLLS;
                self.roll = 2;
                self.pins_rest = MAX_PINS;
            }
            (1, false) => {
                self.pins_rest -= pins;
                self.roll = 2;
            }
            (_, true) => {
                debug!(player = %self.player_name, frame = self.frame, "spare");
                self.fill_balls = SPARE_BONUS_ROLLS;
                self.pins_rest = MAX_PINS;
            }
            (_, false) => self.finish(),
        }
    }

    fn owe_bonus(&mut self, rolls: u8) {
        for slot in self.bonus.iter_mut().take(rolls as usize) {
            *slot += 1;
        }
    }

    fn next_frame(&mut self) {
        self.frame += 1;
        self.roll = 1;
        self.pins_rest = MAX_PINS;
    }

    fn finish(&mut self) {
        self.ended = true;
        self.bonus = [0, 0];
        self.fill_balls = 0;
        debug!(player = %self.player_name, score = self.score, "game ended");
    }
}
