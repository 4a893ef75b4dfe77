use arrayvec::ArrayVec;

use crate::game::Game;
use crate::scoring::Scorecard;
use crate::types::MAX_ROLLS;

/// Read-only copy of a game's observable state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub frame: u8,
    pub roll: u8,
    pub pins_rest: u8,
    pub score: u16,
    pub count_next: u8,
    pub ended: bool,
    pub rolls: ArrayVec<u8, MAX_ROLLS>,
    /// `None` when the game was resumed from an explicit state
    pub frames: Option<Scorecard>,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.ended
    }
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        let mut rolls = ArrayVec::new();
        // Both sides share the MAX_ROLLS capacity.
        let _ = rolls.try_extend_from_slice(game.rolls());
        Self {
            frame: game.frame(),
            roll: game.roll(),
            pins_rest: game.pins_rest(),
            score: game.score(),
            count_next: game.count_next(),
            ended: game.is_ended(),
            rolls,
            frames: game.scorecard(),
        }
    }
}
