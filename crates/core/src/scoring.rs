//! Scoring module - traditional ten-pin scorecard
//!
//! These are pure functions over a roll history. The [`Game`](crate::Game)
//! keeps a running total as rolls arrive; the scorecard here is what a
//! score sheet shows: a cumulative total per frame, filled in only once the
//! frame's bonus rolls are known.

use crate::types::{FRAMES, MAX_PINS};

/// Cumulative score per frame; `None` until the frame can be resolved
pub type Scorecard = [Option<u16>; FRAMES as usize];

/// First ball of a frame knocked down the full rack
pub fn is_strike(first: u8) -> bool {
    first == MAX_PINS
}

/// Both balls of a frame together cleared the rack
pub fn is_spare(first: u8, second: u8) -> bool {
    !is_strike(first) && first.saturating_add(second) == MAX_PINS
}

/// Sum of `count` rolls starting at `start`, if all of them have been thrown
fn sum_rolls(rolls: &[u8], start: usize, count: usize) -> Option<u16> {
    rolls
        .get(start..start + count)
        .map(|window| window.iter().map(|&p| u16::from(p)).sum())
}

/// Build the scorecard for a roll history that starts at frame 1
///
/// Frames whose bonus rolls have not been thrown yet (and every frame after
/// them) stay `None`.
pub fn frame_scores(rolls: &[u8]) -> Scorecard {
    let mut card: Scorecard = [None; FRAMES as usize];
    let mut total: u16 = 0;
    let mut i = 0usize;

    for slot in card.iter_mut() {
        let Some(&first) = rolls.get(i) else {
            break;
        };

        let (points, consumed) = if is_strike(first) {
            (sum_rolls(rolls, i, 3), 1)
        } else {
            match rolls.get(i + 1) {
                Some(&second) if is_spare(first, second) => (sum_rolls(rolls, i, 3), 2),
                Some(&second) => (Some(u16::from(first) + u16::from(second)), 2),
                None => (None, 2),
            }
        };

        let Some(points) = points else {
            break;
        };
        total += points;
        *slot = Some(total);
        i += consumed;
    }

    card
}

/// Score of the last resolved frame (0 when nothing is resolved yet)
pub fn total_score(rolls: &[u8]) -> u16 {
    frame_scores(rolls)
        .iter()
        .rev()
        .find_map(|s| *s)
        .unwrap_or(0)
}
