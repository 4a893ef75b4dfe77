use proptest::prelude::*;
use tenpin::core::{frame_scores, total_score, Game, RollError};
use tenpin::types::{MAX_ROLLS, MAX_SCORE};

/// Play a legal game: each seed is folded into the pins still standing.
///
/// Any legal game ends within `MAX_ROLLS` balls, so 21 seeds always finish it.
fn play_legal(seeds: &[u8]) -> (Game, Vec<u16>) {
    let mut game = Game::new("Prop");
    let mut scores = Vec::with_capacity(seeds.len());
    for &seed in seeds {
        if game.is_ended() {
            break;
        }
        let pins = seed % (game.pins_rest() + 1);
        game.register_pins(i64::from(pins))
            .expect("legal roll must be accepted");
        scores.push(game.score());
    }
    (game, scores)
}

fn seeds() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=10, MAX_ROLLS)
}

proptest! {
    /// Property: the running score never decreases and never exceeds 300
    #[test]
    fn score_is_monotonic_and_bounded(seeds in seeds()) {
        let (_, scores) = play_legal(&seeds);
        for pair in scores.windows(2) {
            prop_assert!(pair[0] <= pair[1], "score went down: {:?}", pair);
        }
        prop_assert!(scores.iter().all(|&s| s <= MAX_SCORE));
    }

    /// Property: position fields stay inside their ranges after every roll
    #[test]
    fn position_stays_in_range(seeds in seeds()) {
        let mut game = Game::new("Prop");
        for &seed in &seeds {
            if game.is_ended() {
                break;
            }
            let pins = seed % (game.pins_rest() + 1);
            game.register_pins(i64::from(pins)).unwrap();

            prop_assert!((1..=10).contains(&game.frame()));
            prop_assert!((1..=2).contains(&game.roll()));
            prop_assert!(game.pins_rest() <= 10);
            prop_assert!(game.count_next() <= 2);
        }
    }

    /// Property: 21 legal seeds always finish the game
    #[test]
    fn legal_games_end(seeds in seeds()) {
        let (game, _) = play_legal(&seeds);
        prop_assert!(game.is_ended());
        prop_assert!(game.rolls().len() >= 11 && game.rolls().len() <= MAX_ROLLS);
        prop_assert_eq!(game.count_next(), 0);
    }

    /// Property: a finished game's score equals its scorecard total
    #[test]
    fn final_score_matches_scorecard(seeds in seeds()) {
        let (game, _) = play_legal(&seeds);
        let card = game.scorecard().unwrap();
        prop_assert_eq!(card, frame_scores(game.rolls()));
        prop_assert_eq!(card[9], Some(game.score()));
        prop_assert_eq!(total_score(game.rolls()), game.score());
    }

    /// Property: resolved frames never outrun the running score
    #[test]
    fn running_score_covers_resolved_frames(seeds in seeds(), cut in 0usize..MAX_ROLLS) {
        let (game, _) = play_legal(&seeds);
        let rolls = &game.rolls()[..cut.min(game.rolls().len())];
        let partial = Game::replay("Prop", rolls.iter().map(|&p| i64::from(p))).unwrap();
        prop_assert!(total_score(rolls) <= partial.score());
    }

    /// Property: replaying the roll history rebuilds the same game
    #[test]
    fn replay_is_deterministic(seeds in seeds()) {
        let (game, _) = play_legal(&seeds);
        let replayed = Game::replay("Prop", game.rolls().iter().map(|&p| i64::from(p))).unwrap();
        prop_assert_eq!(replayed, game);
    }

    /// Property: a finished game rejects every in-range roll and stays as it was
    #[test]
    fn finished_game_rejects_in_range_rolls(seeds in seeds(), pins in 0i64..=10) {
        let (mut game, _) = play_legal(&seeds);
        prop_assume!(game.is_ended());
        prop_assume!(pins <= i64::from(game.pins_rest()));
        let before = game.clone();
        prop_assert_eq!(game.register_pins(pins), Err(RollError::GameEnded));
        prop_assert_eq!(game, before);
    }

    /// Property: rejected rolls never change the game
    #[test]
    fn rejected_rolls_leave_game_untouched(
        seeds in prop::collection::vec(0u8..=10, 0..MAX_ROLLS),
        bad in prop_oneof![i64::MIN..0i64, 11i64..i64::MAX],
    ) {
        let (mut game, _) = play_legal(&seeds);
        let before = game.clone();
        let err = game.register_pins(bad).unwrap_err();
        prop_assert!(matches!(err, RollError::NegativeCount | RollError::ExceedsTenPins));
        prop_assert_eq!(game, before);
    }
}
