//! Integration tests for the public game API

use tenpin::core::{frame_scores, total_score, Game, GameSetup};
use tenpin::types::{Field, Numeric, RollError, SetupError, BOUNDARIES};

/// Mid-game position used by the setup validation cases.
fn mid_game() -> GameSetup {
    GameSetup::new(5, 5, 1, 100, 1)
}

fn roll_all(game: &mut Game, rolls: &[i64]) {
    for &pins in rolls {
        game.register_pins(pins).unwrap();
    }
}

#[test]
fn test_game_exposes_its_state() {
    let game = Game::resume("Jake", mid_game()).unwrap();
    assert_eq!(game.player_name(), "Jake");
    assert_eq!(game.pins_rest(), 5);
    assert_eq!(game.frame(), 5);
    assert_eq!(game.roll(), 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.count_next(), 1);
    assert!(!game.is_ended());
}

#[test]
fn test_roll_errors_in_check_order() {
    let mut game = Game::new("Jake");
    assert_eq!(
        game.register_pins("a").unwrap_err().to_string(),
        "pins registration failed, not a number"
    );
    assert_eq!(
        game.register_pins(-1).unwrap_err().to_string(),
        "pins registration failed, number smaller than 0"
    );
    assert_eq!(
        game.register_pins(11).unwrap_err().to_string(),
        "pins registration failed, number greater than 10"
    );

    let mut four_left =
        Game::resume("Jake", GameSetup::default().with(Field::PinsRest, 4)).unwrap();
    assert_eq!(
        four_left.register_pins(5).unwrap_err().to_string(),
        "pins registration failed, number greater than rest of pins"
    );

    let mut finished = Game::resume("Jake", GameSetup::new(4, 10, 2, 200, 0).ended(true)).unwrap();
    assert_eq!(
        finished.register_pins(3).unwrap_err().to_string(),
        "pins registration failed, game has ended"
    );
}

#[test]
fn test_setup_rejects_non_number_for_every_field() {
    for boundary in BOUNDARIES {
        let setup = mid_game().with(boundary.field, "a");
        let err = Game::resume("Jake", setup).unwrap_err();
        assert_eq!(err, SetupError::NonNumericInput(boundary.field));
        assert_eq!(err.to_string(), format!("player has non-number {}", boundary.field));
    }
}

#[test]
fn test_setup_rejects_negative_for_every_field() {
    for boundary in BOUNDARIES {
        let setup = mid_game().with(boundary.field, -1);
        let err = Game::resume("Jake", setup).unwrap_err();
        assert_eq!(err.to_string(), format!("player has negative {}", boundary.field));
    }
}

#[test]
fn test_setup_rejects_above_maximum_for_every_field() {
    for boundary in BOUNDARIES {
        let setup = mid_game().with(boundary.field, boundary.max + 1);
        let err = Game::resume("Jake", setup).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("player has {} greater than {}", boundary.field, boundary.max)
        );
    }
}

#[test]
fn test_setup_accepts_text_numbers() {
    let setup = GameSetup::new("5", " 5 ", "1", "100", "1");
    assert_eq!(setup.value(Field::Frame), &Numeric::Int(5));
    let game = Game::resume("Jake", setup).unwrap();
    assert_eq!(game.score(), 100);
}

#[test]
fn test_perfect_game() {
    let mut game = Game::new("Jake");
    for _ in 0..12 {
        game.register_pins(10).unwrap();
    }
    assert_eq!(game.score(), 300);
    assert!(game.is_ended());

    let before = game.clone();
    assert_eq!(game.register_pins(0), Err(RollError::GameEnded));
    assert_eq!(game, before);
}

#[test]
fn test_gutter_game() {
    let mut game = Game::new("Jake");
    for _ in 0..20 {
        game.register_pins(0).unwrap();
    }
    assert_eq!(game.score(), 0);
    assert!(game.is_ended());
}

#[test]
fn test_known_game() {
    let rolls: [i64; 19] = [1, 4, 4, 5, 6, 4, 5, 5, 10, 0, 1, 7, 3, 6, 4, 10, 2, 8, 6];
    let mut game = Game::new("Jake");
    roll_all(&mut game, &rolls);
    assert_eq!(game.score(), 133);
    assert!(game.is_ended());

    let card = game.scorecard().unwrap();
    assert_eq!(card, frame_scores(game.rolls()));
    assert_eq!(card[9], Some(133));
    assert_eq!(total_score(game.rolls()), 133);
}

#[test]
fn test_all_spares_with_fives() {
    let game = Game::replay("Jake", [5i64; 21]).unwrap();
    assert_eq!(game.score(), 150);
    assert!(game.is_ended());
}

#[test]
fn test_alternating_strikes_and_spares() {
    // Strike then 5/5 spare, repeated; the 10th frame spare earns one fill ball.
    let rolls = [10, 5, 5, 10, 5, 5, 10, 5, 5, 10, 5, 5, 10, 5, 5, 10];
    let game = Game::replay("Jake", rolls).unwrap();
    assert_eq!(game.score(), 200);
    assert!(game.is_ended());
}

#[test]
fn test_tenth_frame_open_after_ninth_strike() {
    let mut rolls = vec![0i64; 16];
    rolls.extend([10, 3, 4]);
    let game = Game::replay("Jake", rolls).unwrap();
    assert_eq!(game.score(), 10 + 3 + 4 + 3 + 4);
    assert!(game.is_ended());
    assert_eq!(game.frame(), 10);
}

#[test]
fn test_count_next_reports_owed_rolls() {
    let mut game = Game::new("Jake");
    game.register_pins(10).unwrap();
    assert_eq!(game.count_next(), 2);
    game.register_pins(10).unwrap();
    assert_eq!(game.count_next(), 2);
    game.register_pins(4).unwrap();
    assert_eq!(game.count_next(), 1);
    game.register_pins(6).unwrap();
    assert_eq!(game.count_next(), 1);
    game.register_pins(0).unwrap();
    assert_eq!(game.count_next(), 0);
    assert_eq!(game.score(), 24 + 20 + 10);
}

#[test]
fn test_list_boundaries_matches_table() {
    let game = Game::new("Jake");
    let listed: Vec<(&str, i64)> = game
        .list_boundaries()
        .iter()
        .map(|b| (b.field.as_str(), b.max))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("pins_rest", 10),
            ("frame", 10),
            ("roll", 2),
            ("score", 300),
            ("count_next", 2),
        ]
    );
}
