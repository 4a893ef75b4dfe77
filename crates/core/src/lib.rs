//! Core scoring module - pure, deterministic, and testable
//!
//! This crate contains the ten-pin rules, the game state machine and the
//! scorecard arithmetic. It has **zero dependencies** on the CLI, networking
//! or I/O, making it:
//!
//! - **Deterministic**: the same roll sequence always produces the same score
//! - **Testable**: every rule is reachable through [`Game::register_pins`]
//! - **Portable**: runs behind the CLI, the TCP adapter, or a test harness
//!
//! # Module Structure
//!
//! - [`game`]: the [`Game`] state machine (frame/roll bookkeeping, bonus credits)
//! - [`setup`]: explicit starting state and its boundary validation
//! - [`scoring`]: per-frame scorecard computed from a roll history
//! - [`snapshot`]: plain copy of the game state for observers
//!
//! # Rules
//!
//! - Ten frames, two balls per frame unless the first ball is a strike
//! - A strike is credited with the next two rolls, a spare with the next one
//! - A strike or spare in the 10th frame earns fill balls (two or one) that
//!   settle the bonus without opening an 11th frame
//!
//! # Example
//!
//! ```
//! use tenpin_core::Game;
//!
//! let mut game = Game::new("Jake");
//! for pins in [10, 7, 3, 4] {
//!     game.register_pins(pins).unwrap();
//! }
//!
//! assert_eq!(game.frame(), 3);
//! assert_eq!(game.roll(), 2);
//! assert_eq!(game.score(), 20 + 14 + 4);
//! assert_eq!(game.count_next(), 0);
//! ```

pub mod game;
pub mod scoring;
pub mod setup;
pub mod snapshot;

pub use tenpin_types as types;

// Re-export commonly used types for convenience
pub use game::Game;
pub use scoring::{frame_scores, total_score, Scorecard};
pub use setup::GameSetup;
pub use snapshot::GameSnapshot;
pub use types::{Boundary, Field, Numeric, RollError, SetupError, BOUNDARIES};
