//! Per-connection protocol state.
//!
//! A [`Session`] owns one connection's game and turns each inbound line into
//! the replies to write back. It does no I/O, so the socket loop in
//! [`server`](crate::server) stays a thin shell around it.

use tracing::{debug, warn};

use crate::core::Game;
use crate::protocol::*;

/// Replies for one inbound line
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub replies: Vec<ServerMessage>,
    /// Close the connection after writing the replies
    pub close: bool,
}

impl Outcome {
    fn reply(msg: ServerMessage) -> Self {
        Self {
            replies: vec![msg],
            close: false,
        }
    }

    fn error(seq: u64, code: ErrorCode, message: &str) -> Self {
        Self::reply(ServerMessage::Error(create_error(seq, code, message)))
    }
}

#[derive(Debug)]
pub struct Session {
    protocol_version: String,
    game: Option<Game>,
    last_seq: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PROTOCOL_VERSION)
    }
}

impl Session {
    pub fn new(protocol_version: &str) -> Self {
        Self {
            protocol_version: protocol_version.to_string(),
            game: None,
            last_seq: None,
        }
    }

    /// The connection's game, once a hello has been accepted
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let msg = match parse_message(line) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "unparseable line");
                return Outcome::error(
                    extract_seq_best_effort(line),
                    ErrorCode::InvalidCommand,
                    &format!("invalid message: {}", e),
                );
            }
        };

        match msg {
            ParsedMessage::Hello(hello) => self.handle_hello(hello),
            ParsedMessage::Roll(roll) => self.handle_roll(roll),
            ParsedMessage::Observe(observe) => self.handle_observe(observe),
            ParsedMessage::Unknown(unknown) => Outcome::error(
                unknown.seq,
                ErrorCode::InvalidCommand,
                &format!("unknown message type {}", unknown.msg_type),
            ),
        }
    }

    fn handle_hello(&mut self, hello: HelloMessage) -> Outcome {
        if self.game.is_some() && !accept_seq(&mut self.last_seq, hello.seq) {
            return Outcome::error(
                hello.seq,
                ErrorCode::InvalidCommand,
                "seq must be strictly increasing",
            );
        }

        if major(&hello.protocol_version) != major(&self.protocol_version) {
            warn!(requested = %hello.protocol_version, "protocol mismatch");
            let mut out = Outcome::error(
                hello.seq,
                ErrorCode::ProtocolMismatch,
                &format!("Protocol version {} not supported", hello.protocol_version),
            );
            out.close = true;
            return out;
        }

        let game = match hello.resume.as_ref() {
            None => Game::new(hello.player.as_str()),
            Some(resume) => match Game::resume(hello.player.as_str(), resume.to_setup()) {
                Ok(game) => game,
                Err(e) => return Outcome::error(hello.seq, e.into(), &e.to_string()),
            },
        };

        debug!(player = %hello.player, resumed = hello.resume.is_some(), "game started");
        let observation = build_observation(&game, hello.seq);
        self.game = Some(game);
        self.last_seq = Some(hello.seq);

        Outcome {
            replies: vec![
                ServerMessage::Welcome(create_welcome(
                    hello.seq,
                    &self.protocol_version,
                    &hello.player,
                )),
                ServerMessage::Observation(observation),
            ],
            close: false,
        }
    }

    fn handle_roll(&mut self, roll: RollMessage) -> Outcome {
        let Some(game) = self.game.as_mut() else {
            return Outcome::error(roll.seq, ErrorCode::HandshakeRequired, "send hello first");
        };
        if !accept_seq(&mut self.last_seq, roll.seq) {
            return Outcome::error(
                roll.seq,
                ErrorCode::InvalidCommand,
                "seq must be strictly increasing",
            );
        }

        match game.register_pins(to_numeric(&roll.pins)) {
            Ok(()) => Outcome {
                replies: vec![
                    ServerMessage::Ack(create_ack(roll.seq)),
                    ServerMessage::Observation(build_observation(game, roll.seq)),
                ],
                close: false,
            },
            Err(e) => {
                debug!(seq = roll.seq, error = %e, "roll rejected");
                Outcome::error(roll.seq, e.into(), &e.to_string())
            }
        }
    }

    fn handle_observe(&mut self, observe: ObserveMessage) -> Outcome {
        let Some(game) = self.game.as_ref() else {
            return Outcome::error(
                observe.seq,
                ErrorCode::HandshakeRequired,
                "send hello first",
            );
        };
        if !accept_seq(&mut self.last_seq, observe.seq) {
            return Outcome::error(
                observe.seq,
                ErrorCode::InvalidCommand,
                "seq must be strictly increasing",
            );
        }
        Outcome::reply(ServerMessage::Observation(build_observation(game, observe.seq)))
    }
}

/// Sequence numbers must strictly increase once the handshake is done.
fn accept_seq(last_seq: &mut Option<u64>, seq: u64) -> bool {
    match *last_seq {
        Some(prev) if seq <= prev => false,
        _ => {
            *last_seq = Some(seq);
            true
        }
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_line(seq: u64) -> String {
        format!(
            r#"{{"type":"hello","seq":{},"player":"Jake","protocol_version":"1.0.0"}}"#,
            seq
        )
    }

    fn roll_line(seq: u64, pins: &str) -> String {
        format!(r#"{{"type":"roll","seq":{},"pins":{}}}"#, seq, pins)
    }

    fn error_code(out: &Outcome) -> ErrorCode {
        match out.replies.as_slice() {
            [ServerMessage::Error(e)] => e.code,
            other => panic!("expected a single error, got {:?}", other),
        }
    }

    #[test]
    fn test_roll_before_hello_is_rejected() {
        let mut session = Session::default();
        let out = session.handle_line(&roll_line(1, "5"));
        assert_eq!(error_code(&out), ErrorCode::HandshakeRequired);
        assert!(session.game().is_none());
    }

    #[test]
    fn test_repeated_roll_before_hello_still_needs_handshake() {
        let mut session = Session::default();
        session.handle_line(&roll_line(4, "5"));
        let out = session.handle_line(&roll_line(4, "5"));
        assert_eq!(error_code(&out), ErrorCode::HandshakeRequired);

        session.handle_line(&hello_line(1));
        let out = session.handle_line(&roll_line(2, "5"));
        assert!(matches!(out.replies[0], ServerMessage::Ack(_)));
    }

    #[test]
    fn test_hello_sends_welcome_and_observation() {
        let mut session = Session::default();
        let out = session.handle_line(&hello_line(1));
        assert!(!out.close);
        assert!(matches!(out.replies[0], ServerMessage::Welcome(_)));
        match &out.replies[1] {
            ServerMessage::Observation(o) => {
                assert_eq!(o.player, "Jake");
                assert_eq!(o.frame, 1);
                assert_eq!(o.pins_rest, 10);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_protocol_mismatch_closes() {
        let mut session = Session::default();
        let out = session.handle_line(
            r#"{"type":"hello","seq":1,"player":"Jake","protocol_version":"2.0.0"}"#,
        );
        assert_eq!(error_code(&out), ErrorCode::ProtocolMismatch);
        assert!(out.close);
    }

    #[test]
    fn test_rolls_update_game() {
        let mut session = Session::default();
        session.handle_line(&hello_line(1));
        let out = session.handle_line(&roll_line(2, "10"));
        assert!(matches!(out.replies[0], ServerMessage::Ack(_)));
        let game = session.game().unwrap();
        assert_eq!(game.frame(), 2);
        assert_eq!(game.count_next(), 2);
    }

    #[test]
    fn test_roll_errors_carry_engine_message() {
        let mut session = Session::default();
        session.handle_line(&hello_line(1));

        let out = session.handle_line(&roll_line(2, r#""a""#));
        match out.replies.as_slice() {
            [ServerMessage::Error(e)] => {
                assert_eq!(e.code, ErrorCode::NotANumber);
                assert_eq!(e.message, "pins registration failed, not a number");
            }
            other => panic!("unexpected replies {:?}", other),
        }

        assert_eq!(
            error_code(&session.handle_line(&roll_line(3, "-1"))),
            ErrorCode::NegativeCount
        );
        assert_eq!(
            error_code(&session.handle_line(&roll_line(4, "11"))),
            ErrorCode::ExceedsTenPins
        );
        session.handle_line(&roll_line(5, "6"));
        assert_eq!(
            error_code(&session.handle_line(&roll_line(6, "5"))),
            ErrorCode::ExceedsPinsRest
        );
        assert_eq!(session.game().unwrap().rolls(), &[6]);
    }

    #[test]
    fn test_stale_seq_is_rejected() {
        let mut session = Session::default();
        session.handle_line(&hello_line(1));
        session.handle_line(&roll_line(2, "3"));
        let out = session.handle_line(&roll_line(2, "3"));
        assert_eq!(error_code(&out), ErrorCode::InvalidCommand);
        assert_eq!(session.game().unwrap().rolls(), &[3]);
    }

    #[test]
    fn test_resume_validation_errors() {
        let mut session = Session::default();
        let out = session.handle_line(
            r#"{"type":"hello","seq":1,"player":"Jake","protocol_version":"1.0.0","resume":{"roll":"a"}}"#,
        );
        match out.replies.as_slice() {
            [ServerMessage::Error(e)] => {
                assert_eq!(e.code, ErrorCode::NonNumericInput);
                assert_eq!(e.message, "player has non-number roll");
            }
            other => panic!("unexpected replies {:?}", other),
        }
        assert!(session.game().is_none());
    }

    #[test]
    fn test_resumed_ended_game_rejects_rolls() {
        let mut session = Session::default();
        session.handle_line(
            r#"{"type":"hello","seq":1,"player":"Jake","protocol_version":"1.0.0","resume":{"pins_rest":4,"frame":10,"roll":2,"score":200,"count_next":0,"ended":true}}"#,
        );
        let out = session.handle_line(&roll_line(2, "3"));
        assert_eq!(error_code(&out), ErrorCode::GameEnded);
    }

    #[test]
    fn test_unknown_and_malformed_lines() {
        let mut session = Session::default();
        let out = session.handle_line(r#"{"type":"bowl","seq":7}"#);
        assert_eq!(error_code(&out), ErrorCode::InvalidCommand);
        assert_eq!(out.replies[0].seq(), 7);

        let out = session.handle_line("{");
        assert_eq!(error_code(&out), ErrorCode::InvalidCommand);
    }

    #[test]
    fn test_observe_after_hello() {
        let mut session = Session::default();
        assert_eq!(
            error_code(&session.handle_line(r#"{"type":"observe","seq":1}"#)),
            ErrorCode::HandshakeRequired
        );
        session.handle_line(&hello_line(1));
        session.handle_line(&roll_line(2, "4"));
        let out = session.handle_line(r#"{"type":"observe","seq":3}"#);
        match out.replies.as_slice() {
            [ServerMessage::Observation(o)] => {
                assert_eq!(o.score, 4);
                assert_eq!(o.roll, 2);
            }
            other => panic!("unexpected replies {:?}", other),
        }
    }
}
