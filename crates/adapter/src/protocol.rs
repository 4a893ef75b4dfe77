//! Protocol module - JSON message types for the adapter
//!
//! All messages have `type` and `seq`; server messages also carry `ts`
//! (timestamp in ms).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Game, GameSetup, Scorecard};
use crate::types::{Numeric, RollError, SetupError};

/// Version spoken by this server; clients must share the major version
pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HelloType {
    #[default]
    #[serde(rename = "hello")]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RollType {
    #[default]
    #[serde(rename = "roll")]
    Roll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObserveType {
    #[default]
    #[serde(rename = "observe")]
    Observe,
}

/// Client hello message (starts or restarts the connection's game)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub player: String,
    pub protocol_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeState>,
}

/// Explicit starting state; omitted fields take their fresh-game value
///
/// Values are raw JSON so that non-integers reach the engine's validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pins_rest: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_next: Option<Value>,
    #[serde(default)]
    pub ended: bool,
}

impl ResumeState {
    pub fn to_setup(&self) -> GameSetup {
        let fresh = GameSetup::default();
        let pick = |value: &Option<Value>, default: Numeric| {
            value.as_ref().map(to_numeric).unwrap_or(default)
        };
        GameSetup {
            pins_rest: pick(&self.pins_rest, fresh.pins_rest),
            frame: pick(&self.frame, fresh.frame),
            roll: pick(&self.roll, fresh.roll),
            score: pick(&self.score, fresh.score),
            count_next: pick(&self.count_next, fresh.count_next),
            ended: self.ended,
        }
    }
}

/// Roll message: one roll's pin count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: RollType,
    pub seq: u64,
    pub pins: Value,
}

/// Observe message: request the current observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ObserveMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: ObserveType,
    pub seq: u64,
}

/// Only JSON integers count as numbers; anything else keeps its JSON text.
pub fn to_numeric(value: &Value) -> Numeric {
    match value.as_i64() {
        Some(v) => Numeric::Int(v),
        None => Numeric::Invalid(value.to_string()),
    }
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    InvalidCommand,
    NotANumber,
    NegativeCount,
    ExceedsTenPins,
    ExceedsPinsRest,
    GameEnded,
    NonNumericInput,
    NegativeInput,
    BelowMinimum,
    ExceedsMaximum,
}

impl From<RollError> for ErrorCode {
    fn from(err: RollError) -> Self {
        match err {
            RollError::NotANumber => ErrorCode::NotANumber,
            RollError::NegativeCount => ErrorCode::NegativeCount,
            RollError::ExceedsTenPins => ErrorCode::ExceedsTenPins,
            RollError::ExceedsPinsRest => ErrorCode::ExceedsPinsRest,
            RollError::GameEnded => ErrorCode::GameEnded,
        }
    }
}

impl From<SetupError> for ErrorCode {
    fn from(err: SetupError) -> Self {
        match err {
            SetupError::NonNumericInput(_) => ErrorCode::NonNumericInput,
            SetupError::NegativeInput(_) => ErrorCode::NegativeInput,
            SetupError::BelowMinimum { .. } => ErrorCode::BelowMinimum,
            SetupError::ExceedsMaximum { .. } => ErrorCode::ExceedsMaximum,
        }
    }
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub player: String,
}

/// Acknowledgment for an accepted roll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Game state observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub player: String,
    pub frame: u8,
    pub roll: u8,
    pub pins_rest: u8,
    pub score: u16,
    pub count_next: u8,
    pub ended: bool,
    pub playable: bool,
    pub rolls: Vec<u8>,
    /// Cumulative per-frame scorecard; absent for resumed games
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Scorecard>,
}

/// Any message the server writes
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl ServerMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ServerMessage::Welcome(m) => m.seq,
            ServerMessage::Ack(m) => m.seq,
            ServerMessage::Error(m) => m.seq,
            ServerMessage::Observation(m) => m.seq,
        }
    }
}

// ============== Parsing ==============

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Roll(RollMessage),
    Observe(ObserveMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

/// Parse one inbound line
///
/// An unknown `type` is not a parse error: it comes back as
/// [`ParsedMessage::Unknown`] so the server can answer with its `seq`.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "roll")]
        Roll(RollMessage),
        #[serde(rename = "observe")]
        Observe(ObserveMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Roll(m)) => Ok(ParsedMessage::Roll(m)),
        Ok(InboundMessage::Observe(m)) => Ok(ParsedMessage::Observe(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let envelope = serde_json::from_str::<Envelope>(json)?;
            match envelope.msg_type {
                Some(t) if !matches!(t.as_str(), "hello" | "roll" | "observe") => {
                    Ok(ParsedMessage::Unknown(UnknownMessage {
                        seq: envelope.seq.unwrap_or(0),
                        msg_type: t,
                    }))
                }
                _ => Err(e),
            }
        }
    }
}

/// Best-effort `seq` from a line that failed to parse, for error replies
pub fn extract_seq_best_effort(json: &str) -> u64 {
    serde_json::from_str::<Value>(json)
        .ok()
        .and_then(|v| v.get("seq").and_then(Value::as_u64))
        .unwrap_or(0)
}

// ============== Utility Functions ==============

/// Create a hello message
pub fn create_hello(seq: u64, player: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        player: player.to_string(),
        protocol_version: protocol_version.to_string(),
        resume: None,
    }
}

/// Create a roll message
pub fn create_roll(seq: u64, pins: impl Into<Value>) -> RollMessage {
    RollMessage {
        msg_type: RollType::Roll,
        seq,
        pins: pins.into(),
    }
}

/// Create a welcome message
pub fn create_welcome(seq: u64, protocol_version: &str, player: &str) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        player: player.to_string(),
    }
}

/// Create an ack message
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Build an observation from the game's current state
pub fn build_observation(game: &Game, seq: u64) -> ObservationMessage {
    let snap = game.snapshot();
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        player: game.player_name().to_string(),
        frame: snap.frame,
        roll: snap.roll,
        pins_rest: snap.pins_rest,
        score: snap.score,
        count_next: snap.count_next,
        ended: snap.ended,
        playable: snap.playable(),
        rolls: snap.rolls.to_vec(),
        frames: snap.frames,
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
