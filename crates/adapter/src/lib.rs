//! Adapter module - drive a game over a TCP socket with a JSON protocol
//!
//! This crate lets an external client (a scoreboard, a lane controller, a
//! test harness) register rolls and read back the score without linking the
//! engine. Each connection owns exactly one [`Game`](tenpin_core::Game), so
//! rolls on a game are applied one at a time in arrival order.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to TCP socket (default: 127.0.0.1:7878)
//! 2. **Handshake**: Client sends `hello` naming the player, server responds
//!    with `welcome` followed by an `observation` of the new game
//! 3. **Rolling**: Client sends `roll`, server answers `ack` + `observation`
//!    or a single `error`
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **hello**: Start (or restart) a game; may carry a `resume` state
//! - **roll**: Register one roll's pin count
//! - **observe**: Ask for the current observation
//!
//! ## Server → Client
//!
//! - **welcome**: Response to hello
//! - **observation**: Frame, roll, pins standing, score, bonus owed, scorecard
//! - **ack**: Roll accepted
//! - **error**: Rejected message with a stable `code` and the engine's message
//!
//! # Environment Variables
//!
//! - `TENPIN_ADAPTER_HOST`: Bind address (default: "127.0.0.1")
//! - `TENPIN_ADAPTER_PORT`: Port number (default: 7878)
//! - `TENPIN_ADAPTER_DISABLED`: Set to "1" or "true" to disable the adapter
//! - `TENPIN_ADAPTER_LOG_PATH`: Append every wire line to this file
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"player":"Jake","protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":1234567890,"protocol_version":"1.0.0","player":"Jake"}
//! Server -> Client: {"type":"observation","seq":1,"ts":1234567890,"player":"Jake","frame":1,...}
//! Client -> Server: {"type":"roll","seq":2,"pins":10}
//! Server -> Client: {"type":"ack","seq":2,"ts":1234567891,"status":"ok"}
//! Server -> Client: {"type":"observation","seq":2,"ts":1234567891,"player":"Jake","frame":2,...}
//! Client -> Server: {"type":"roll","seq":3,"pins":"a"}
//! Server -> Client: {"type":"error","seq":3,"ts":1234567892,"code":"not_a_number","message":"pins registration failed, not a number"}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"player":"test","protocol_version":"1.0.0"}
//! ```

pub mod protocol;
pub mod server;
pub mod session;

pub use tenpin_core as core;
pub use tenpin_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::{run_server, ServerConfig};
pub use session::{Outcome, Session};
