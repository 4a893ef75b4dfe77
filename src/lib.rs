//! Ten-pin bowling scoring (workspace facade crate).
//!
//! This package exposes `tenpin::{core, adapter, types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use tenpin_adapter as adapter;
pub use tenpin_core as core;
pub use tenpin_types as types;
