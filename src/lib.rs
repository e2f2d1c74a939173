//! Quares (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can use `quares::{core,bot,types}`.

pub use quares_bot as bot;
pub use quares_core as core;
pub use quares_types as types;
