//! Match-three engine (workspace facade crate).
//!
//! The board, matcher and cascade live in `crates/core`, move search in
//! `crates/engine` and the shared value types in `crates/types`. This package
//! adds game files, the command line and the text runner.

pub use match_three_core as core;
pub use match_three_engine as engine;
pub use match_three_types as types;

pub mod cli;
pub mod config;
pub mod runner;
