//! Stacker (workspace facade crate).
//!
//! Re-exports the engine crates under `stacker::{core, input, types}` and
//! holds the terminal view used by the `stacker` binary.

pub use stacker_core as core;
pub use stacker_input as input;
pub use stacker_types as types;

pub mod view;
