//! Terminal input for the engine.
//!
//! Maps `crossterm` key events onto [`crate::types::Action`] press/release
//! edges through configurable [`KeyBindings`], and tracks held keys for
//! terminals that never report key releases.

pub mod handler;
pub mod map;

pub use stacker_types as types;

pub use handler::{Releases, TerminalInput};
pub use map::{should_quit, KeyBindings};
