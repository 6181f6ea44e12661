//! Stacker core - the rules engine, pure and deterministic
//!
//! Everything here is plain data and arithmetic: no I/O, no clocks, no
//! threads. Time comes in as a [`Duration`](std::time::Duration) per update and
//! input comes in as press/release edges, so the same seed and the same event
//! stream always produce the same game.
//!
//! # Module Structure
//!
//! - [`geometry`]: integer vectors and bounding boxes
//! - [`catalog`]: tetromino shapes, spawn offsets, colors and kick tables
//! - [`matrix`]: the 10x40 grid of locked cells, collision and line clears
//! - [`rng`]: 7-bag piece generation
//! - [`queue`]: hold slot and next-piece preview
//! - [`timer`]: gravity/soft-drop timer and the DAS/ARR timer
//! - [`feedback`]: combo and back-to-back bookkeeping plus display text
//! - [`scoring`]: points for drops, clears and spins
//! - [`board`]: the state machine tying all of the above together
//! - [`controller`]: edge detection and auto-repeat for held keys
//! - [`game`]: a board and a controller driven together
//! - [`snapshot`]: a render-ready copy of the board
//!
//! # Rules
//!
//! - **Coordinates**: `y` grows upward; row 0 is the floor. Pieces spawn in the
//!   20-row buffer above the visible field and nothing above row 39 collides.
//! - **Rotation**: ordered kick lists, first fit wins, 180 degree turns included.
//! - **No lock delay**: a landed piece rests until it is hard-dropped.
//! - **Hold**: unlimited, any number of times per piece.
//! - **Spins**: T pieces use the 3-corner rule with front corners deciding
//!   between full and mini; other pieces spin when wedged in place.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use stacker_core::Game;
//! use stacker_core::types::{Action, ActionEvent};
//!
//! let mut game = Game::new(12345);
//! game.tick([ActionEvent::press(Action::MoveRight)], Duration::from_millis(16));
//! game.tick(
//!     [
//!         ActionEvent::release(Action::MoveRight),
//!         ActionEvent::press(Action::HardDrop),
//!     ],
//!     Duration::from_millis(16),
//! );
//!
//! assert!(game.board().score() > 0); // hard drop awards points
//! ```

pub mod board;
pub mod catalog;
pub mod controller;
pub mod feedback;
pub mod game;
pub mod geometry;
pub mod matrix;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use stacker_types as types;

pub use board::{ActivePiece, Board};
pub use catalog::{Catalog, KickTable, Minos, Rgb, Tetromino};
pub use controller::{Controller, Handling, HandlingConfig};
pub use feedback::{fade_alpha, ClearFeedback};
pub use game::Game;
pub use geometry::{Bounds, RectSize, Vec2};
pub use matrix::Matrix;
pub use queue::{HoldSlot, NextQueue};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{drop_score, lock_score, ScoreResult};
pub use snapshot::{BoardSnapshot, CellView};
pub use timer::{DasArrTimer, Timer};
