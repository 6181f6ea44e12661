//! Hold slot and next-piece preview.

use crate::rng::PieceBag;
use crate::types::{PieceKind, NEXT_QUEUE_SIZE};

/// Holds at most one piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldSlot {
    held: Option<PieceKind>,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self { held: None }
    }

    pub fn get(&self) -> Option<PieceKind> {
        self.held
    }

    /// Store `kind` and hand back whatever was held before.
    pub fn swap(&mut self, kind: PieceKind) -> Option<PieceKind> {
        self.held.replace(kind)
    }

    pub fn clear(&mut self) {
        self.held = None;
    }
}

/// Fixed-length FIFO of upcoming pieces, always full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextQueue {
    pieces: [PieceKind; NEXT_QUEUE_SIZE],
}

impl NextQueue {
    /// Fill a new queue from the bag.
    pub fn new(bag: &mut PieceBag) -> Self {
        Self {
            pieces: std::array::from_fn(|_| bag.draw()),
        }
    }

    /// Discard the contents and refill from the bag.
    pub fn refill(&mut self, bag: &mut PieceBag) {
        for slot in self.pieces.iter_mut() {
            *slot = bag.draw();
        }
    }

    /// Take the front piece and append `kind` at the back.
    pub fn pop_and_push(&mut self, kind: PieceKind) -> PieceKind {
        let front = self.pieces[0];
        self.pieces.rotate_left(1);
        self.pieces[NEXT_QUEUE_SIZE - 1] = kind;
        front
    }

    pub fn peek(&self) -> PieceKind {
        self.pieces[0]
    }

    /// Upcoming pieces, front first.
    pub fn as_slice(&self) -> &[PieceKind] {
        &self.pieces
    }
}
