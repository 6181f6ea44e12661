//! Snapshot - a plain-data copy of the board for renderers.
//!
//! A [`BoardSnapshot`] is filled in place by `Board::snapshot_into`, so a host
//! can keep one around and refresh it every frame without allocating.

use arrayvec::ArrayVec;

use crate::catalog::Minos;
use crate::feedback::ClearFeedback;
use crate::geometry::Vec2;
use crate::types::{Cell, Orientation, PieceKind, MATRIX_HEIGHT, MATRIX_WIDTH, NEXT_QUEUE_SIZE};

/// What a cell shows once the active and ghost pieces are overlaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    Empty,
    Locked(PieceKind),
    Active(PieceKind),
    Ghost(PieceKind),
}

/// Everything a renderer needs, copied out of a board once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Locked cells, row-major from the bottom row.
    pub cells: [Cell; MATRIX_WIDTH * MATRIX_HEIGHT],
    pub active_kind: PieceKind,
    pub orientation: Orientation,
    pub active: Minos,
    pub ghost: Minos,
    pub hold: Option<PieceKind>,
    pub next: [PieceKind; NEXT_QUEUE_SIZE],
    pub score: u64,
    pub feedback: ClearFeedback,
    pub feedback_alpha: u8,
    pub clear_preview: ArrayVec<usize, MATRIX_HEIGHT>,
}

impl BoardSnapshot {
    pub fn clear(&mut self) {
        self.cells = [None; MATRIX_WIDTH * MATRIX_HEIGHT];
        self.active_kind = PieceKind::I;
        self.orientation = Orientation::North;
        self.active = Minos::new([Vec2::ZERO; 4]);
        self.ghost = Minos::new([Vec2::ZERO; 4]);
        self.hold = None;
        self.next = [PieceKind::I; NEXT_QUEUE_SIZE];
        self.score = 0;
        self.feedback = ClearFeedback::default();
        self.feedback_alpha = 0;
        self.clear_preview.clear();
    }

    /// Locked cell at `(x, y)`, `None` outside the matrix.
    pub fn locked(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || x >= MATRIX_WIDTH as i32 || y < 0 || y >= MATRIX_HEIGHT as i32 {
            return None;
        }
        Some(self.cells[y as usize * MATRIX_WIDTH + x as usize])
    }

    /// The active piece wins over the ghost, and the ghost over empty space.
    pub fn view(&self, x: i32, y: i32) -> CellView {
        let p = Vec2::new(x, y);
        if self.active.contains(p) {
            return CellView::Active(self.active_kind);
        }
        if let Some(Some(kind)) = self.locked(x, y) {
            return CellView::Locked(kind);
        }
        if self.ghost.contains(p) {
            return CellView::Ghost(self.active_kind);
        }
        CellView::Empty
    }

    /// Whether row `y` is about to be cleared by a hard drop.
    pub fn is_preview_row(&self, y: usize) -> bool {
        self.clear_preview.contains(&y)
    }

    /// The bottom `count` rows, top row first. `VISIBLE_HEIGHT` gives the
    /// playfield; a few more show pieces entering from the buffer.
    pub fn rows_top_down(&self, count: usize) -> impl Iterator<Item = usize> {
        (0..count.min(MATRIX_HEIGHT)).rev()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            cells: [None; MATRIX_WIDTH * MATRIX_HEIGHT],
            active_kind: PieceKind::I,
            orientation: Orientation::North,
            active: Minos::new([Vec2::ZERO; 4]),
            ghost: Minos::new([Vec2::ZERO; 4]),
            hold: None,
            next: [PieceKind::I; NEXT_QUEUE_SIZE],
            score: 0,
            feedback: ClearFeedback::default(),
            feedback_alpha: 0,
            clear_preview: ArrayVec::new(),
        }
    }
}
