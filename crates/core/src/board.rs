//! Board module - the rules state machine
//!
//! A [`Board`] owns the matrix, the active piece, the hold slot, the next
//! queue, gravity, feedback and score. Every mutation goes through one of its
//! operations; the controller never touches the matrix directly.
//!
//! Pieces only lock on a hard drop. A piece that lands under gravity or soft
//! drop rests on the stack until the player hard-drops it.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Catalog, Minos, Rgb};
use crate::feedback::{fade_alpha, ClearFeedback};
use crate::geometry::Vec2;
use crate::matrix::{Matrix, RowList};
use crate::queue::{HoldSlot, NextQueue};
use crate::rng::PieceBag;
use crate::scoring::{self, ScoreResult};
use crate::snapshot::BoardSnapshot;
use crate::timer::Timer;
use crate::types::{
    Orientation, PieceKind, RotateDirection, SpinKind, FEEDBACK_FADE_END, GRAVITY_PERIOD,
};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub orientation: Orientation,
    /// Absolute matrix positions of the four cells.
    pub minos: Minos,
}

#[derive(Debug, Clone)]
pub struct Board {
    catalog: Arc<Catalog>,
    bag: PieceBag,
    hold: HoldSlot,
    next: NextQueue,
    matrix: Matrix,
    active: ActivePiece,
    ghost: Minos,
    clear_preview: RowList,
    gravity_timer: Timer,
    gravity_enabled: bool,
    /// Frozen at the last lock; what renderers show.
    previous: ClearFeedback,
    /// Being filled in while the active piece is manipulated.
    current: ClearFeedback,
    feedback_age: Duration,
    last_lock: ScoreResult,
    score: u64,
}

impl Board {
    /// New board with the first piece already spawned.
    pub fn new(catalog: Arc<Catalog>, seed: u32) -> Self {
        let mut bag = PieceBag::new(seed);
        let mut next = NextQueue::new(&mut bag);
        let first = next.pop_and_push(bag.draw());
        let spawn = catalog.spawn_state(first);

        let mut board = Self {
            catalog,
            bag,
            hold: HoldSlot::new(),
            next,
            matrix: Matrix::new(),
            active: ActivePiece {
                kind: first,
                orientation: Orientation::North,
                minos: spawn,
            },
            ghost: spawn,
            clear_preview: RowList::new(),
            gravity_timer: Timer::new(GRAVITY_PERIOD),
            gravity_enabled: true,
            previous: ClearFeedback::default(),
            current: ClearFeedback::new(first),
            feedback_age: Duration::ZERO,
            last_lock: ScoreResult::default(),
            score: 0,
        };
        board.spawn(first);
        board
    }

    /// Board using the standard catalog.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(Arc::new(Catalog::standard()), seed)
    }

    // ---- queries ----

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn active_kind(&self) -> PieceKind {
        self.active.kind
    }

    pub fn orientation(&self) -> Orientation {
        self.active.orientation
    }

    pub fn active_minos(&self) -> &Minos {
        &self.active.minos
    }

    pub fn ghost_minos(&self) -> &Minos {
        &self.ghost
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold.get()
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        self.next.as_slice()
    }

    /// Position inside the current 7-bag.
    pub fn bag_index(&self) -> usize {
        self.bag.index()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Breakdown of the points awarded by the most recent lock.
    pub fn last_lock(&self) -> &ScoreResult {
        &self.last_lock
    }

    /// Feedback of the last locked piece (what a renderer shows).
    pub fn feedback(&self) -> &ClearFeedback {
        &self.previous
    }

    /// Feedback being built for the active piece.
    pub fn pending_feedback(&self) -> &ClearFeedback {
        &self.current
    }

    /// Color of the last locked piece, for its feedback text.
    pub fn feedback_color(&self) -> Option<Rgb> {
        self.previous.piece.map(|kind| self.catalog.color(kind))
    }

    /// Opacity for feedback text, fading out after a notable lock.
    pub fn feedback_alpha(&self) -> u8 {
        fade_alpha(self.feedback_age)
    }

    /// Rows that a hard drop right now would clear, bottom to top.
    pub fn clear_preview(&self) -> &[usize] {
        &self.clear_preview
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Whether the active piece overlaps the stack (it spawned into blocks).
    pub fn is_spawn_blocked(&self) -> bool {
        self.matrix.collides(&self.active.minos)
    }

    /// Whether the active piece could be translated by `offset` without
    /// touching a wall, the floor or a locked cell.
    #[inline(always)]
    pub fn can_move(&self, offset: Vec2) -> bool {
        !self.matrix.collides(&self.active.minos.translated(offset))
    }

    // ---- operations ----

    /// Slide sideways up to `|max_movement|` columns, stopping at the first
    /// blocked column. Returns the signed distance actually moved.
    pub fn move_piece(&mut self, max_movement: i32) -> i32 {
        let step = max_movement.signum();
        let mut moved = 0;
        while moved != max_movement && self.can_move(Vec2::new(moved + step, 0)) {
            moved += step;
        }

        if moved != 0 {
            self.active.minos = self.active.minos.translated(Vec2::new(moved, 0));
        }
        self.refresh_projection();
        moved
    }

    /// Drop up to `steps` rows, 1 point per row dropped. Never locks.
    pub fn soft_drop_piece(&mut self, steps: u32) -> u32 {
        let dropped = self.fall(steps);
        self.score = self
            .score
            .saturating_add(scoring::drop_score(dropped, false));
        dropped
    }

    /// Drop to the floor, 2 points per row, then lock. Returns rows dropped.
    pub fn hard_drop_piece(&mut self) -> u32 {
        let dropped = self.fall(u32::MAX);
        if dropped > 0 {
            self.current.spin = SpinKind::None;
        }
        self.score = self
            .score
            .saturating_add(scoring::drop_score(dropped, true));
        self.lock_and_spawn_next();
        dropped
    }

    /// Rotate with kicks. The first kick that fits is committed; if none fit
    /// nothing changes and `false` is returned.
    pub fn rotate_piece(&mut self, direction: RotateDirection) -> bool {
        let tetromino = self.catalog.get(self.active.kind);
        let from = self.active.orientation;
        let to = from.rotate(direction);
        let offset = self.active.minos.offset_from(tetromino.state(from));
        let target = tetromino.state(to).translated(offset);

        let Some((kick, minos)) = tetromino
            .kicks(from, direction)
            .iter()
            .map(|&kick| (kick, target.translated(kick)))
            .find(|(_, minos)| !self.matrix.collides(minos))
        else {
            return false;
        };

        self.active.minos = minos;
        self.active.orientation = to;
        self.refresh_projection();
        self.current.spin = self.classify_spin(kick);
        true
    }

    /// Swap the active piece with the hold slot (or the next piece when the
    /// slot is empty). Unlimited per piece.
    pub fn hold_piece(&mut self) {
        let kind = match self.hold.swap(self.active.kind) {
            Some(held) => held,
            None => self.draw_next(),
        };
        self.spawn(kind);
        self.current.spin = SpinKind::None;
        self.current.piece = Some(kind);
    }

    /// Start over: empty matrix, new bag, empty hold, zero score.
    pub fn reset(&mut self) {
        self.matrix.clear();
        self.bag.reset();
        self.hold.clear();
        self.next.refill(&mut self.bag);
        let first = self.draw_next();
        self.spawn(first);
        self.previous = ClearFeedback::default();
        self.current = ClearFeedback::new(first);
        self.last_lock = ScoreResult::default();
        self.score = 0;
        self.feedback_age = Duration::ZERO;
    }

    /// Suspend or resume gravity (soft drop takes over while it is held).
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    /// Advance gravity and feedback aging by `dt`.
    pub fn update(&mut self, dt: Duration) {
        if self.gravity_enabled {
            if self.can_move(Vec2::DOWN) {
                let steps = self.gravity_timer.update(dt);
                if steps > 0 {
                    self.fall(steps);
                }
            } else {
                self.gravity_timer.reset();
            }
        }

        self.feedback_age = self.feedback_age.saturating_add(dt).min(FEEDBACK_FADE_END);
    }

    /// Replace the locked cells, e.g. to load a puzzle.
    pub fn load_matrix(&mut self, matrix: Matrix) {
        self.matrix = matrix;
        self.refresh_projection();
    }

    /// Copy the renderable state into `out` without allocating.
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.cells.copy_from_slice(self.matrix.cells());
        out.active_kind = self.active.kind;
        out.orientation = self.active.orientation;
        out.active = self.active.minos;
        out.ghost = self.ghost;
        out.hold = self.hold.get();
        out.next.copy_from_slice(self.next.as_slice());
        out.score = self.score;
        out.feedback = self.previous;
        out.feedback_alpha = self.feedback_alpha();
        out.clear_preview.clear();
        out.clear_preview
            .try_extend_from_slice(&self.clear_preview)
            .ok();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    // ---- internals ----

    fn draw_next(&mut self) -> PieceKind {
        let fresh = self.bag.draw();
        self.next.pop_and_push(fresh)
    }

    /// Put `kind` at its spawn state facing North and refill gravity so it
    /// falls on the next update.
    fn spawn(&mut self, kind: PieceKind) {
        self.active = ActivePiece {
            kind,
            orientation: Orientation::North,
            minos: self.catalog.spawn_state(kind),
        };
        self.refresh_projection();
        self.gravity_timer.set_to_max();
    }

    /// Clamped walk down without scoring.
    fn fall(&mut self, steps: u32) -> u32 {
        let mut dropped = 0u32;
        while dropped < steps && self.can_move(Vec2::new(0, -(dropped as i32) - 1)) {
            dropped += 1;
        }
        if dropped > 0 {
            self.active.minos = self
                .active
                .minos
                .translated(Vec2::new(0, -(dropped as i32)));
        }
        dropped
    }

    fn refresh_projection(&mut self) {
        self.ghost = self.compute_ghost();
        self.clear_preview = self.matrix.full_rows_with(&self.ghost);
    }

    fn compute_ghost(&self) -> Minos {
        let mut depth = 0;
        while self.can_move(Vec2::new(0, -depth - 1)) {
            depth += 1;
        }
        self.active.minos.translated(Vec2::new(0, -depth))
    }

    /// Spin kind of a rotation that was just committed with `kick`.
    fn classify_spin(&self, kick: Vec2) -> SpinKind {
        if self.can_move(Vec2::DOWN) {
            return SpinKind::None;
        }

        if self.active.kind != PieceKind::T {
            let stuck = !self.can_move(Vec2::LEFT) && !self.can_move(Vec2::RIGHT);
            return if stuck { SpinKind::Spin } else { SpinKind::None };
        }

        let tetromino = self.catalog.get(self.active.kind);
        let bounds = tetromino.rotation_bounds(&self.active.minos, self.active.orientation);
        // TL, TR, BR, BL
        let cornered = bounds.corners().map(|corner| self.matrix.is_occupied(corner));
        if cornered.iter().filter(|c| **c).count() < 3 {
            return SpinKind::None;
        }

        if kick.x.abs() >= 1 && kick.y <= -2 {
            return SpinKind::Spin;
        }

        let (a, b) = match self.active.orientation {
            Orientation::North => (0, 1),
            Orientation::East => (1, 2),
            Orientation::South => (2, 3),
            Orientation::West => (3, 0),
        };
        if cornered[a] && cornered[b] {
            SpinKind::Spin
        } else {
            SpinKind::Mini
        }
    }

    fn lock_and_spawn_next(&mut self) {
        self.matrix.place(&self.active.minos, self.active.kind);
        let cleared = self.matrix.clear_full_rows();
        let all_clear = self.matrix.is_empty();

        self.current.record_lock(cleared.len() as u32, all_clear);
        if self.current.is_notable() {
            self.feedback_age = Duration::ZERO;
        }

        self.last_lock = scoring::lock_score(&self.current);
        self.score = self.score.saturating_add(self.last_lock.total);

        let next = self.draw_next();
        self.previous = self.current;
        self.current = ClearFeedback::continue_from(&self.previous, next);
        self.spawn(next);
    }

    #[cfg(test)]
    fn place_active(&mut self, kind: PieceKind, orientation: Orientation, offset: Vec2) {
        let minos = self.catalog.get(kind).state(orientation).translated(offset);
        self.active = ActivePiece {
            kind,
            orientation,
            minos,
        };
        self.current.piece = Some(kind);
        self.refresh_projection();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MATRIX_HEIGHT, NEXT_QUEUE_SIZE};

    fn board_with(rows: &[&str]) -> Board {
        let mut board = Board::with_seed(42);
        board.load_matrix(Matrix::from_rows(rows));
        board
    }

    #[test]
    fn test_new_board_spawns_north() {
        let board = Board::with_seed(1);
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(
            *board.active_minos(),
            board.catalog().spawn_state(board.active_kind())
        );
        assert_eq!(board.next_queue().len(), NEXT_QUEUE_SIZE);
        assert_eq!(board.hold(), None);
        assert_eq!(board.score(), 0);
        assert_eq!(board.feedback().piece, None);
        assert_eq!(board.pending_feedback().piece, Some(board.active_kind()));
        assert!(!board.is_spawn_blocked());
    }

    #[test]
    fn test_ghost_rests_on_floor() {
        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(3, 10));
        let ghost = board.ghost_minos();
        assert_eq!(ghost.iter().map(|p| p.y).min(), Some(0));
        assert_eq!(
            ghost.offset_from(board.active_minos()),
            Vec2::new(0, -11)
        );
    }

    #[test]
    fn test_move_clamps_at_wall() {
        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::T, Orientation::North, Vec2::new(3, 5));
        assert_eq!(board.move_piece(-10), -3);
        assert_eq!(board.active_minos().iter().map(|p| p.x).min(), Some(0));
        assert_eq!(board.move_piece(-1), 0);
        assert_eq!(board.move_piece(2), 2);
        assert_eq!(board.move_piece(0), 0);
    }

    #[test]
    fn test_move_stops_at_stack() {
        let mut board = board_with(&["......I...", "......I...", "......I..."]);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(0, -1));
        // O occupies columns 1 and 2, rows 0 and 1
        assert_eq!(board.move_piece(i32::MAX), 3);
        assert_eq!(board.active_minos().iter().map(|p| p.x).max(), Some(5));
    }

    #[test]
    fn test_soft_drop_scores_and_clamps() {
        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(3, 2));
        assert_eq!(board.soft_drop_piece(2), 2);
        assert_eq!(board.score(), 2);
        assert_eq!(board.soft_drop_piece(100), 1);
        assert_eq!(board.score(), 3);
        assert_eq!(board.soft_drop_piece(5), 0);
        assert_eq!(board.score(), 3);
        assert_eq!(board.matrix().cells().iter().filter(|c| c.is_some()).count(), 0);
    }

    #[test]
    fn test_hard_drop_locks_and_spawns_next() {
        let mut board = Board::with_seed(9);
        let expected_next = board.next_queue()[0];
        let kind = board.active_kind();
        let ghost = *board.ghost_minos();
        let rows = board.hard_drop_piece();

        assert!(rows > 0);
        assert_eq!(board.score(), u64::from(rows) * 2);
        for p in ghost.iter() {
            assert_eq!(board.matrix().get(p.x, p.y), Some(Some(kind)));
        }
        assert_eq!(board.active_kind(), expected_next);
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(board.feedback().piece, Some(kind));
        assert_eq!(board.feedback().combo, -1);
    }

    #[test]
    fn test_wall_kick_picks_first_fitting_offset() {
        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::T, Orientation::East, Vec2::new(-1, 5));
        assert!(board.rotate_piece(RotateDirection::Clockwise));
        assert_eq!(board.orientation(), Orientation::South);
        let expected = board
            .catalog()
            .get(PieceKind::T)
            .state(Orientation::South)
            .translated(Vec2::new(0, 5));
        assert_eq!(*board.active_minos(), expected);
    }

    #[test]
    fn test_rotation_fails_when_every_kick_collides() {
        let mut board = board_with(&["IIIIIIIIII", "III....III"]);
        board.place_active(PieceKind::I, Orientation::North, Vec2::new(3, -2));
        let before = *board.active();
        assert!(!board.rotate_piece(RotateDirection::Clockwise));
        assert!(!board.rotate_piece(RotateDirection::Counterclockwise));
        assert_eq!(*board.active(), before);
    }

    #[test]
    fn test_rotation_180() {
        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::T, Orientation::North, Vec2::new(3, 10));
        assert!(board.rotate_piece(RotateDirection::Clockwise180));
        assert_eq!(board.orientation(), Orientation::South);
        assert!(board.rotate_piece(RotateDirection::Counterclockwise180));
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(
            *board.active_minos(),
            board
                .catalog()
                .get(PieceKind::T)
                .state(Orientation::North)
                .translated(Vec2::new(3, 10))
        );
    }

    #[test]
    fn test_t_spin_double() {
        let mut board = board_with(&["..I.......", "II...IIIII", "III.IIIIII"]);
        board.place_active(PieceKind::T, Orientation::West, Vec2::new(2, 0));
        assert!(board.rotate_piece(RotateDirection::Counterclockwise));
        assert_eq!(board.orientation(), Orientation::South);
        assert_eq!(board.pending_feedback().spin, SpinKind::Spin);
        assert_eq!(board.clear_preview(), &[0, 1]);

        assert_eq!(board.hard_drop_piece(), 0);
        let fb = board.feedback();
        assert_eq!(fb.lines_cleared, 2);
        assert_eq!(fb.spin, SpinKind::Spin);
        assert_eq!(fb.b2b, 0);
        assert_eq!(fb.combo, 0);
        assert_eq!(board.score(), 1200);
        assert_eq!(fb.spin_text().as_deref(), Some("T-SPIN"));
        assert_eq!(fb.line_clear_text(), Some("DOUBLE"));
        // the overhang fell to the floor
        assert_eq!(board.matrix().get(2, 0), Some(Some(PieceKind::I)));
        assert!(!fb.all_clear);
        assert_eq!(board.feedback_alpha(), 255);
    }

    #[test]
    fn test_mini_t_spin() {
        let mut board = board_with(&["I.........", "..........", "I.I......."]);
        board.place_active(PieceKind::T, Orientation::West, Vec2::new(0, 0));
        assert!(board.rotate_piece(RotateDirection::Clockwise));
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(board.pending_feedback().spin, SpinKind::Mini);

        board.hard_drop_piece();
        assert_eq!(board.feedback().spin, SpinKind::Mini);
        assert_eq!(board.score(), 100);
        assert_eq!(
            board.feedback().spin_text().as_deref(),
            Some("MINI T-SPIN")
        );
    }

    #[test]
    fn test_far_kick_is_full_spin_with_open_front_corner() {
        let mut board = board_with(&[
            ".I........",
            "..........",
            "I.I.......",
            "..........",
            "I.........",
        ]);
        board.place_active(PieceKind::T, Orientation::North, Vec2::new(1, 2));
        assert!(board.rotate_piece(RotateDirection::Clockwise));

        // only the last kick (-1, -2) fits
        let landed = board.catalog.get(PieceKind::T).state(Orientation::East);
        assert_eq!(board.active_minos(), landed);
        assert_eq!(board.orientation(), Orientation::East);
        // East front corners are TR (2, 2) and BR (2, 0); BR stays open
        assert!(!board.matrix().is_occupied(Vec2::new(2, 0)));
        assert_eq!(board.pending_feedback().spin, SpinKind::Spin);

        assert_eq!(board.hard_drop_piece(), 0);
        assert_eq!(board.feedback().spin, SpinKind::Spin);
        assert_eq!(board.score(), 400);
    }

    #[test]
    fn test_airborne_rotation_is_not_a_spin() {
        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::T, Orientation::North, Vec2::new(3, 10));
        assert!(board.rotate_piece(RotateDirection::Clockwise));
        assert_eq!(board.pending_feedback().spin, SpinKind::None);
    }

    #[test]
    fn test_spin_cleared_by_hard_drop_distance() {
        let mut board = board_with(&["..I.......", "II...IIIII", "III.IIIIII"]);
        board.place_active(PieceKind::T, Orientation::West, Vec2::new(2, 0));
        assert!(board.rotate_piece(RotateDirection::Counterclockwise));
        // a blocked slide keeps the pending spin
        assert_eq!(board.move_piece(-1), 0);
        assert_eq!(board.pending_feedback().spin, SpinKind::Spin);

        let mut board = Board::with_seed(1);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(3, 5));
        board.current.spin = SpinKind::Spin;
        assert!(board.hard_drop_piece() > 0);
        assert_eq!(board.feedback().spin, SpinKind::None);
        assert_eq!(board.score(), 12);
    }

    #[test]
    fn test_non_t_spin_needs_both_sides_blocked() {
        let mut board = board_with(&["I..I......", "I..I......"]);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(0, -1));
        assert!(board.rotate_piece(RotateDirection::Clockwise));
        assert_eq!(board.pending_feedback().spin, SpinKind::Spin);
        board.hard_drop_piece();
        assert_eq!(board.feedback().spin_text().as_deref(), Some("O-SPIN"));
        assert_eq!(board.score(), 400);

        let mut board = board_with(&["I.........", "I........."]);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(0, -1));
        assert!(board.rotate_piece(RotateDirection::Clockwise));
        assert_eq!(board.pending_feedback().spin, SpinKind::None);
    }

    #[test]
    fn test_quad_then_b2b_quad() {
        let rows = ["IIIIIIIII.", "IIIIIIIII.", "IIIIIIIII.", "IIIIIIIII."];
        let mut board = board_with(&rows);
        board.place_active(PieceKind::I, Orientation::East, Vec2::new(7, 10));
        board.hard_drop_piece();
        let first = board.score();
        assert_eq!(board.feedback().lines_cleared, 4);
        assert!(board.feedback().all_clear);
        assert_eq!(board.feedback().b2b, 0);
        // 800 for the quad, 3500 for the all clear, plus ten rows of hard drop
        assert_eq!(first - board.last_lock().total, 20);
        assert_eq!(board.last_lock().total, 800 + 3500);

        board.load_matrix(Matrix::from_rows(&rows));
        board.place_active(PieceKind::I, Orientation::East, Vec2::new(7, 0));
        board.hard_drop_piece();
        assert_eq!(board.feedback().b2b, 1);
        assert_eq!(board.feedback().combo, 1);
        assert_eq!(board.last_lock().total, 1200 + 50 + 3500);
        assert_eq!(board.feedback().b2b_text().as_deref(), Some("B2B x1"));
        assert_eq!(board.feedback().combo_text().as_deref(), Some("1 COMBO"));
    }

    #[test]
    fn test_combo_resets_on_quiet_lock() {
        let mut board = board_with(&["IIIIIIII.."]);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(7, 5));
        board.hard_drop_piece();
        assert_eq!(board.feedback().lines_cleared, 1);
        assert_eq!(board.feedback().combo, 0);
        assert_eq!(board.last_lock().total, 100);

        board.place_active(PieceKind::O, Orientation::North, Vec2::new(0, 5));
        board.hard_drop_piece();
        assert_eq!(board.feedback().combo, -1);
        assert_eq!(board.last_lock().total, 0);
        assert_eq!(board.feedback().texts(), Vec::<String>::new());
    }

    #[test]
    fn test_hold_swaps_and_respawns() {
        let mut board = Board::with_seed(3);
        let first = board.active_kind();
        let upcoming = board.next_queue()[0];
        board.move_piece(-2);
        board.hold_piece();
        assert_eq!(board.hold(), Some(first));
        assert_eq!(board.active_kind(), upcoming);
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(
            *board.active_minos(),
            board.catalog().spawn_state(upcoming)
        );
        assert_eq!(board.pending_feedback().piece, Some(upcoming));

        // unlimited: holding again brings the first piece straight back
        board.hold_piece();
        assert_eq!(board.active_kind(), first);
        assert_eq!(board.hold(), Some(upcoming));
    }

    #[test]
    fn test_hold_clears_pending_spin() {
        let mut board = Board::with_seed(3);
        board.current.spin = SpinKind::Mini;
        board.hold_piece();
        assert_eq!(board.pending_feedback().spin, SpinKind::None);
    }

    #[test]
    fn test_gravity_drops_fresh_piece_then_waits() {
        let mut board = Board::with_seed(5);
        let spawn = *board.active_minos();
        board.update(Duration::from_millis(1));
        assert_eq!(board.active_minos().offset_from(&spawn), Vec2::new(0, -1));
        board.update(Duration::from_millis(998));
        assert_eq!(board.active_minos().offset_from(&spawn), Vec2::new(0, -1));
        board.update(Duration::from_millis(1));
        assert_eq!(board.active_minos().offset_from(&spawn), Vec2::new(0, -2));
        // gravity never scores
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_gravity_disabled_and_grounded() {
        let mut board = Board::with_seed(5);
        board.set_gravity_enabled(false);
        let spawn = *board.active_minos();
        board.update(Duration::from_secs(5));
        assert_eq!(*board.active_minos(), spawn);

        board.set_gravity_enabled(true);
        board.update(Duration::from_secs(100));
        let landed = *board.active_minos();
        assert_eq!(landed, *board.ghost_minos());
        board.update(Duration::from_secs(100));
        assert_eq!(*board.active_minos(), landed);
        // nothing locked
        assert!(board.matrix().is_empty());
    }

    #[test]
    fn test_feedback_fades() {
        let mut board = board_with(&["IIIIIIII.."]);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(7, 5));
        board.hard_drop_piece();
        board.set_gravity_enabled(false);
        assert_eq!(board.feedback_alpha(), 255);
        board.update(Duration::from_secs(2));
        assert_eq!(board.feedback_alpha(), 127);
        board.update(Duration::from_secs(2));
        assert_eq!(board.feedback_alpha(), 0);
        assert_eq!(board.feedback_color(), Some(board.catalog().color(PieceKind::O)));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::with_seed(11);
        board.hard_drop_piece();
        board.hold_piece();
        assert!(board.score() > 0);

        board.reset();
        assert!(board.matrix().is_empty());
        assert_eq!(board.hold(), None);
        assert_eq!(board.score(), 0);
        assert_eq!(board.feedback().piece, None);
        assert_eq!(board.pending_feedback().combo, -1);
        assert_eq!(board.orientation(), Orientation::North);
        assert_eq!(board.next_queue().len(), NEXT_QUEUE_SIZE);
        // first piece plus five in the queue came out of the fresh bag
        assert_eq!(board.bag_index(), 6);
    }

    #[test]
    fn test_clear_preview_matches_hard_drop() {
        let mut board = board_with(&["IIII..IIII", "IIII..IIII"]);
        board.place_active(PieceKind::O, Orientation::North, Vec2::new(3, 10));
        assert_eq!(board.clear_preview(), &[0, 1]);
        board.move_piece(1);
        assert!(board.clear_preview().is_empty());
        board.move_piece(-1);
        board.hard_drop_piece();
        assert_eq!(board.feedback().lines_cleared, 2);
        assert!(board.feedback().all_clear);
    }

    #[test]
    fn test_snapshot_copies_state() {
        let board = Board::with_seed(8);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.active, *board.active_minos());
        assert_eq!(snapshot.ghost, *board.ghost_minos());
        assert_eq!(snapshot.active_kind, board.active_kind());
        assert_eq!(&snapshot.next[..], board.next_queue());
        assert_eq!(snapshot.cells.len(), MATRIX_HEIGHT * 10);
        assert_eq!(snapshot.feedback_alpha, 255);
    }
}
