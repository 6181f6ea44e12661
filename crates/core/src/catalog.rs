//! Tetromino catalog - shapes, spawn offsets, colors and kick tables
//!
//! All data is `y`-up: `(0, 0)` is the bottom-left corner of a piece's box.
//! The catalog is immutable once built and is shared between boards through an
//! `Arc`.
//!
//! Kicks are tried in table order and the first offset that fits wins, so the
//! order of every list below is part of the rules.

use crate::geometry::{Bounds, Vec2};
use crate::types::{Orientation, PieceKind, RotateDirection, MINO_COUNT, PIECE_KIND_COUNT};

/// The four cells of a piece, either canonical (relative to the piece box) or
/// absolute (matrix positions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Minos(pub [Vec2; MINO_COUNT]);

impl Minos {
    pub const fn new(cells: [Vec2; MINO_COUNT]) -> Self {
        Self(cells)
    }

    /// Every cell shifted by `offset`.
    #[inline(always)]
    pub fn translated(&self, offset: Vec2) -> Self {
        let mut out = *self;
        for cell in out.0.iter_mut() {
            *cell += offset;
        }
        out
    }

    /// Translation that maps `reference` onto `self`, measured on the first
    /// cell. Only meaningful when both come from the same state.
    #[inline(always)]
    pub fn offset_from(&self, reference: &Minos) -> Vec2 {
        self.0[0] - reference.0[0]
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.0.contains(&p)
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Vec2] {
        &self.0
    }
}

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Kick lists indexed by `[RotateDirection::table_index()][Orientation::index()]`
/// of the orientation the rotation starts from.
#[derive(Debug)]
pub struct KickTable {
    kicks: [[&'static [Vec2]; 4]; 4],
}

impl KickTable {
    pub const fn new(kicks: [[&'static [Vec2]; 4]; 4]) -> Self {
        Self { kicks }
    }

    #[inline(always)]
    pub fn get(&self, from: Orientation, direction: RotateDirection) -> &'static [Vec2] {
        self.kicks[direction.table_index()][from.index()]
    }
}

const fn v(x: i32, y: i32) -> Vec2 {
    Vec2::new(x, y)
}

/// J, L, S, Z and T share these kicks.
pub static JLSTZ_KICKS: KickTable = KickTable::new([
    // Clockwise from N, E, S, W
    [
        &[v(0, 0), v(-1, 0), v(-1, 1), v(0, -2), v(-1, -2)],
        &[v(0, 0), v(1, 0), v(1, -1), v(0, 2), v(1, 2)],
        &[v(0, 0), v(1, 0), v(1, 1), v(0, -2), v(1, -2)],
        &[v(0, 0), v(-1, 0), v(-1, -1), v(0, 2), v(-1, 2)],
    ],
    // Counterclockwise
    [
        &[v(0, 0), v(1, 0), v(1, 1), v(0, -2), v(1, -2)],
        &[v(0, 0), v(1, 0), v(1, -1), v(0, 2), v(1, 2)],
        &[v(0, 0), v(-1, 0), v(-1, 1), v(0, -2), v(-1, -2)],
        &[v(0, 0), v(-1, 0), v(-1, -1), v(0, 2), v(-1, 2)],
    ],
    // Clockwise 180
    [
        &[v(0, 0), v(0, 1), v(1, 1), v(-1, 1), v(1, 0), v(-1, 0)],
        &[v(0, 0), v(1, 0), v(1, 2), v(1, 1), v(0, 2), v(0, 1)],
        &[v(0, 0), v(0, -1), v(-1, -1), v(1, -1), v(-1, 0), v(1, 0)],
        &[v(0, 0), v(-1, 0), v(-1, 2), v(-1, 1), v(0, 2), v(0, 1)],
    ],
    // Counterclockwise 180
    [
        &[v(0, 0), v(0, 1), v(-1, 1), v(1, 1), v(-1, 0), v(1, 0)],
        &[v(0, 0), v(1, 0), v(1, 2), v(1, 1), v(0, 2), v(0, 1)],
        &[v(0, 0), v(0, -1), v(1, -1), v(-1, -1), v(1, 0), v(-1, 0)],
        &[v(0, 0), v(-1, 0), v(-1, 2), v(-1, 1), v(0, 2), v(0, 1)],
    ],
]);

/// I piece kicks. Half turns reuse the JLSTZ lists.
pub static I_KICKS: KickTable = KickTable::new([
    [
        &[v(0, 0), v(1, 0), v(-2, 0), v(-2, -1), v(1, 2)],
        &[v(0, 0), v(-1, 0), v(2, 0), v(-1, 2), v(2, -1)],
        &[v(0, 0), v(2, 0), v(-1, 0), v(2, 1), v(-1, -2)],
        &[v(0, 0), v(1, 0), v(-2, 0), v(1, -2), v(-2, 1)],
    ],
    [
        &[v(0, 0), v(-1, 0), v(2, 0), v(2, -1), v(-1, 2)],
        &[v(0, 0), v(-1, 0), v(2, 0), v(-1, -2), v(2, 1)],
        &[v(0, 0), v(-2, 0), v(1, 0), v(-2, 1), v(1, -2)],
        &[v(0, 0), v(1, 0), v(-2, 0), v(1, 2), v(-2, -1)],
    ],
    [
        &[v(0, 0), v(0, 1), v(1, 1), v(-1, 1), v(1, 0), v(-1, 0)],
        &[v(0, 0), v(1, 0), v(1, 2), v(1, 1), v(0, 2), v(0, 1)],
        &[v(0, 0), v(0, -1), v(-1, -1), v(1, -1), v(-1, 0), v(1, 0)],
        &[v(0, 0), v(-1, 0), v(-1, 2), v(-1, 1), v(0, 2), v(0, 1)],
    ],
    [
        &[v(0, 0), v(0, 1), v(-1, 1), v(1, 1), v(-1, 0), v(1, 0)],
        &[v(0, 0), v(1, 0), v(1, 2), v(1, 1), v(0, 2), v(0, 1)],
        &[v(0, 0), v(0, -1), v(1, -1), v(-1, -1), v(1, 0), v(-1, 0)],
        &[v(0, 0), v(-1, 0), v(-1, 2), v(-1, 1), v(0, 2), v(0, 1)],
    ],
]);

const NO_KICK: &[Vec2] = &[v(0, 0)];

/// O never kicks: a rotation into a collision simply fails.
pub static O_KICKS: KickTable = KickTable::new([[NO_KICK; 4]; 4]);

const fn m(cells: [(i32, i32); MINO_COUNT]) -> Minos {
    Minos([
        v(cells[0].0, cells[0].1),
        v(cells[1].0, cells[1].1),
        v(cells[2].0, cells[2].1),
        v(cells[3].0, cells[3].1),
    ])
}

/// Immutable description of one piece kind.
#[derive(Debug, Clone)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Canonical cells for North, East, South, West.
    pub states: [Minos; 4],
    /// Translation applied to the North state when the piece enters the matrix.
    pub spawn_offset: Vec2,
    pub color: Rgb,
    pub kicks: &'static KickTable,
}

impl Tetromino {
    #[inline(always)]
    pub fn state(&self, orientation: Orientation) -> &Minos {
        &self.states[orientation.index()]
    }

    /// North state placed at the spawn offset.
    pub fn spawn_state(&self) -> Minos {
        self.states[Orientation::North.index()].translated(self.spawn_offset)
    }

    #[inline(always)]
    pub fn kicks(&self, from: Orientation, direction: RotateDirection) -> &'static [Vec2] {
        self.kicks.get(from, direction)
    }

    /// Box around the union of all four canonical states, moved to where the
    /// piece currently is. Used for corner tests, so it does not shrink when
    /// the piece is in a thin orientation.
    pub fn rotation_bounds(&self, positions: &Minos, orientation: Orientation) -> Bounds {
        let offset = positions.offset_from(self.state(orientation));
        let union = self.states.iter().flat_map(|s| s.iter());
        Bounds::enclosing(union)
            .unwrap_or(Bounds::new(Vec2::ZERO, Vec2::ZERO))
            .translated(offset)
    }

    /// Standard definition for `kind`.
    pub fn standard(kind: PieceKind) -> Self {
        let (states, spawn_offset, color, kicks) = match kind {
            PieceKind::I => (
                [
                    m([(0, 2), (1, 2), (2, 2), (3, 2)]),
                    m([(2, 0), (2, 1), (2, 2), (2, 3)]),
                    m([(0, 1), (1, 1), (2, 1), (3, 1)]),
                    m([(1, 0), (1, 1), (1, 2), (1, 3)]),
                ],
                v(3, 19),
                Rgb::new(82, 207, 173),
                &I_KICKS,
            ),
            PieceKind::J => (
                [
                    m([(0, 1), (0, 2), (1, 1), (2, 1)]),
                    m([(1, 0), (1, 1), (1, 2), (2, 2)]),
                    m([(0, 1), (1, 1), (2, 0), (2, 1)]),
                    m([(0, 0), (1, 0), (1, 1), (1, 2)]),
                ],
                v(3, 20),
                Rgb::new(103, 81, 206),
                &JLSTZ_KICKS,
            ),
            PieceKind::L => (
                [
                    m([(0, 1), (1, 1), (2, 1), (2, 2)]),
                    m([(1, 0), (1, 1), (1, 2), (2, 0)]),
                    m([(0, 0), (0, 1), (1, 1), (2, 1)]),
                    m([(0, 2), (1, 0), (1, 1), (1, 2)]),
                ],
                v(3, 20),
                Rgb::new(206, 129, 82),
                &JLSTZ_KICKS,
            ),
            PieceKind::O => (
                [m([(1, 1), (2, 1), (1, 2), (2, 2)]); 4],
                v(3, 20),
                Rgb::new(206, 197, 82),
                &O_KICKS,
            ),
            PieceKind::S => (
                [
                    m([(0, 1), (1, 1), (1, 2), (2, 2)]),
                    m([(1, 1), (1, 2), (2, 0), (2, 1)]),
                    m([(0, 0), (1, 0), (1, 1), (2, 1)]),
                    m([(0, 1), (0, 2), (1, 0), (1, 1)]),
                ],
                v(3, 20),
                Rgb::new(129, 207, 82),
                &JLSTZ_KICKS,
            ),
            PieceKind::T => (
                [
                    m([(0, 1), (1, 1), (1, 2), (2, 1)]),
                    m([(1, 0), (1, 1), (1, 2), (2, 1)]),
                    m([(0, 1), (1, 0), (1, 1), (2, 1)]),
                    m([(0, 1), (1, 0), (1, 1), (1, 2)]),
                ],
                v(3, 20),
                Rgb::new(195, 82, 206),
                &JLSTZ_KICKS,
            ),
            PieceKind::Z => (
                [
                    m([(0, 2), (1, 1), (1, 2), (2, 1)]),
                    m([(1, 0), (1, 1), (2, 1), (2, 2)]),
                    m([(0, 1), (1, 0), (1, 1), (2, 0)]),
                    m([(0, 0), (0, 1), (1, 1), (1, 2)]),
                ],
                v(3, 20),
                Rgb::new(206, 82, 90),
                &JLSTZ_KICKS,
            ),
        };

        Self {
            kind,
            states,
            spawn_offset,
            color,
            kicks,
        }
    }
}

/// The seven tetromino definitions, indexed by [`PieceKind::index`].
#[derive(Debug, Clone)]
pub struct Catalog {
    tetrominoes: [Tetromino; PIECE_KIND_COUNT],
}

impl Catalog {
    /// Build a catalog from custom definitions.
    ///
    /// # Panics
    ///
    /// Panics if the definitions are not in [`PieceKind::ALL`] order, if a
    /// state repeats a cell, or if any kick list is empty. These are
    /// programming errors in static data.
    pub fn new(tetrominoes: [Tetromino; PIECE_KIND_COUNT]) -> Self {
        for (i, tetromino) in tetrominoes.iter().enumerate() {
            assert_eq!(
                tetromino.kind.index(),
                i,
                "catalog entry {i} holds {:?}",
                tetromino.kind
            );
            for state in &tetromino.states {
                for (a, cell) in state.0.iter().enumerate() {
                    assert!(
                        !state.0[a + 1..].contains(cell),
                        "{:?} state repeats cell {:?}",
                        tetromino.kind,
                        cell
                    );
                }
            }
            for orientation in Orientation::ALL {
                for direction in RotateDirection::ALL {
                    assert!(
                        !tetromino.kicks(orientation, direction).is_empty(),
                        "{:?} has no kicks for {:?} {:?}",
                        tetromino.kind,
                        orientation,
                        direction
                    );
                }
            }
        }
        Self { tetrominoes }
    }

    /// The standard seven pieces.
    pub fn standard() -> Self {
        Self::new(PieceKind::ALL.map(Tetromino::standard))
    }

    #[inline(always)]
    pub fn get(&self, kind: PieceKind) -> &Tetromino {
        &self.tetrominoes[kind.index()]
    }

    pub fn spawn_state(&self, kind: PieceKind) -> Minos {
        self.get(kind).spawn_state()
    }

    pub fn kicks(
        &self,
        kind: PieceKind,
        from: Orientation,
        direction: RotateDirection,
    ) -> &'static [Vec2] {
        self.get(kind).kicks(from, direction)
    }

    pub fn color(&self, kind: PieceKind) -> Rgb {
        self.get(kind).color
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tetromino> {
        self.tetrominoes.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
