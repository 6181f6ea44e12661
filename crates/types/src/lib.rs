//! Shared vocabulary and constants for the stacker engine.
//!
//! Everything in here is plain data with no dependencies beyond `std`, so the
//! core engine, the terminal input layer and any renderer can agree on the same
//! names.
//!
//! # Coordinates
//!
//! The matrix is addressed with `y` growing upward: row 0 is the floor and row
//! `MATRIX_HEIGHT - 1` is the top of the buffer zone. Only the bottom
//! `VISIBLE_HEIGHT` rows are normally drawn.
//!
//! # Timing defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_PERIOD` | 1 s | One row of gravity per second |
//! | `DEFAULT_DAS` | 150 ms | Delay before horizontal auto-repeat |
//! | `DEFAULT_ARR` | 1/60 s | Horizontal auto-repeat period |
//! | `PRIMARY_SOFT_DROP_ARR` | 1/80 s | Fast soft drop period |
//! | `SECONDARY_SOFT_DROP_ARR` | 1/5 s | Slow soft drop period |
//! | `FEEDBACK_FADE_START` | 1 s | Feedback text stays opaque until here |
//! | `FEEDBACK_FADE_END` | 3 s | Feedback text is fully transparent from here |
//!
//! # Examples
//!
//! ```
//! use stacker_types::{Action, Orientation, PieceKind, RotateDirection, MATRIX_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Orientation::North.rotate(RotateDirection::Counterclockwise), Orientation::West);
//! assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
//! assert_eq!(MATRIX_WIDTH, 10);
//! ```

use std::time::Duration;

/// Matrix width in cells (10 columns)
pub const MATRIX_WIDTH: usize = 10;

/// Matrix height in cells, including the buffer zone above the visible field
pub const MATRIX_HEIGHT: usize = 40;

/// Number of rows a renderer normally shows
pub const VISIBLE_HEIGHT: usize = 20;

/// Number of cells in every tetromino
pub const MINO_COUNT: usize = 4;

/// Number of distinct piece kinds
pub const PIECE_KIND_COUNT: usize = 7;

/// Length of the next-piece preview
pub const NEXT_QUEUE_SIZE: usize = 5;

/// Gravity drops the active piece one row per period.
pub const GRAVITY_PERIOD: Duration = Duration::from_secs(1);

/// Horizontal DAS (Delayed Auto Shift).
pub const DEFAULT_DAS: Duration = Duration::from_millis(150);

/// Horizontal ARR (Auto Repeat Rate), one step per 60 Hz frame.
pub const DEFAULT_ARR: Duration = Duration::from_nanos(16_666_667);

/// Soft drop period while the primary soft drop key is held.
pub const PRIMARY_SOFT_DROP_ARR: Duration = Duration::from_micros(12_500);

/// Soft drop period while the secondary soft drop key is held.
pub const SECONDARY_SOFT_DROP_ARR: Duration = Duration::from_millis(200);

/// Feedback text is drawn fully opaque until it is this old.
pub const FEEDBACK_FADE_START: Duration = Duration::from_secs(1);

/// Feedback text is fully transparent once it is this old.
pub const FEEDBACK_FADE_END: Duration = Duration::from_secs(3);

/// Points per row of soft drop.
pub const SOFT_DROP_POINTS: u64 = 1;

/// Points per row of hard drop.
pub const HARD_DROP_POINTS: u64 = 2;

/// Plain line clear awards, indexed by lines cleared (1-3 lines).
pub const LINE_SCORES: [u64; 4] = [0, 100, 300, 500];

/// Quad (four or more lines without a spin).
pub const QUAD_SCORE: u64 = 800;

/// Full spin awards, indexed by lines cleared (the last entry covers 4+).
pub const SPIN_SCORES: [u64; 5] = [400, 800, 1200, 1600, 2600];

/// Mini spin awards, indexed by lines cleared (the last entry covers 2+).
pub const MINI_SPIN_SCORES: [u64; 3] = [100, 200, 400];

/// Combo bonus per combo step.
pub const COMBO_BASE: u64 = 50;

/// Bonus for emptying the whole matrix.
pub const ALL_CLEAR_BONUS: u64 = 3500;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u64 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u64 = 2;

/// A back-to-back chain at least this long is reported as broken when a plain
/// clear ends it.
pub const LONG_B2B_STREAK_THRESHOLD: i32 = 2;

/// The seven tetromino piece kinds
///
/// The declaration order is the catalog order and the order a fresh bag is
/// filled in before shuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; PIECE_KIND_COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used in feedback text ("T-SPIN") and plain renderers.
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// Direction of a rotation request.
///
/// The discriminant is the signed quarter-turn delta applied to an
/// [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Counterclockwise180 = -2,
    Counterclockwise = -1,
    Clockwise = 1,
    Clockwise180 = 2,
}

impl RotateDirection {
    pub const ALL: [RotateDirection; 4] = [
        RotateDirection::Clockwise,
        RotateDirection::Counterclockwise,
        RotateDirection::Clockwise180,
        RotateDirection::Counterclockwise180,
    ];

    /// Signed number of quarter turns.
    #[inline(always)]
    pub fn delta(self) -> i32 {
        self as i32
    }

    /// Row index into a kick table (position in [`RotateDirection::ALL`]).
    #[inline(always)]
    pub fn table_index(self) -> usize {
        match self {
            RotateDirection::Clockwise => 0,
            RotateDirection::Counterclockwise => 1,
            RotateDirection::Clockwise180 => 2,
            RotateDirection::Counterclockwise180 => 3,
        }
    }
}

/// Orientation of a piece.
///
/// - **North**: spawn orientation
/// - **East**: one quarter turn clockwise
/// - **South**: half turn
/// - **West**: one quarter turn counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Orientation reached by applying `direction`, wrapping modulo 4.
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::{Orientation, RotateDirection};
    ///
    /// assert_eq!(Orientation::West.rotate(RotateDirection::Clockwise), Orientation::North);
    /// assert_eq!(Orientation::East.rotate(RotateDirection::Clockwise180), Orientation::West);
    /// assert_eq!(Orientation::North.rotate(RotateDirection::Counterclockwise180), Orientation::South);
    /// ```
    pub fn rotate(self, direction: RotateDirection) -> Self {
        let index = (self.index() as i32 + direction.delta()).rem_euclid(4);
        Self::ALL[index as usize]
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::East => "east",
            Orientation::South => "south",
            Orientation::West => "west",
        }
    }
}

/// Logical player actions.
///
/// The controller only ever sees these; physical keys are mapped onto them by
/// the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Shift the piece left, auto-repeating while held
    MoveLeft,
    /// Shift the piece right, auto-repeating while held
    MoveRight,
    RotateCw,
    RotateCcw,
    Rotate180Cw,
    Rotate180Ccw,
    /// Fast soft drop
    SoftDropPrimary,
    /// Slow soft drop
    SoftDropSecondary,
    /// Drop to the floor and lock immediately
    HardDrop,
    /// Swap the active piece with the hold slot
    Hold,
    /// Throw the current game away and start over
    Restart,
}

impl Action {
    /// Number of logical actions.
    pub const COUNT: usize = 11;

    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::RotateCw,
        Action::RotateCcw,
        Action::Rotate180Cw,
        Action::Rotate180Ccw,
        Action::SoftDropPrimary,
        Action::SoftDropSecondary,
        Action::HardDrop,
        Action::Hold,
        Action::Restart,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stacker_types::Action;
    ///
    /// assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
    /// assert_eq!(Action::from_str("rotate180cw"), Some(Action::Rotate180Cw));
    /// assert_eq!(Action::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "rotatecw" => Some(Action::RotateCw),
            "rotateccw" => Some(Action::RotateCcw),
            "rotate180cw" => Some(Action::Rotate180Cw),
            "rotate180ccw" => Some(Action::Rotate180Ccw),
            "softdropprimary" => Some(Action::SoftDropPrimary),
            "softdropsecondary" => Some(Action::SoftDropSecondary),
            "harddrop" => Some(Action::HardDrop),
            "hold" => Some(Action::Hold),
            "restart" => Some(Action::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::RotateCw => "rotateCw",
            Action::RotateCcw => "rotateCcw",
            Action::Rotate180Cw => "rotate180Cw",
            Action::Rotate180Ccw => "rotate180Ccw",
            Action::SoftDropPrimary => "softDropPrimary",
            Action::SoftDropSecondary => "softDropSecondary",
            Action::HardDrop => "hardDrop",
            Action::Hold => "hold",
            Action::Restart => "restart",
        }
    }

    /// Rotation requested by this action, if it is a rotation.
    pub fn rotate_direction(self) -> Option<RotateDirection> {
        match self {
            Action::RotateCw => Some(RotateDirection::Clockwise),
            Action::RotateCcw => Some(RotateDirection::Counterclockwise),
            Action::Rotate180Cw => Some(RotateDirection::Clockwise180),
            Action::Rotate180Ccw => Some(RotateDirection::Counterclockwise180),
            _ => None,
        }
    }
}

/// Whether a key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One input edge for one logical action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionEvent {
    pub action: Action,
    pub state: KeyState,
}

impl ActionEvent {
    pub fn press(action: Action) -> Self {
        Self {
            action,
            state: KeyState::Pressed,
        }
    }

    pub fn release(action: Action) -> Self {
        Self {
            action,
            state: KeyState::Released,
        }
    }
}

/// Spin classification of the last successful rotation.
///
/// - **None**: no spin (or the piece moved off the spot afterwards)
/// - **Mini**: T piece wedged in with only one front corner filled
/// - **Spin**: full spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinKind {
    #[default]
    None,
    Mini,
    Spin,
}

impl SpinKind {
    /// Returns `None` for `SpinKind::None`, `Some("mini")` for Mini,
    /// and `Some("spin")` for Spin.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SpinKind::None => None,
            SpinKind::Mini => Some("mini"),
            SpinKind::Spin => Some("spin"),
        }
    }
}

/// A cell of the matrix
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
