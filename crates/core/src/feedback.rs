//! Line-clear feedback - the combo/back-to-back bookkeeping of one piece and
//! the text a renderer shows for it.

use std::fmt;
use std::time::Duration;

use crate::catalog::Rgb;
use crate::types::{
    PieceKind, SpinKind, FEEDBACK_FADE_END, FEEDBACK_FADE_START, LONG_B2B_STREAK_THRESHOLD,
};

/// B2B text color while the streak is alive.
pub const B2B_COLOR: Rgb = Rgb::new(206, 197, 82);

/// B2B text color when a long streak was just broken.
pub const B2B_BROKEN_COLOR: Rgb = Rgb::new(206, 82, 90);

/// What happened (or is happening) to one piece.
///
/// `combo` and `b2b` use -1 for "no chain"; 0 is the first link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearFeedback {
    pub combo: i32,
    pub b2b: i32,
    pub lines_cleared: u32,
    pub all_clear: bool,
    pub long_b2b_streak_broken: bool,
    pub spin: SpinKind,
    pub piece: Option<PieceKind>,
}

impl ClearFeedback {
    /// Fresh record with no chains, about `piece`.
    pub fn new(piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..Self::default()
        }
    }

    /// Record for the next piece: chains carry over, everything else starts
    /// fresh.
    pub fn continue_from(previous: &ClearFeedback, piece: PieceKind) -> Self {
        Self {
            combo: previous.combo,
            b2b: previous.b2b,
            piece: Some(piece),
            ..Self::default()
        }
    }

    /// Spin or four-plus lines: keeps back-to-back alive.
    pub fn is_difficult(&self) -> bool {
        self.spin != SpinKind::None || self.lines_cleared >= 4
    }

    /// Fold one lock's outcome into the chains.
    ///
    /// Clears bump the combo; difficult clears bump back-to-back, plain
    /// clears end it. A lock that clears nothing ends the combo and leaves
    /// back-to-back alone.
    pub fn record_lock(&mut self, lines_cleared: u32, all_clear: bool) {
        self.lines_cleared = lines_cleared;
        self.all_clear = all_clear;
        self.long_b2b_streak_broken = false;

        if lines_cleared == 0 {
            self.combo = -1;
            return;
        }

        self.combo += 1;
        if self.is_difficult() {
            self.b2b += 1;
        } else {
            self.long_b2b_streak_broken = self.b2b >= LONG_B2B_STREAK_THRESHOLD;
            self.b2b = -1;
        }
    }

    /// Whether this lock is worth showing (and restarting the fade for).
    pub fn is_notable(&self) -> bool {
        self.lines_cleared > 0 || self.spin != SpinKind::None
    }

    pub fn combo_text(&self) -> Option<String> {
        (self.combo > 0).then(|| format!("{} COMBO", self.combo))
    }

    pub fn b2b_text(&self) -> Option<String> {
        if self.b2b > 0 {
            Some(format!("B2B x{}", self.b2b))
        } else if self.long_b2b_streak_broken {
            Some("B2B x0".to_string())
        } else {
            None
        }
    }

    pub fn b2b_color(&self) -> Rgb {
        if self.long_b2b_streak_broken {
            B2B_BROKEN_COLOR
        } else {
            B2B_COLOR
        }
    }

    pub fn line_clear_text(&self) -> Option<&'static str> {
        match self.lines_cleared {
            0 => None,
            1 => Some("SINGLE"),
            2 => Some("DOUBLE"),
            3 => Some("TRIPLE"),
            4 => Some("QUAD"),
            _ => Some("QUAD+"),
        }
    }

    pub fn all_clear_text(&self) -> Option<&'static str> {
        self.all_clear.then_some("ALL CLEAR")
    }

    /// "T-SPIN", "MINI S-SPIN" and so on.
    pub fn spin_text(&self) -> Option<String> {
        let letter = self.piece?.letter();
        match self.spin {
            SpinKind::None => None,
            SpinKind::Spin => Some(format!("{letter}-SPIN")),
            SpinKind::Mini => Some(format!("MINI {letter}-SPIN")),
        }
    }

    /// Every non-empty line, top to bottom as a side panel shows them.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.extend(self.combo_text());
        out.extend(self.b2b_text());
        out.extend(self.spin_text());
        out.extend(self.line_clear_text().map(str::to_string));
        out.extend(self.all_clear_text().map(str::to_string));
        out
    }
}

impl Default for ClearFeedback {
    fn default() -> Self {
        Self {
            combo: -1,
            b2b: -1,
            lines_cleared: 0,
            all_clear: false,
            long_b2b_streak_broken: false,
            spin: SpinKind::None,
            piece: None,
        }
    }
}

impl fmt::Display for ClearFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "combo {}, b2b {}, lines {}, all clear {}, spin {}, piece {}",
            self.combo,
            self.b2b,
            self.lines_cleared,
            self.all_clear,
            self.spin.as_str().unwrap_or("none"),
            self.piece.map_or('-', PieceKind::letter),
        )
    }
}

/// Opacity of feedback text that has been on screen for `age`.
///
/// Opaque until [`FEEDBACK_FADE_START`], then a linear ramp down to zero at
/// [`FEEDBACK_FADE_END`].
pub fn fade_alpha(age: Duration) -> u8 {
    if age <= FEEDBACK_FADE_START {
        return u8::MAX;
    }
    if age >= FEEDBACK_FADE_END {
        return 0;
    }
    let span = (FEEDBACK_FADE_END - FEEDBACK_FADE_START).as_nanos();
    let left = (FEEDBACK_FADE_END - age).as_nanos();
    (left * u128::from(u8::MAX) / span) as u8
}
