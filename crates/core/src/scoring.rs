//! Scoring module - points for drops and locks
//!
//! Lock points are computed from the piece's [`ClearFeedback`] *after* the
//! lock has been folded into it, so `combo` and `b2b` already include this
//! clear:
//! - Difficult clears (any spin, or four-plus lines) use the spin/quad table
//!   and get the 3/2 back-to-back multiplier when `b2b > 0`.
//! - Plain 1-3 line clears use the classic table.
//! - Combo bonus is `COMBO_BASE * combo`, added after the multiplier.
//! - All clear adds a flat bonus.

use crate::feedback::ClearFeedback;
use crate::types::{
    SpinKind, ALL_CLEAR_BONUS, B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, HARD_DROP_POINTS,
    LINE_SCORES, MINI_SPIN_SCORES, QUAD_SCORE, SOFT_DROP_POINTS, SPIN_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear (includes B2B multiplier, excludes combo bonus).
    pub clear_points: u64,
    /// Combo bonus added on top of `clear_points`.
    pub combo_bonus: u64,
    pub all_clear_bonus: u64,
    pub total: u64,
    /// Whether a B2B multiplier was applied to this clear.
    pub b2b_applied: bool,
}

/// Base points for a spin, a quad, or a plain clear.
pub fn clear_points(spin: SpinKind, lines: u32) -> u64 {
    let lines = lines as usize;
    match spin {
        SpinKind::Spin => SPIN_SCORES[lines.min(SPIN_SCORES.len() - 1)],
        SpinKind::Mini => MINI_SPIN_SCORES[lines.min(MINI_SPIN_SCORES.len() - 1)],
        SpinKind::None if lines >= 4 => QUAD_SCORE,
        SpinKind::None => LINE_SCORES[lines],
    }
}

/// Calculate combo bonus.
///
/// `-1` means no chain and `0` is the first clear of a chain; neither earns
/// anything.
pub fn combo_bonus(combo: i32) -> u64 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE.saturating_mul(combo as u64)
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u64) -> u64 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Points for a lock whose outcome is already recorded in `feedback`.
pub fn lock_score(feedback: &ClearFeedback) -> ScoreResult {
    let base = clear_points(feedback.spin, feedback.lines_cleared);
    let b2b_applied = feedback.is_difficult() && feedback.b2b > 0;
    let clear_points = if b2b_applied {
        apply_b2b_multiplier(base)
    } else {
        base
    };

    let combo_bonus = combo_bonus(feedback.combo);
    let all_clear_bonus = if feedback.all_clear { ALL_CLEAR_BONUS } else { 0 };
    let total = clear_points
        .saturating_add(combo_bonus)
        .saturating_add(all_clear_bonus);

    ScoreResult {
        clear_points,
        combo_bonus,
        all_clear_bonus,
        total,
        b2b_applied,
    }
}

/// Calculate drop score
/// soft drop: +1 per row
/// hard drop: +2 per row
pub fn drop_score(rows: u32, is_hard_drop: bool) -> u64 {
    let per_row = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    per_row * u64::from(rows)
}
