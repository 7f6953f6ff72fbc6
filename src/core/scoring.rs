//! Scoring module - placement points, line-break bonus, combo decay
//!
//! Every commit scores the piece's block count unconditionally. Clearing
//! moves add a bonus that scales jointly with lines broken, board size,
//! combo depth, and piece size, rewarding multi-line clears with big pieces.
//! The combo counter grows by the number of lines each clearing move breaks
//! and only decays after a full hand cycle without a clear (a deliberate
//! grace window, not a per-miss reset).
//!
//! Odd combo values multiply by half-integers, so the score accumulates in
//! an `f64` rather than an integer.

/// Score contribution of one committed placement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreDelta {
    /// Unconditional points for the placed blocks
    pub placement: f64,
    /// Bonus for lines broken (zero on non-clearing moves)
    pub break_bonus: f64,
}

impl ScoreDelta {
    pub fn total(&self) -> f64 {
        self.placement + self.break_bonus
    }
}

/// Points awarded for placing a piece, regardless of clears
pub fn placement_points(block_count: usize) -> f64 {
    block_count as f64
}

/// Bonus for a clearing move: `lines × board_len × (combo / 2) × blocks`.
///
/// `combo` is the counter *after* this move's increment has been applied.
pub fn break_bonus(lines: usize, board_len: usize, combo: u32, block_count: usize) -> f64 {
    lines as f64 * board_len as f64 * (combo as f64 / 2.0) * block_count as f64
}

/// Score one commit: `lines` broken by placing a piece of `block_count`
/// blocks on a `board_len`-edge board, with `combo` already incremented for
/// this move when `lines > 0`.
pub fn evaluate(lines: usize, board_len: usize, combo: u32, block_count: usize) -> ScoreDelta {
    let bonus = if lines > 0 {
        break_bonus(lines, board_len, combo, block_count)
    } else {
        0.0
    };
    ScoreDelta {
        placement: placement_points(block_count),
        break_bonus: bonus,
    }
}

/// Whether the combo resets: true once `moves_since_clear` has reached the
/// hand size without an intervening clear.
pub fn combo_expired(moves_since_clear: u32, hand_size: usize) -> bool {
    moves_since_clear >= hand_size as u32
}
