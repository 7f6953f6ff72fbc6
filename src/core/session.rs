//! Game session - orchestrates board, hand, and scoring
//!
//! Owns the placement transaction protocol the UI layer consumes:
//! `begin_drag` computes the dragged piece's fit map once, `update_drag`
//! re-derives the hover preview on every pointer move, and `end_drag`
//! either cancels (no mutation beyond dropping the hover) or commits the
//! placement as one indivisible sequence: clear hover, place, break lines,
//! score, null the hand slot, refill the hand if exhausted.
//!
//! The session trusts its caller the way the board does: drops are only
//! offered where the fit map said true, so there is no "reject move" result
//! anywhere in the core.

use log::{debug, trace};
use rand::Rng;

use crate::core::board::{Board, FitMap};
use crate::core::catalog::Piece;
use crate::core::hand::Hand;
use crate::core::rng::SimpleRng;
use crate::core::scoring;
use crate::core::snapshot::SessionSnapshot;
use crate::types::{BlockState, Mode};

/// Construction-time dimensions. `for_mode` gives the stock pairings;
/// custom pairings are accepted for non-standard boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub board_len: usize,
    pub hand_size: usize,
}

impl SessionConfig {
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            board_len: mode.board_len(),
            hand_size: mode.hand_size(),
        }
    }
}

/// One committed placement, emitted for observers (score persistence,
/// renderers) and also returned directly from `end_drag`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEvent {
    pub slot: usize,
    pub blocks_placed: usize,
    pub lines_broken: usize,
    pub score_delta: f64,
    pub score: f64,
    pub combo: u32,
    pub hand_refilled: bool,
}

/// In-flight drag: the slot being dragged and the fit map computed at
/// drag begin (the board cannot change mid-drag).
#[derive(Debug, Clone)]
struct Drag {
    slot: usize,
    piece: Piece,
    fit_map: FitMap,
}

/// A complete game session. Exclusively owns its board and hand; sessions
/// are never shared, and the whole thing is discarded on exit/reset.
#[derive(Debug, Clone)]
pub struct GameSession<R: Rng> {
    mode: Mode,
    config: SessionConfig,
    board: Board,
    hand: Hand,
    rng: R,
    score: f64,
    combo: u32,
    moves_since_clear: u32,
    drag: Option<Drag>,
    last_event: Option<PlacementEvent>,
}

impl GameSession<SimpleRng> {
    /// Session over the deterministic LCG source, for restricted execution
    /// contexts and seeded tests
    pub fn with_seed(mode: Mode, seed: u32) -> Self {
        Self::new(mode, SimpleRng::new(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// New session with mode-derived dimensions
    pub fn new(mode: Mode, rng: R) -> Self {
        Self::with_config(mode, SessionConfig::for_mode(mode), rng)
    }

    /// New session with explicit dimensions (mode kept only as a label)
    pub fn with_config(mode: Mode, config: SessionConfig, mut rng: R) -> Self {
        let board = Board::new(config.board_len);
        let hand = Hand::draw(config.hand_size, &mut rng);
        Self {
            mode,
            config,
            board,
            hand,
            rng,
            score: 0.0,
            combo: 0,
            moves_since_clear: 0,
            drag: None,
            last_event: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn moves_since_clear(&self) -> u32 {
        self.moves_since_clear
    }

    /// Slot currently being dragged, if any
    pub fn dragging(&self) -> Option<usize> {
        self.drag.as_ref().map(|d| d.slot)
    }

    /// Fit map of the in-flight drag (computed once at drag begin)
    pub fn drag_fit_map(&self) -> Option<&FitMap> {
        self.drag.as_ref().map(|d| &d.fit_map)
    }

    /// Read-only projection of the whole session for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self.mode, &self.board, &self.hand, self.score, self.combo, self.moves_since_clear)
    }

    /// Take and clear the last commit event (consumed by observers)
    pub fn take_last_event(&mut self) -> Option<PlacementEvent> {
        self.last_event.take()
    }

    /// Whether any hand piece still fits anywhere on the board
    pub fn has_any_move(&self) -> bool {
        self.hand.slots().iter().flatten().any(|piece| {
            (0..self.board.len()).any(|y| {
                (0..self.board.len()).any(|x| self.board.can_fit(piece.shape, x, y))
            })
        })
    }

    /// Start dragging the piece in `slot`. Computes the fit map once.
    ///
    /// Returns false (and changes nothing) when a drag is already active or
    /// the slot is empty; the UI refuses those drags upstream.
    pub fn begin_drag(&mut self, slot: usize) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(piece) = self.hand.get(slot).copied() else {
            return false;
        };

        let fit_map = self.board.fit_map(piece.shape);
        trace!(
            "drag begin: slot {slot}, {} blocks, any fit: {}",
            piece.block_count(),
            fit_map.any()
        );
        self.drag = Some(Drag { slot, piece, fit_map });
        true
    }

    /// Re-derive the hover preview for the current pointer target.
    ///
    /// Clears the previous hover, then overlays the piece (with pending-
    /// clear marks) only when (x, y) is a fitting origin.
    pub fn update_drag(&mut self, x: usize, y: usize) {
        self.board.clear_hover();
        if let Some(drag) = &self.drag {
            if drag.fit_map.at(x, y) {
                let piece = drag.piece;
                self.board.preview_clears(&piece, x, y);
            }
        }
    }

    /// End the drag: commit at `Some((x, y))`, cancel on `None`.
    ///
    /// A commit target must be one the fit map approved; committing
    /// elsewhere is a caller bug (the same contract as `Board::place`).
    /// Cancelling never mutates score or committed board state.
    pub fn end_drag(&mut self, target: Option<(usize, usize)>) -> Option<PlacementEvent> {
        self.board.clear_hover();
        let drag = self.drag.take()?;
        let (x, y) = target?;
        debug_assert!(
            drag.fit_map.at(x, y),
            "commit at ({x}, {y}) was never offered by the fit map"
        );

        self.board.place(&drag.piece, x, y, BlockState::Filled);
        let lines_broken = self.board.break_lines();
        let blocks_placed = drag.piece.block_count();

        if lines_broken > 0 {
            self.combo += lines_broken as u32;
            self.moves_since_clear = 0;
        } else {
            self.moves_since_clear += 1;
            if scoring::combo_expired(self.moves_since_clear, self.config.hand_size) {
                self.combo = 0;
            }
        }

        // Bonus uses the post-increment combo value.
        let delta = scoring::evaluate(lines_broken, self.config.board_len, self.combo, blocks_placed);
        self.score += delta.total();

        self.hand.play_slot(drag.slot);
        let hand_refilled = if self.hand.is_exhausted() {
            self.hand.redraw(&mut self.rng);
            true
        } else {
            false
        };

        debug!(
            "commit: slot {} at ({x}, {y}), {blocks_placed} blocks, {lines_broken} lines, +{:.1} -> {:.1} (combo {})",
            drag.slot,
            delta.total(),
            self.score,
            self.combo
        );

        let event = PlacementEvent {
            slot: drag.slot,
            blocks_placed,
            lines_broken,
            score_delta: delta.total(),
            score: self.score,
            combo: self.combo,
            hand_refilled,
        };
        self.last_event = Some(event);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_dimensions() {
        let session = GameSession::with_seed(Mode::Classic, 1);
        assert_eq!(session.board().len(), 8);
        assert_eq!(session.hand().size(), 3);

        let session = GameSession::with_seed(Mode::Chaos, 1);
        assert_eq!(session.board().len(), 10);
        assert_eq!(session.hand().size(), 5);
    }

    #[test]
    fn test_custom_config_overrides_mode_pairing() {
        let config = SessionConfig {
            board_len: 6,
            hand_size: 2,
        };
        let session = GameSession::with_config(Mode::Classic, config, SimpleRng::new(1));
        assert_eq!(session.board().len(), 6);
        assert_eq!(session.hand().size(), 2);
        assert_eq!(session.mode(), Mode::Classic);
    }

    #[test]
    fn test_begin_drag_requires_occupied_slot_and_no_active_drag() {
        let mut session = GameSession::with_seed(Mode::Classic, 5);
        assert!(session.begin_drag(0));
        assert_eq!(session.dragging(), Some(0));
        // A second drag cannot start while one is active
        assert!(!session.begin_drag(1));

        session.end_drag(None);
        assert_eq!(session.dragging(), None);
    }

    #[test]
    fn test_cancel_leaves_everything_untouched() {
        let mut session = GameSession::with_seed(Mode::Classic, 5);
        let board_before = session.board().clone();

        assert!(session.begin_drag(0));
        session.update_drag(0, 0);
        assert!(session.end_drag(None).is_none());

        assert_eq!(session.board(), &board_before);
        assert_eq!(session.score(), 0.0);
        assert!(session.hand().get(0).is_some());
    }

    #[test]
    fn test_commit_scores_block_count_without_clear() {
        let mut session = GameSession::with_seed(Mode::Classic, 5);
        let blocks = session.hand().get(0).unwrap().block_count();

        assert!(session.begin_drag(0));
        let event = session.end_drag(Some((0, 0))).expect("commit succeeds");

        assert_eq!(event.blocks_placed, blocks);
        assert_eq!(event.lines_broken, 0);
        assert_eq!(session.score(), blocks as f64);
        assert!(session.hand().get(0).is_none());
        assert!(!event.hand_refilled);
    }

    #[test]
    fn test_update_drag_is_hover_only() {
        let mut session = GameSession::with_seed(Mode::Classic, 5);
        assert!(session.begin_drag(0));
        session.update_drag(2, 2);
        session.update_drag(3, 3);

        // No committed cells anywhere; hover cells exist only at the latest target.
        let hover_count = session
            .board()
            .cells()
            .iter()
            .filter(|c| c.state.is_hover())
            .count();
        assert_eq!(hover_count, session.hand().get(0).unwrap().block_count());
        assert!(session.board().cells().iter().all(|c| c.state != BlockState::Filled));
    }

    #[test]
    fn test_take_last_event_consumes() {
        let mut session = GameSession::with_seed(Mode::Classic, 5);
        assert!(session.take_last_event().is_none());

        session.begin_drag(0);
        session.end_drag(Some((0, 0)));

        assert!(session.take_last_event().is_some());
        assert!(session.take_last_event().is_none());
    }

    #[test]
    fn test_has_any_move_on_fresh_board() {
        let session = GameSession::with_seed(Mode::Classic, 5);
        assert!(session.has_any_move());
    }

    use crate::core::catalog::{Piece, SHAPES};
    use crate::types::Color;

    fn catalog_piece(width: usize, height: usize) -> Piece {
        let shape = SHAPES
            .iter()
            .find(|s| {
                s.width() == width && s.height() == height && s.block_count() == width * height
            })
            .expect("rectangle is in the catalog");
        Piece {
            shape,
            color: Color::new(200, 100, 50),
        }
    }

    #[test]
    fn test_bar_on_empty_board_scores_four() {
        // Classic 8x8: a horizontal 1x4 bar at row 0, columns 0-3, on an
        // empty board clears nothing and scores its block count.
        let mut session = GameSession::with_seed(Mode::Classic, 2);
        session.hand.set_slot(0, Some(catalog_piece(4, 1)));

        assert!(session.board.can_fit(catalog_piece(4, 1).shape, 0, 0));
        assert!(session.begin_drag(0));
        let event = session.end_drag(Some((0, 0))).unwrap();

        assert_eq!(event.lines_broken, 0);
        assert_eq!(event.score_delta, 4.0);
        assert_eq!(session.score(), 4.0);
        assert_eq!(session.combo(), 0);
        assert_eq!(session.moves_since_clear(), 1);
    }

    #[test]
    fn test_single_cell_completes_row() {
        // Row 3 filled except (7, 3); dropping a 1x1 there breaks one line
        // and scores 1 + 1 * 8 * (1/2) * 1 = 5.
        let mut session = GameSession::with_seed(Mode::Classic, 2);
        let filler = catalog_piece(1, 1);
        for x in 0..7 {
            session.board.place(&filler, x, 3, BlockState::Filled);
        }
        session.hand.set_slot(0, Some(filler));

        assert!(session.begin_drag(0));
        let event = session.end_drag(Some((7, 3))).unwrap();

        assert_eq!(event.lines_broken, 1);
        assert_eq!(event.combo, 1);
        assert_eq!(event.score_delta, 5.0);
        assert_eq!(session.score(), 5.0);
        assert_eq!(session.moves_since_clear(), 0);

        // The whole row reset to empty.
        for x in 0..8 {
            assert!(!session.board().is_filled(x, 3));
        }
    }

    #[test]
    fn test_combo_decays_after_full_hand_cycle_only() {
        let mut session = GameSession::with_seed(Mode::Classic, 2);
        let filler = catalog_piece(1, 1);

        // First commit breaks a line and starts the combo.
        for x in 0..7 {
            session.board.place(&filler, x, 0, BlockState::Filled);
        }
        session.hand.set_slot(0, Some(filler));
        session.begin_drag(0);
        session.end_drag(Some((7, 0)));
        assert_eq!(session.combo(), 1);

        // Three non-clearing commits: combo survives the first two misses
        // (hand size 3) and resets on the third.
        for (i, target) in [(0usize, 0usize), (2, 2), (4, 4)].into_iter().enumerate() {
            session.hand.set_slot(0, Some(filler));
            session.begin_drag(0);
            session.end_drag(Some(target));
            if i < 2 {
                assert_eq!(session.combo(), 1, "combo must survive miss {}", i + 1);
            } else {
                assert_eq!(session.combo(), 0, "combo resets after a full hand cycle");
            }
        }
    }

    #[test]
    fn test_clearing_resets_miss_counter() {
        let mut session = GameSession::with_seed(Mode::Classic, 2);
        let filler = catalog_piece(1, 1);

        session.hand.set_slot(0, Some(filler));
        session.begin_drag(0);
        session.end_drag(Some((0, 0)));
        assert_eq!(session.moves_since_clear(), 1);

        for x in 1..7 {
            session.board.place(&filler, x, 0, BlockState::Filled);
        }
        session.hand.set_slot(0, Some(filler));
        session.begin_drag(0);
        session.end_drag(Some((7, 0)));
        assert_eq!(session.moves_since_clear(), 0);
    }

    #[test]
    fn test_simultaneous_row_and_column_clear() {
        // Row 2 and column 5 complete together: two distinct lines, shared
        // cell cleared once, combo jumps by 2.
        let mut session = GameSession::with_seed(Mode::Classic, 2);
        let filler = catalog_piece(1, 1);
        for i in 0..8 {
            if i != 5 {
                session.board.place(&filler, i, 2, BlockState::Filled);
            }
            if i != 2 {
                session.board.place(&filler, 5, i, BlockState::Filled);
            }
        }
        session.hand.set_slot(0, Some(filler));

        session.begin_drag(0);
        let event = session.end_drag(Some((5, 2))).unwrap();

        assert_eq!(event.lines_broken, 2);
        assert_eq!(event.combo, 2);
        // 1 + 2 * 8 * (2/2) * 1
        assert_eq!(event.score_delta, 17.0);
        for i in 0..8 {
            assert!(!session.board().is_filled(i, 2));
            assert!(!session.board().is_filled(5, i));
        }
    }

    #[test]
    fn test_hand_refills_wholesale_on_exhaustion() {
        let mut session = GameSession::with_seed(Mode::Classic, 2);
        let filler = catalog_piece(1, 1);
        for slot in 0..3 {
            session.hand.set_slot(slot, Some(filler));
        }

        // Scatter the three pieces so nothing clears.
        let targets = [(0usize, 0usize), (2, 2), (4, 4)];
        for (slot, target) in targets.into_iter().enumerate() {
            assert!(session.begin_drag(slot));
            let event = session.end_drag(Some(target)).unwrap();
            if slot < 2 {
                assert!(!event.hand_refilled);
                // Exactly one slot changed on this commit.
                let empty = session.hand().slots().iter().filter(|s| s.is_none()).count();
                assert_eq!(empty, slot + 1);
            } else {
                assert!(event.hand_refilled);
                assert!(session.hand().slots().iter().all(|s| s.is_some()));
            }
        }
    }
}
