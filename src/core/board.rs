//! Board module - manages the placement grid
//!
//! The board is an N×N grid (N fixed at construction, 8 for Classic and 10
//! for Chaos). Cells are stored in a flat row-major array for cache
//! locality. Coordinates: (x, y) with x left-to-right and y top-to-bottom;
//! piece origins are top-left corners and never wrap.
//!
//! Hover previews live in the same cell state machine as committed blocks
//! (see [`BlockState`]) but are strictly render-only: `clear_hover` restores
//! the committed grid exactly, so the committed state is only ever touched
//! by `place` with `Filled` and by `break_lines`.

use arrayvec::ArrayVec;

use crate::core::catalog::{Piece, ShapeDef};
use crate::types::{BlockState, Color, MAX_BOARD_LEN};

/// One grid position: occupancy state plus the colors rendering needs.
///
/// `color` is whatever piece currently or most recently filled the cell; it
/// survives a line break so the clear flash can still tint correctly.
/// `break_color` is stamped by a pending-clear preview with the dragged
/// piece's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCell {
    pub state: BlockState,
    pub color: Color,
    pub break_color: Color,
}

impl BlockCell {
    pub const EMPTY: BlockCell = BlockCell {
        state: BlockState::Empty,
        color: Color::BLACK,
        break_color: Color::BLACK,
    };
}

/// Boolean origin grid produced by [`Board::fit_map`].
///
/// Full N×N layout; origins where the piece would run off the board are
/// simply false. Drives the UI's snap/drop-target logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitMap {
    len: usize,
    fits: Vec<bool>,
}

impl FitMap {
    /// Board edge length this map was computed against
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the piece fits with its top-left origin at (x, y)
    pub fn at(&self, x: usize, y: usize) -> bool {
        if x >= self.len || y >= self.len {
            return false;
        }
        self.fits[y * self.len + x]
    }

    /// True if at least one origin fits
    pub fn any(&self) -> bool {
        self.fits.iter().any(|&f| f)
    }
}

/// The placement grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    len: usize,
    cells: Vec<BlockCell>,
}

impl Board {
    /// Create a new empty board with the given edge length.
    ///
    /// Panics if `len` is zero or exceeds [`MAX_BOARD_LEN`]; board size is a
    /// construction-time invariant and never changes afterwards.
    pub fn new(len: usize) -> Self {
        assert!(len >= 1 && len <= MAX_BOARD_LEN, "board length {len} out of range");
        Self {
            len,
            cells: vec![BlockCell::EMPTY; len * len],
        }
    }

    /// Board edge length
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.len + x
    }

    /// Get cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&BlockCell> {
        if x >= self.len || y >= self.len {
            return None;
        }
        Some(&self.cells[self.index(x, y)])
    }

    /// Committed occupancy at (x, y); out of bounds reads as not filled
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|cell| cell.state.is_filled())
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[BlockCell] {
        &self.cells
    }

    /// True iff every occupied cell of the shape, offset to origin (x, y),
    /// lands in-bounds on a cell that is not committed-filled.
    pub fn can_fit(&self, shape: &ShapeDef, x: usize, y: usize) -> bool {
        if x + shape.width() > self.len || y + shape.height() > self.len {
            return false;
        }
        shape
            .cells()
            .all(|(sx, sy)| !self.is_filled(x + sx, y + sy))
    }

    /// Compute where the shape fits for every candidate origin
    /// (board length − shape dimension + 1 origins per axis).
    pub fn fit_map(&self, shape: &ShapeDef) -> FitMap {
        let mut fits = vec![false; self.len * self.len];

        if shape.width() <= self.len && shape.height() <= self.len {
            for y in 0..=(self.len - shape.height()) {
                for x in 0..=(self.len - shape.width()) {
                    if self.can_fit(shape, x, y) {
                        fits[y * self.len + x] = true;
                    }
                }
            }
        }

        FitMap { len: self.len, fits }
    }

    /// Write `state` and the piece's color into every cell the piece
    /// occupies at origin (x, y).
    ///
    /// The caller has already established fit via `can_fit`/`fit_map`; this
    /// performs no re-check and is undefined for a non-fitting origin.
    pub fn place(&mut self, piece: &Piece, x: usize, y: usize, state: BlockState) {
        for (sx, sy) in piece.shape.cells() {
            let idx = self.index(x + sx, y + sy);
            self.cells[idx].state = state;
            self.cells[idx].color = piece.color;
        }
    }

    /// Revert every hover cell to its underlying committed state. Idempotent.
    pub fn clear_hover(&mut self) {
        for cell in &mut self.cells {
            match cell.state {
                BlockState::Hovered | BlockState::HoveredBreakEmpty => {
                    cell.state = BlockState::Empty;
                }
                BlockState::HoveredBreakFilled => {
                    cell.state = BlockState::Filled;
                }
                BlockState::Empty | BlockState::Filled => {}
            }
        }
    }

    /// Overlay the piece as a hover preview at (x, y) and mark every cell of
    /// each row/column the placement would complete.
    ///
    /// Already-filled cells of a completing line become `HoveredBreakFilled`
    /// (stamping the piece's color as break color); all other cells of the
    /// line, including the hovered piece's own, become `HoveredBreakEmpty`.
    /// Committed occupancy is untouched; `clear_hover` undoes everything.
    ///
    /// Expects a hover-free board (the session clears the previous preview
    /// before each drag update) and an origin where the piece fits.
    pub fn preview_clears(&mut self, piece: &Piece, x: usize, y: usize) {
        self.place(piece, x, y, BlockState::Hovered);

        let (rows, cols) = self.completed_lines(|cell| {
            cell.state.is_filled() || cell.state == BlockState::Hovered
        });

        for &row in &rows {
            for col in 0..self.len {
                self.mark_break(col, row, piece.color);
            }
        }
        for &col in &cols {
            for row in 0..self.len {
                self.mark_break(col, row, piece.color);
            }
        }
    }

    fn mark_break(&mut self, x: usize, y: usize, break_color: Color) {
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        match cell.state {
            BlockState::Filled => {
                cell.state = BlockState::HoveredBreakFilled;
                cell.break_color = break_color;
            }
            BlockState::Empty | BlockState::Hovered => {
                cell.state = BlockState::HoveredBreakEmpty;
            }
            // Already marked by an intersecting line
            BlockState::HoveredBreakEmpty | BlockState::HoveredBreakFilled => {}
        }
    }

    /// Clear every fully-filled row and column and return the count of
    /// distinct lines cleared (rows + columns, not cells).
    ///
    /// Qualifying lines are collected before any cell is reset, so clearing
    /// is simultaneous: a cell shared by a clearing row and a clearing
    /// column resets once and no cascade can occur. Cell colors survive for
    /// the clear flash; only occupancy resets.
    pub fn break_lines(&mut self) -> usize {
        let (rows, cols) = self.completed_lines(|cell| cell.state == BlockState::Filled);

        for &row in &rows {
            for col in 0..self.len {
                let idx = self.index(col, row);
                self.cells[idx].state = BlockState::Empty;
            }
        }
        for &col in &cols {
            for row in 0..self.len {
                let idx = self.index(col, row);
                self.cells[idx].state = BlockState::Empty;
            }
        }

        rows.len() + cols.len()
    }

    /// Row and column indices where every cell satisfies the predicate
    fn completed_lines<F>(
        &self,
        pred: F,
    ) -> (ArrayVec<usize, MAX_BOARD_LEN>, ArrayVec<usize, MAX_BOARD_LEN>)
    where
        F: Fn(&BlockCell) -> bool,
    {
        let mut rows = ArrayVec::new();
        let mut cols = ArrayVec::new();

        for y in 0..self.len {
            let start = y * self.len;
            if self.cells[start..start + self.len].iter().all(&pred) {
                rows.push(y);
            }
        }
        for x in 0..self.len {
            if (0..self.len).all(|y| pred(&self.cells[y * self.len + x])) {
                cols.push(x);
            }
        }

        (rows, cols)
    }
}
