//! Read-only projections of session state for rendering and observers.
//!
//! Snapshots own their data and carry serde derives so an out-of-process
//! renderer or replay tool can consume them without touching engine types.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::catalog::Piece;
use crate::core::hand::Hand;
use crate::types::{BlockState, Color, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub state: BlockState,
    pub color: Color,
    pub break_color: Color,
}

/// A hand piece flattened to its matrix plus color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub width: usize,
    pub height: usize,
    /// Occupied (x, y) offsets within the matrix
    pub blocks: Vec<(usize, usize)>,
    pub color: Color,
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            width: piece.shape.width(),
            height: piece.shape.height(),
            blocks: piece.shape.cells().collect(),
            color: piece.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub board_len: usize,
    /// Row-major, `board_len * board_len` cells
    pub cells: Vec<CellSnapshot>,
    pub hand: Vec<Option<PieceSnapshot>>,
    pub score: f64,
    pub combo: u32,
    pub moves_since_clear: u32,
}

impl SessionSnapshot {
    pub(crate) fn capture(
        mode: Mode,
        board: &Board,
        hand: &Hand,
        score: f64,
        combo: u32,
        moves_since_clear: u32,
    ) -> Self {
        Self {
            mode,
            board_len: board.len(),
            cells: board
                .cells()
                .iter()
                .map(|cell| CellSnapshot {
                    state: cell.state,
                    color: cell.color,
                    break_color: cell.break_color,
                })
                .collect(),
            hand: hand
                .slots()
                .iter()
                .map(|slot| slot.as_ref().map(PieceSnapshot::from))
                .collect(),
            score,
            combo,
            moves_since_clear,
        }
    }

    /// Cell at (x, y); panics out of range like slice indexing
    pub fn cell(&self, x: usize, y: usize) -> &CellSnapshot {
        &self.cells[y * self.board_len + x]
    }
}
