//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

use serde::{Deserialize, Serialize};

/// Classic mode dimensions
pub const CLASSIC_BOARD_LEN: usize = 8;
pub const CLASSIC_HAND_SIZE: usize = 3;

/// Chaos mode dimensions
pub const CHAOS_BOARD_LEN: usize = 10;
pub const CHAOS_HAND_SIZE: usize = 5;

/// Largest board edge any mode uses (bounds no-alloc line buffers)
pub const MAX_BOARD_LEN: usize = CHAOS_BOARD_LEN;

/// Largest piece matrix edge in the catalog
pub const MAX_SHAPE_DIM: usize = 4;

/// Game mode, fixed at session construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Classic,
    Chaos,
}

impl Mode {
    /// Board edge length for this mode
    pub fn board_len(&self) -> usize {
        match self {
            Mode::Classic => CLASSIC_BOARD_LEN,
            Mode::Chaos => CHAOS_BOARD_LEN,
        }
    }

    /// Number of hand slots for this mode
    pub fn hand_size(&self) -> usize {
        match self {
            Mode::Classic => CLASSIC_HAND_SIZE,
            Mode::Chaos => CHAOS_HAND_SIZE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Chaos => "chaos",
        }
    }

    /// Parse mode from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Mode::Classic),
            "chaos" => Some(Mode::Chaos),
            _ => None,
        }
    }
}

/// RGB tag stamped on placed cells. Purely cosmetic, no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The fixed palette pieces draw their color from (unweighted)
pub const PIECE_PALETTE: [Color; 4] = [
    Color::new(161, 3, 252),
    Color::new(242, 197, 48),
    Color::new(42, 23, 209),
    Color::new(176, 14, 55),
];

/// Per-cell occupancy state machine.
///
/// The three hover variants are render-only overlays: `Hovered` marks the
/// dragged piece's footprint, and the two break variants mark cells of lines
/// the pending placement would complete. `HoveredBreakFilled` cells were
/// already committed before the hover and revert to `Filled`; the other
/// hover variants revert to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockState {
    Empty,
    Filled,
    Hovered,
    HoveredBreakEmpty,
    HoveredBreakFilled,
}

impl BlockState {
    /// Committed occupancy, ignoring hover overlays
    pub fn is_filled(&self) -> bool {
        matches!(self, BlockState::Filled | BlockState::HoveredBreakFilled)
    }

    pub fn is_hover(&self) -> bool {
        matches!(
            self,
            BlockState::Hovered | BlockState::HoveredBreakEmpty | BlockState::HoveredBreakFilled
        )
    }
}
