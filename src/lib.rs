//! Blockfall - a block-placement puzzle engine.
//!
//! A fixed N×N board accepts polyomino pieces drawn from a weighted catalog
//! into a fixed-size hand; placing a piece may complete rows and columns,
//! which clear simultaneously and feed a combo-scaled score. The engine is
//! pure and presentation-independent: rendering, gestures and persistence
//! consume the [`core`] query/command surface and the snapshots it exports.

pub mod app;
pub mod core;
pub mod highscores;
pub mod types;

pub use crate::core::{GameSession, PlacementEvent, SessionConfig};
pub use crate::types::Mode;
