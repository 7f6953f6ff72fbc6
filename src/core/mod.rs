//! Core module - pure puzzle engine with no I/O
//!
//! Everything gameplay lives here: the board state machine, the weighted
//! piece catalog, the hand, scoring, and the session orchestrator. Nothing
//! in this module logs above debug level, touches a file, or spawns a
//! thread; a session is exclusively owned and mutated synchronously.

pub mod board;
pub mod catalog;
pub mod hand;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use board::{BlockCell, Board, FitMap};
pub use catalog::{draw_piece, draw_piece_thread, Piece, ShapeDef, SHAPES};
pub use hand::Hand;
pub use rng::SimpleRng;
pub use session::{GameSession, PlacementEvent, SessionConfig};
pub use snapshot::SessionSnapshot;
