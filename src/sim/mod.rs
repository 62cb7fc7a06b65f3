//! Game logic module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time advances only through `tick`
//! - No rendering, audio or platform dependencies

pub mod engine;
pub mod grid;
pub mod scoring;
pub mod shapes;
pub mod state;
pub mod tray;

pub use engine::{
    clear_preview, is_terminal, place_block, resolve_clears, tick, update_preview,
};
pub use grid::{CellState, Grid, Position};
pub use scoring::{line_bonus, placement_score};
pub use shapes::ShapeKind;
pub use state::{GameEvent, GamePhase, GameState, PendingClear, Snapshot};
pub use tray::Tray;
