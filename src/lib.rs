//! Block Blast - An 8x8 block placement puzzle
//!
//! Core modules:
//! - `sim`: Game logic (grid, shape catalog, tray, placement, clears, game over)
//! - `highscores`: Local top-10 leaderboard
//! - `settings`: Player preferences
//! - `audio`: Procedural sound effects
//! - `platform`: Browser/native platform abstraction
//! - `web`: JavaScript bindings for the browser front end

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{Leaderboard, LeaderboardEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side length of the square grid
    pub const GRID_SIZE: usize = 8;
    /// Number of pieces offered at once
    pub const TRAY_SIZE: usize = 3;

    /// How long cleared lines stay in the Clearing state (milliseconds)
    pub const CLEAR_DELAY_MS: u32 = 400;

    /// Points per cleared line
    pub const LINE_POINTS: u64 = 10;
    /// Extra points for every line beyond the first in a single placement
    pub const MULTI_LINE_POINTS: u64 = 5;

    /// Entries kept on the leaderboard
    pub const MAX_HIGH_SCORES: usize = 10;
}
