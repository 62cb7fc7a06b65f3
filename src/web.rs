//! JavaScript bindings
//!
//! The page owns rendering, drag handling and dialogs. It drives a `WebGame`
//! through these calls and redraws from `snapshot()`.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::Leaderboard;
use crate::settings::Settings;
use crate::sim::{self, GameState, Position, ShapeKind};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Block Blast starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    leaderboard: Leaderboard,
    settings: Settings,
    audio: AudioManager,
    /// Whether this game's score already went to the leaderboard
    submitted: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        WebGame {
            state: GameState::new(seed),
            leaderboard: Leaderboard::load(),
            audio: AudioManager::new(&settings),
            settings,
            submitted: false,
        }
    }

    /// Whether the catalog shape `shape_id` fits at (row, col)
    pub fn can_place(&self, shape_id: &str, row: i32, col: i32) -> bool {
        ShapeKind::from_id(shape_id)
            .is_some_and(|shape| self.state.can_place(shape, Position::new(row, col)))
    }

    /// Update the drop preview for a drag in progress. Returns the number of
    /// highlighted cells (0 when the piece doesn't fit or previews are off).
    pub fn update_preview(&mut self, shape_id: Option<String>, row: Option<i32>, col: Option<i32>) -> usize {
        if !self.settings.show_preview {
            sim::clear_preview(&mut self.state);
            return 0;
        }
        let shape = shape_id.as_deref().and_then(ShapeKind::from_id);
        let anchor = row.zip(col).map(|(row, col)| Position::new(row, col));
        sim::update_preview(&mut self.state, shape, anchor).len()
    }

    pub fn clear_preview(&mut self) {
        sim::clear_preview(&mut self.state);
    }

    /// Drop the piece from tray `slot` at (row, col)
    pub fn place_block(&mut self, slot: usize, shape_id: &str, row: i32, col: i32) -> bool {
        let Some(shape) = ShapeKind::from_id(shape_id) else {
            log::warn!("Unknown shape id {:?}", shape_id);
            return false;
        };
        let placed = sim::place_block(&mut self.state, slot, shape, Position::new(row, col));
        self.play_events();
        placed
    }

    /// Advance the clear animation by `dt_ms` milliseconds (call every frame)
    pub fn tick(&mut self, dt_ms: u32) {
        sim::tick(&mut self.state, dt_ms);
        self.play_events();
    }

    /// Start a new game. The leaderboard is kept.
    pub fn reset(&mut self) {
        self.state.reset();
        self.submitted = false;
    }

    /// Current state as JSON, without the random source
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot failed: {}", e);
            String::new()
        })
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Best score on the leaderboard
    pub fn best_score(&self) -> f64 {
        self.leaderboard.top_score() as f64
    }

    /// Whether the finished game's score earns a leaderboard spot
    pub fn is_high_score(&self) -> bool {
        self.state.is_game_over() && !self.submitted && self.leaderboard.qualifies(self.state.score)
    }

    /// Record the finished game under `name`. Returns the rank achieved.
    pub fn submit_score(&mut self, name: &str) -> Option<u32> {
        if !self.state.is_game_over() || self.submitted {
            return None;
        }
        self.submitted = true;
        let rank = self
            .leaderboard
            .add_score(name, self.state.score, js_sys::Date::now());
        self.leaderboard.save();
        rank.map(|r| r as u32)
    }

    /// Leaderboard entries as JSON, each with a display date
    pub fn leaderboard(&self) -> String {
        let rows: Vec<_> = self
            .leaderboard
            .entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "name": e.name,
                    "score": e.score,
                    "date": crate::highscores::format_date(e.timestamp),
                })
            })
            .collect();
        serde_json::Value::Array(rows).to_string()
    }

    /// UI button feedback
    pub fn click(&self) {
        self.audio.play(SoundEffect::Click);
    }

    pub fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.settings.save();
        self.audio.apply_settings(&self.settings);
    }

    pub fn set_show_preview(&mut self, show: bool) {
        self.settings.show_preview = show;
        self.settings.save();
        if !show {
            sim::clear_preview(&mut self.state);
        }
    }
}

impl WebGame {
    /// Play the cue for everything the engine reported
    fn play_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
        }
    }
}
