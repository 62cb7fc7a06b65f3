//! Game state and session types
//!
//! Everything a session needs lives in `GameState`. Serializing it saves the
//! whole session, random source included. The front end gets a `Snapshot`
//! instead, which leaves the random source out so upcoming trays stay hidden.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Position};
use super::shapes::ShapeKind;
use super::tray::Tray;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a placement
    Playing,
    /// Completed lines are shown as Clearing until the clear resolves
    Clearing,
    /// No tray piece fits anywhere. Only a reset leaves this phase.
    GameOver,
}

/// Continuation scheduled by a placement that completed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingClear {
    /// Tray slot of the piece that triggered the clear
    pub slot: usize,
    pub shape: ShapeKind,
    /// Time left before the Clearing cells empty
    pub remaining_ms: u32,
}

/// Things that happened during a call, for sound and UI cues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece was stamped onto the grid
    Placed {
        slot: usize,
        shape: ShapeKind,
        cells: Vec<Position>,
        points: u64,
    },
    /// Rows/columns completed; their cells are now Clearing
    LinesCleared {
        rows: Vec<usize>,
        cols: Vec<usize>,
        bonus: u64,
    },
    /// Clearing cells became Empty
    ClearResolved { cells: usize },
    /// The tray ran out and was dealt three new pieces
    TrayRefilled,
    /// No piece in the tray fits anywhere
    GameOver { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Source for tray draws
    rng: Pcg32,
    pub grid: Grid,
    pub score: u64,
    pub tray: Tray,
    pub phase: GamePhase,
    /// Cells currently animating out
    pub clearing_cells: Vec<Position>,
    /// Cells the dragged piece would cover at the hovered anchor
    pub preview_cells: Vec<Position>,
    /// Clear waiting to resolve, if any
    pub pending_clear: Option<PendingClear>,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

/// What the front end needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub score: u64,
    pub tray: &'a Tray,
    pub phase: GamePhase,
    pub clearing_cells: &'a [Position],
    pub preview_cells: &'a [Position],
    pub pending_clear: Option<PendingClear>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        log::info!("New game (seed {})", seed);
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    /// Create a new session drawing pieces from `rng`
    pub fn with_rng(mut rng: Pcg32) -> Self {
        let tray = Tray::random(&mut rng);
        Self {
            rng,
            grid: Grid::new(),
            score: 0,
            tray,
            phase: GamePhase::Playing,
            clearing_cells: Vec::new(),
            preview_cells: Vec::new(),
            pending_clear: None,
            events: Vec::new(),
        }
    }

    /// Start over: empty grid, zero score, fresh tray.
    ///
    /// The random source carries on, so the new game deals different pieces.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.tray = Tray::random(&mut self.rng);
        self.phase = GamePhase::Playing;
        self.clearing_cells.clear();
        self.preview_cells.clear();
        self.pending_clear = None;
        self.events.clear();
        log::info!("Game reset");
    }

    /// Whether `shape` fits at `anchor` on the current grid
    pub fn can_place(&self, shape: ShapeKind, anchor: Position) -> bool {
        self.grid.can_place(shape, anchor)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Drawable view of the session
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            score: self.score,
            tray: &self.tray,
            phase: self.phase,
            clearing_cells: &self.clearing_cells,
            preview_cells: &self.preview_cells,
            pending_clear: self.pending_clear,
        }
    }

    pub fn is_clearing(&self) -> bool {
        self.pending_clear.is_some()
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Deal a new tray
    pub(crate) fn refill_tray(&mut self) {
        self.tray.refill(&mut self.rng);
        self.push_event(GameEvent::TrayRefilled);
    }
}
