//! Placement, line clears and game over
//!
//! A placement that completes lines is committed in two steps. The first
//! stamps the piece, awards the score and marks the completed lines as
//! Clearing. The second, run once `CLEAR_DELAY_MS` has passed in `tick` (or
//! straight away via `resolve_clears`), empties those cells, takes the piece
//! out of the tray and checks for game over against the cleared grid.

use super::grid::{Grid, Position};
use super::scoring::{line_bonus, placement_score};
use super::shapes::ShapeKind;
use super::state::{GameEvent, GamePhase, GameState, PendingClear};
use super::tray::Tray;
use crate::consts::CLEAR_DELAY_MS;

/// True when no piece in `tray` fits anywhere on `grid`
pub fn is_terminal(grid: &Grid, tray: &Tray) -> bool {
    tray.shapes().all(|shape| !grid.can_place_anywhere(shape))
}

/// Recompute the placement preview for a dragged piece.
///
/// Shows nothing if the piece or anchor is missing, or the piece doesn't fit.
pub fn update_preview(
    state: &mut GameState,
    shape: Option<ShapeKind>,
    anchor: Option<Position>,
) -> &[Position] {
    state.preview_cells = match (shape, anchor) {
        (Some(shape), Some(anchor)) => state.grid.footprint(shape, anchor),
        _ => Vec::new(),
    };
    &state.preview_cells
}

/// Hide the placement preview
pub fn clear_preview(state: &mut GameState) {
    state.preview_cells.clear();
}

/// Place the piece in tray `slot` at `anchor`.
///
/// `shape` must match the piece in the slot, so a stale reference from an
/// abandoned drag is refused. Returns false, leaving the state untouched, when
/// the piece can't be placed there or the session isn't accepting moves.
pub fn place_block(state: &mut GameState, slot: usize, shape: ShapeKind, anchor: Position) -> bool {
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Clearing | GamePhase::GameOver => {
            log::debug!("Placement refused in phase {:?}", state.phase);
            return false;
        }
    }
    if state.tray.get(slot) != Some(shape) {
        log::debug!("No {} in tray slot {}", shape.id(), slot);
        return false;
    }
    if !state.grid.can_place(shape, anchor) {
        log::debug!("{} doesn't fit at ({}, {})", shape.id(), anchor.row, anchor.col);
        return false;
    }

    let cells = state.grid.stamp(shape, anchor);

    let rows = state.grid.complete_rows();
    let cols = state.grid.complete_cols();
    let lines = rows.len() + cols.len();
    let points = placement_score(cells.len(), lines);
    state.score += points;
    state.preview_cells.clear();

    log::debug!(
        "Placed {} at ({}, {}): +{} ({} lines)",
        shape.id(),
        anchor.row,
        anchor.col,
        points,
        lines
    );
    state.push_event(GameEvent::Placed {
        slot,
        shape,
        cells,
        points,
    });

    if lines == 0 {
        finish_placement(state, slot, shape);
        return true;
    }

    state.clearing_cells = state.grid.mark_clearing(&rows, &cols);
    state.pending_clear = Some(PendingClear {
        slot,
        shape,
        remaining_ms: CLEAR_DELAY_MS,
    });
    state.phase = GamePhase::Clearing;
    state.push_event(GameEvent::LinesCleared {
        rows,
        cols,
        bonus: line_bonus(lines),
    });

    true
}

/// Advance time by `dt_ms`, resolving a pending clear once its delay is up
pub fn tick(state: &mut GameState, dt_ms: u32) {
    let Some(pending) = state.pending_clear.as_mut() else {
        return;
    };
    pending.remaining_ms = pending.remaining_ms.saturating_sub(dt_ms);
    if pending.remaining_ms == 0 {
        resolve_clears(state);
    }
}

/// Resolve a pending clear now, without waiting for the delay.
///
/// Returns false if no clear was pending.
pub fn resolve_clears(state: &mut GameState) -> bool {
    let Some(pending) = state.pending_clear.take() else {
        return false;
    };

    let cleared = state.grid.resolve_clearing();
    state.clearing_cells.clear();
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::ClearResolved { cells: cleared });

    finish_placement(state, pending.slot, pending.shape);
    true
}

/// Take the used piece, refill an empty tray, then check for game over
fn finish_placement(state: &mut GameState, slot: usize, shape: ShapeKind) {
    if !state.tray.take(slot, shape) {
        log::warn!("Tray slot {} no longer holds {}", slot, shape.id());
    }
    if state.tray.is_empty() {
        state.refill_tray();
    }

    if is_terminal(&state.grid, &state.tray) {
        state.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", state.score);
        state.push_event(GameEvent::GameOver { score: state.score });
    }
}
