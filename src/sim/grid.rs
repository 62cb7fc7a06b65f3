//! Grid and cell positions
//!
//! The grid is a fixed 8x8 matrix addressed by (row, col), row 0 at the top.
//! Positions are signed so an anchor hovering off the board is representable
//! and simply fails the placement checks.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::shapes::ShapeKind;
use crate::consts::GRID_SIZE;

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Filled,
    /// Part of a completed line, waiting for the clear to resolve
    Clearing,
}

/// A grid coordinate, or a relative offset inside a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Flat (row, col) indices if the position is on the grid
    #[inline]
    fn index(self) -> Option<(usize, usize)> {
        let size = GRID_SIZE as i32;
        if (0..size).contains(&self.row) && (0..size).contains(&self.col) {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }

    /// Whether the position lies on the grid
    #[inline]
    pub fn in_bounds(self) -> bool {
        self.index().is_some()
    }
}

/// Saturates instead of overflowing, so an extreme anchor stays off the grid
impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.row.saturating_add(rhs.row), self.col.saturating_add(rhs.col))
    }
}

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[CellState; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// Create an all-empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Side length
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Cell at `pos`, `None` if off the grid
    pub fn get(&self, pos: Position) -> Option<CellState> {
        pos.index().map(|(r, c)| self.cells[r][c])
    }

    /// Set the cell at `pos`. Returns false if off the grid.
    pub fn set(&mut self, pos: Position, state: CellState) -> bool {
        match pos.index() {
            Some((r, c)) => {
                self.cells[r][c] = state;
                true
            }
            None => false,
        }
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> &[[CellState; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == state)
            .count()
    }

    /// True when no cell is Filled or Clearing
    pub fn is_clear(&self) -> bool {
        self.count(CellState::Empty) == GRID_SIZE * GRID_SIZE
    }

    /// Whether `shape` fits at `anchor`: every cell on the grid and Empty
    pub fn can_place(&self, shape: ShapeKind, anchor: Position) -> bool {
        shape
            .cells()
            .iter()
            .all(|&offset| self.get(anchor + offset) == Some(CellState::Empty))
    }

    /// Whether `shape` fits at any anchor on the grid
    pub fn can_place_anywhere(&self, shape: ShapeKind) -> bool {
        let size = GRID_SIZE as i32;
        (0..size)
            .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
            .any(|anchor| self.can_place(shape, anchor))
    }

    /// Absolute cells `shape` would cover at `anchor`, empty if it doesn't fit
    pub fn footprint(&self, shape: ShapeKind, anchor: Position) -> Vec<Position> {
        if !self.can_place(shape, anchor) {
            return Vec::new();
        }
        shape.cells().iter().map(|&offset| anchor + offset).collect()
    }

    /// Mark the shape's cells Filled. The caller has checked `can_place`.
    pub(crate) fn stamp(&mut self, shape: ShapeKind, anchor: Position) -> Vec<Position> {
        let cells = self.footprint(shape, anchor);
        for &pos in &cells {
            self.set(pos, CellState::Filled);
        }
        cells
    }

    /// Indices of rows where every cell is Filled
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..GRID_SIZE)
            .filter(|&r| self.cells[r].iter().all(|&cell| cell == CellState::Filled))
            .collect()
    }

    /// Indices of columns where every cell is Filled
    pub fn complete_cols(&self) -> Vec<usize> {
        (0..GRID_SIZE)
            .filter(|&c| self.cells.iter().all(|row| row[c] == CellState::Filled))
            .collect()
    }

    /// Mark every cell of the given rows and columns as Clearing.
    ///
    /// Returns the marked cells, rows first, then column cells not already
    /// covered by a marked row. A cell on a row/column intersection appears once.
    pub(crate) fn mark_clearing(&mut self, rows: &[usize], cols: &[usize]) -> Vec<Position> {
        let mut marked = Vec::with_capacity((rows.len() + cols.len()) * GRID_SIZE);
        for &r in rows {
            for c in 0..GRID_SIZE {
                marked.push(Position::new(r as i32, c as i32));
            }
        }
        for &c in cols {
            for r in (0..GRID_SIZE).filter(|r| !rows.contains(r)) {
                marked.push(Position::new(r as i32, c as i32));
            }
        }
        for &pos in &marked {
            self.set(pos, CellState::Clearing);
        }
        marked
    }

    /// Turn every Clearing cell Empty. Returns how many cells were cleared.
    pub(crate) fn resolve_clearing(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().flatten() {
            if *cell == CellState::Clearing {
                *cell = CellState::Empty;
                cleared += 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fill_all_except(hole: Position) -> Grid {
        let mut grid = Grid::new();
        for r in 0..GRID_SIZE as i32 {
            for c in 0..GRID_SIZE as i32 {
                if Position::new(r, c) != hole {
                    grid.set(Position::new(r, c), CellState::Filled);
                }
            }
        }
        grid
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert!(grid.is_clear());
        assert_eq!(grid.count(CellState::Empty), 64);
        assert_eq!(grid.size(), 8);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = Grid::new();
        assert!(grid.set(Position::new(7, 7), CellState::Filled));
        assert_eq!(grid.get(Position::new(7, 7)), Some(CellState::Filled));
        assert!(!grid.set(Position::new(8, 0), CellState::Filled));
        assert_eq!(grid.get(Position::new(-1, 3)), None);
        assert_eq!(grid.get(Position::new(3, 8)), None);
    }

    #[test]
    fn test_can_place_rejects_edges() {
        let grid = Grid::new();
        assert!(grid.can_place(ShapeKind::LineH3, Position::new(0, 5)));
        assert!(!grid.can_place(ShapeKind::LineH3, Position::new(0, 6)));
        assert!(grid.can_place(ShapeKind::LineV3, Position::new(5, 0)));
        assert!(!grid.can_place(ShapeKind::LineV3, Position::new(6, 0)));
        assert!(!grid.can_place(ShapeKind::Single, Position::new(-1, 0)));
    }

    #[test]
    fn test_can_place_rejects_occupied() {
        let mut grid = Grid::new();
        grid.set(Position::new(1, 1), CellState::Filled);
        assert!(!grid.can_place(ShapeKind::Square, Position::new(0, 0)));
        assert!(grid.can_place(ShapeKind::Square, Position::new(2, 2)));

        // Clearing cells are not free either
        grid.set(Position::new(4, 4), CellState::Clearing);
        assert!(!grid.can_place(ShapeKind::Single, Position::new(4, 4)));
    }

    #[test]
    fn test_extreme_anchors_rejected() {
        let grid = Grid::new();
        let extremes = [i32::MIN, -1, 8, i32::MAX];
        for shape in ShapeKind::ALL {
            for &row in &extremes {
                for &col in &extremes {
                    let anchor = Position::new(row, col);
                    assert!(!grid.can_place(shape, anchor), "{} at {:?}", shape.id(), anchor);
                    assert!(grid.footprint(shape, anchor).is_empty());
                }
                // One coordinate in range, the other extreme
                assert!(!grid.can_place(shape, Position::new(0, row)));
                assert!(!grid.can_place(shape, Position::new(row, 0)));
            }
        }
        assert_eq!(Position::new(0, i32::MAX) + Position::new(1, 1), Position::new(1, i32::MAX));
    }

    #[test]
    fn test_offsets_not_normalized() {
        // l-shape-rev has no (0, 0) cell, so its anchor column may be filled
        let mut grid = Grid::new();
        grid.set(Position::new(0, 0), CellState::Filled);
        assert!(grid.can_place(ShapeKind::LShapeRev, Position::new(0, 0)));
        assert!(!grid.can_place(ShapeKind::LShape, Position::new(0, 0)));
    }

    #[test]
    fn test_can_place_anywhere_single_hole() {
        let grid = fill_all_except(Position::new(3, 4));
        assert!(grid.can_place_anywhere(ShapeKind::Single));
        assert!(!grid.can_place_anywhere(ShapeKind::LineH3));
        assert!(!grid.can_place_anywhere(ShapeKind::LineV3));
        assert!(!grid.can_place_anywhere(ShapeKind::Square));
    }

    #[test]
    fn test_footprint() {
        let grid = Grid::new();
        assert_eq!(
            grid.footprint(ShapeKind::TShape, Position::new(2, 3)),
            vec![
                Position::new(2, 3),
                Position::new(2, 4),
                Position::new(2, 5),
                Position::new(3, 4),
            ]
        );
        assert!(grid.footprint(ShapeKind::TShape, Position::new(7, 3)).is_empty());
    }

    #[test]
    fn test_complete_rows_and_cols_independent() {
        let mut grid = Grid::new();
        for c in 0..8 {
            grid.set(Position::new(2, c), CellState::Filled);
        }
        for r in 0..8 {
            grid.set(Position::new(r, 5), CellState::Filled);
        }
        assert_eq!(grid.complete_rows(), vec![2]);
        assert_eq!(grid.complete_cols(), vec![5]);
    }

    #[test]
    fn test_mark_clearing_counts_intersection_once() {
        let mut grid = Grid::new();
        for i in 0..8 {
            grid.set(Position::new(2, i), CellState::Filled);
            grid.set(Position::new(i, 5), CellState::Filled);
        }
        let marked = grid.mark_clearing(&[2], &[5]);
        assert_eq!(marked.len(), 15);
        assert_eq!(grid.count(CellState::Clearing), 15);
        assert_eq!(grid.count(CellState::Filled), 0);

        assert_eq!(grid.resolve_clearing(), 15);
        assert!(grid.is_clear());
    }

    proptest! {
        #[test]
        fn prop_can_place_false_out_of_bounds(
            shape_idx in 0..ShapeKind::ALL.len(),
            row in -20i32..20,
            col in -20i32..20,
        ) {
            let shape = ShapeKind::ALL[shape_idx];
            let anchor = Position::new(row, col);
            let leaves_grid = shape.cells().iter().any(|&o| !(anchor + o).in_bounds());
            if leaves_grid {
                prop_assert!(!Grid::new().can_place(shape, anchor));
            } else {
                prop_assert!(Grid::new().can_place(shape, anchor));
            }
        }

        #[test]
        fn prop_can_place_iff_targets_empty(
            shape_idx in 0..ShapeKind::ALL.len(),
            row in 0i32..8,
            col in 0i32..8,
            filled in proptest::collection::vec((0i32..8, 0i32..8), 0..20),
        ) {
            let shape = ShapeKind::ALL[shape_idx];
            let anchor = Position::new(row, col);
            let mut grid = Grid::new();
            for (r, c) in filled {
                grid.set(Position::new(r, c), CellState::Filled);
            }
            let expected = shape.cells().iter().all(|&o| grid.get(anchor + o) == Some(CellState::Empty));
            prop_assert_eq!(grid.can_place(shape, anchor), expected);
        }
    }
}
