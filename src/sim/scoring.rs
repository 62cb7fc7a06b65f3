//! Placement scoring
//!
//! A placement earns one point per cell placed, plus a line bonus that grows
//! faster than linearly with the number of lines cleared at once.

use crate::consts::{LINE_POINTS, MULTI_LINE_POINTS};

/// Bonus for clearing `lines` rows and columns in one placement
///
/// 0 lines = 0, 1 = 10, 2 = 25, 3 = 40, ...
pub fn line_bonus(lines: usize) -> u64 {
    if lines == 0 {
        return 0;
    }
    let lines = lines as u64;
    lines * LINE_POINTS + (lines - 1) * MULTI_LINE_POINTS
}

/// Total score for placing `cells` cells and clearing `lines` lines
pub fn placement_score(cells: usize, lines: usize) -> u64 {
    cells as u64 + line_bonus(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bonus_table() {
        assert_eq!(line_bonus(0), 0);
        assert_eq!(line_bonus(1), 10);
        assert_eq!(line_bonus(2), 25);
        assert_eq!(line_bonus(3), 40);
        assert_eq!(line_bonus(4), 55);
    }

    #[test]
    fn test_placement_score() {
        assert_eq!(placement_score(3, 0), 3);
        assert_eq!(placement_score(1, 1), 11);
        // Square completing a row and a column at once
        assert_eq!(placement_score(4, 2), 29);
    }
}
