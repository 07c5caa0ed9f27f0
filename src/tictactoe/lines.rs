//! Line sums for win detection

use super::{Cell, Side};

/// Winning line indices on the 3x3 board, in row, column, diagonal order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Sum of the cell values along one line (+1 per Max mark, -1 per Min mark)
    pub fn line_sum(cells: &[Cell; 9], line: &[usize; 3]) -> i8 {
        line.iter().map(|&idx| cells[idx].value()).sum()
    }

    /// First completed line found, scanning rows, then columns, then diagonals.
    ///
    /// A sum of +3 belongs to Max and -3 to Min. Boards with completed lines
    /// for both sides cannot arise in play, so the scan order carries no meaning
    /// beyond determinism.
    pub fn winner(cells: &[Cell; 9]) -> Option<Side> {
        WINNING_LINES
            .iter()
            .find_map(|line| match Self::line_sum(cells, line) {
                3 => Some(Side::Max),
                -3 => Some(Side::Min),
                _ => None,
            })
    }

    /// Check whether `side` has three in a row anywhere
    pub fn has_won(cells: &[Cell; 9], side: Side) -> bool {
        let target = 3 * side.sign();
        WINNING_LINES
            .iter()
            .any(|line| Self::line_sum(cells, line) == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[3] = Cell::Max;
        cells[4] = Cell::Max;
        cells[5] = Cell::Max;

        assert!(LineAnalyzer::has_won(&cells, Side::Max));
        assert!(!LineAnalyzer::has_won(&cells, Side::Min));
        assert_eq!(LineAnalyzer::winner(&cells), Some(Side::Max));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Min;
        cells[5] = Cell::Min;
        cells[8] = Cell::Min;

        assert!(LineAnalyzer::has_won(&cells, Side::Min));
        assert_eq!(LineAnalyzer::winner(&cells), Some(Side::Min));
    }

    #[test]
    fn test_anti_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Max;
        cells[4] = Cell::Max;
        cells[6] = Cell::Max;

        assert_eq!(LineAnalyzer::winner(&cells), Some(Side::Max));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Max;
        cells[1] = Cell::Min;
        cells[2] = Cell::Max;

        assert_eq!(LineAnalyzer::line_sum(&cells, &WINNING_LINES[0]), 1);
        assert_eq!(LineAnalyzer::winner(&cells), None);
    }
}
