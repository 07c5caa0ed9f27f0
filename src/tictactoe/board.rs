//! Board representation, coordinates and terminal-state queries

use std::{
    fmt,
    ops::{Deref, DerefMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Minimax score of a position: +1 Max wins, -1 Min wins, 0 draw
pub type Score = i8;

/// One of the two minimax roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Max,
    Min,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    /// Numeric mark placed on the board (+1 / -1)
    pub fn sign(self) -> i8 {
        match self {
            Side::Max => 1,
            Side::Min => -1,
        }
    }

    pub fn is_maximizing(self) -> bool {
        self == Side::Max
    }

    /// Convert side to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Side::Max => Cell::Max,
            Side::Min => Cell::Min,
        }
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Max,
    Min,
}

impl Cell {
    /// Numeric value used for line sums
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Max => 1,
            Cell::Min => -1,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Max => Some(Side::Max),
            Cell::Min => Some(Side::Min),
            Cell::Empty => None,
        }
    }
}

/// Display letter chosen by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }

    fn from_char(c: char) -> Option<Symbol> {
        match c {
            'X' | 'x' => Some(Symbol::X),
            'O' | 'o' => Some(Symbol::O),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Symbol {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next().and_then(Symbol::from_char), chars.next()) {
            (Some(symbol), None) => Ok(symbol),
            _ => Err(crate::Error::InvalidSymbol {
                input: s.to_string(),
            }),
        }
    }
}

/// A (row, column) coordinate, both in 0..3.
///
/// The fields are private so every `Position` in circulation went through the
/// range check in [`Position::new`], including deserialized ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = crate::Error;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl Position {
    /// Create a position, rejecting coordinates outside the board
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row > 2 || col > 2 {
            return Err(crate::Error::OutOfRange { row, col });
        }
        Ok(Position { row, col })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Position {
            row: index / 3,
            col: index % 3,
        }
    }

    /// Flat cell index (row-major)
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    /// All nine positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9).map(Position::from_index)
    }

    pub fn is_corner(self) -> bool {
        self.row != 1 && self.col != 1
    }
}

/// Renders as the console coordinate, e.g. `B2` for the center
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = (b'A' + self.col as u8) as char;
        write!(f, "{}{}", column, self.row + 1)
    }
}

/// Parses console coordinates: a column letter `a`-`c` followed by a row digit `1`-`3`
impl FromStr for Position {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidCoordinate {
            input: s.to_string(),
        };

        let chars: Vec<char> = s.trim().chars().collect();
        let [column, row] = chars[..] else {
            return Err(invalid());
        };

        let col = match column.to_ascii_lowercase() {
            'a' => 0,
            'b' => 1,
            'c' => 2,
            _ => return Err(invalid()),
        };
        let row = match row.to_digit(10) {
            Some(digit @ 1..=3) => digit as usize - 1,
            _ => return Err(invalid()),
        };

        Position::new(row, col)
    }
}

/// The 3x3 grid.
///
/// Boards are small `Copy` values; the number of moves played is always
/// derivable from the occupied cells, so no counter is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Board { cells }
    }

    /// Parse a board from nine characters (whitespace and `|` are ignored).
    ///
    /// `.`, `-` and `_` are empty cells. `X` and `O` are mapped to sides by
    /// `max`: the letter equal to `max` becomes a Max mark, the other one Min.
    ///
    /// # Errors
    ///
    /// Returns error if the board does not contain exactly nine cells or any
    /// character is not a valid cell.
    pub fn from_string(s: &str, max: Symbol) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = match c {
                '.' | '-' | '_' => Cell::Empty,
                other => match Symbol::from_char(other) {
                    Some(symbol) if symbol == max => Cell::Max,
                    Some(_) => Cell::Min,
                    None => {
                        return Err(crate::Error::InvalidCellCharacter {
                            character: c,
                            position: i,
                            context: s.to_string(),
                        });
                    }
                },
            };
        }

        Ok(Board { cells })
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get cell at position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Place `side`'s mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OccupiedCell`] and leaves the board untouched if
    /// the cell already holds a mark.
    pub fn place(&mut self, pos: Position, side: Side) -> Result<(), crate::Error> {
        if !self.is_empty(pos) {
            return Err(crate::Error::OccupiedCell {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[pos.index()] = side.to_cell();
        Ok(())
    }

    /// Place a mark that is erased again when the returned guard drops.
    ///
    /// The guard dereferences to the board, so callers can keep working on
    /// the mutated position for the guard's lifetime.
    pub(crate) fn place_scoped(&mut self, pos: Position, side: Side) -> Placement<'_> {
        debug_assert!(self.is_empty(pos), "scoped placement on occupied cell {pos}");
        self.cells[pos.index()] = side.to_cell();
        Placement {
            board: self,
            position: pos,
        }
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        9 - self.empty_count()
    }

    /// Every board reachable by `side` placing one mark, with the move that
    /// produced it. The order is row-major and decides search tie-breaks.
    pub fn successors(&self, side: Side) -> Vec<(Position, Board)> {
        self.empty_positions()
            .into_iter()
            .map(|pos| {
                let mut next = *self;
                next.cells[pos.index()] = side.to_cell();
                (pos, next)
            })
            .collect()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Side> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Check if a side has three in a row
    pub fn has_won(&self, side: Side) -> bool {
        LineAnalyzer::has_won(&self.cells, side)
    }

    /// True when no empty cell remains. Only meaningful once `winner` is `None`.
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_draw()
    }

    /// Static score: +1 if Max has won, -1 if Min has won, 0 otherwise
    pub fn evaluate(&self) -> Score {
        self.winner().map_or(0, Side::sign)
    }

    /// Display grid with `-` for empty cells and the given symbol for Max
    pub fn symbols(&self, max: Symbol) -> [[char; 3]; 3] {
        let mut grid = [['-'; 3]; 3];
        for pos in Position::all() {
            grid[pos.row][pos.col] = match self.get(pos) {
                Cell::Empty => '-',
                Cell::Max => max.to_char(),
                Cell::Min => max.opponent().to_char(),
            };
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Three lines of three characters; Max is drawn as `O` and Min as `X`
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.symbols(Symbol::O).iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}

/// A mark placed by [`Board::place_scoped`]; clears its cell on drop
pub(crate) struct Placement<'a> {
    board: &'a mut Board,
    position: Position,
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.cells[self.position.index()] = Cell::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.empty_count(), 9);
        assert_eq!(board.occupied_count(), 0);
        assert!(!board.is_terminal());
        assert_eq!(board.evaluate(), 0);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut board = Board::new();
        board.place(pos(1, 1), Side::Min).unwrap();

        let before = board;
        let err = board.place(pos(1, 1), Side::Max).unwrap_err();
        assert!(err.to_string().contains("occupied"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(2, 2).is_ok());
        assert!(matches!(
            Position::new(3, 0),
            Err(crate::Error::OutOfRange { row: 3, col: 0 })
        ));
        // A column past the edge must not wrap onto the next row
        assert!(matches!(
            Position::new(0, 3),
            Err(crate::Error::OutOfRange { row: 0, col: 3 })
        ));
        assert_eq!((pos(2, 1).row(), pos(2, 1).col()), (2, 1));
    }

    #[test]
    fn test_position_deserialization_checks_range() {
        let ok: Position = serde_json::from_str(r#"{"row": 1, "col": 2}"#).unwrap();
        assert_eq!(ok, pos(1, 2));
        assert!(serde_json::from_str::<Position>(r#"{"row": 0, "col": 3}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"row": 3, "col": 0}"#).is_err());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!("A1".parse::<Position>().unwrap(), pos(0, 0));
        assert_eq!("b2".parse::<Position>().unwrap(), pos(1, 1));
        assert_eq!(" c3 ".parse::<Position>().unwrap(), pos(2, 2));
        assert_eq!("a3".parse::<Position>().unwrap(), pos(2, 0));

        for bad in ["", "a", "d1", "a4", "a0", "1a", "a12"] {
            assert!(bad.parse::<Position>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_position_display_matches_parsing() {
        for p in Position::all() {
            assert_eq!(p.to_string().parse::<Position>().unwrap(), p);
        }
        assert_eq!(pos(1, 1).to_string(), "B2");
    }

    #[test]
    fn test_successors_row_major() {
        let board = Board::from_string("O.X .X. ...", Symbol::O).unwrap();
        let successors = board.successors(Side::Max);

        let moves: Vec<Position> = successors.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            moves,
            vec![pos(0, 1), pos(1, 0), pos(1, 2), pos(2, 0), pos(2, 1), pos(2, 2)]
        );

        for (p, next) in &successors {
            assert_eq!(next.get(*p), Cell::Max);
            assert_eq!(next.occupied_count(), board.occupied_count() + 1);
        }
        // Successors are copies; the source board is untouched
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn test_win_detection() {
        let row = Board::from_string("XXX OO. ...", Symbol::O).unwrap();
        assert_eq!(row.winner(), Some(Side::Min));
        assert_eq!(row.evaluate(), -1);

        let column = Board::from_string("OX. OX. O..", Symbol::O).unwrap();
        assert_eq!(column.winner(), Some(Side::Max));
        assert_eq!(column.evaluate(), 1);

        let diagonal = Board::from_string("X.O .XO ..X", Symbol::O).unwrap();
        assert_eq!(diagonal.winner(), Some(Side::Min));
        assert!(diagonal.is_terminal());
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_string("XOX XOO OXX", Symbol::O).unwrap();
        assert_eq!(board.winner(), None);
        assert!(board.is_draw());
        assert!(board.is_terminal());
        assert_eq!(board.evaluate(), 0);
    }

    #[test]
    fn test_from_string_errors() {
        assert!(matches!(
            Board::from_string("XO", Symbol::O),
            Err(crate::Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            Board::from_string("XOZ......", Symbol::O),
            Err(crate::Error::InvalidCellCharacter { position: 2, .. })
        ));
    }

    #[test]
    fn test_symbol_mapping() {
        let board = Board::from_string("X.. .O. ...", Symbol::X).unwrap();
        assert_eq!(board.get(pos(0, 0)), Cell::Max);
        assert_eq!(board.get(pos(1, 1)), Cell::Min);

        let grid = board.symbols(Symbol::X);
        assert_eq!(grid[0], ['X', '-', '-']);
        assert_eq!(grid[1], ['-', 'O', '-']);
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XO. ... ..O", Symbol::O).unwrap();
        assert_eq!(board.to_string(), "XO-\n---\n--O");
    }

    #[test]
    fn test_scoped_placement_clears_on_drop() {
        let mut board = Board::new();
        {
            let guard = board.place_scoped(pos(0, 2), Side::Max);
            assert_eq!(guard.get(pos(0, 2)), Cell::Max);
            assert_eq!(guard.occupied_count(), 1);
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_symbol_parsing() {
        assert_eq!("x".parse::<Symbol>().unwrap(), Symbol::X);
        assert_eq!(" O ".parse::<Symbol>().unwrap(), Symbol::O);
        assert!("xo".parse::<Symbol>().is_err());
        assert!("".parse::<Symbol>().is_err());
        assert!("0".parse::<Symbol>().is_err());
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert!(matches!(
            Board::from_string("0........", Symbol::O),
            Err(crate::Error::InvalidCellCharacter { character: '0', .. })
        ));
    }
}
