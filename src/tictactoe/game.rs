//! Live game management: the human/AI role assignment and the board they share

use log::debug;
use serde::{Deserialize, Serialize};

use super::board::{Board, Position, Score, Side, Symbol};
use crate::{
    GameConfig,
    search::{Minimax, SearchStats, capture_allowed},
    tree::DecisionNode,
};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub side: Side,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Side),
    Draw,
}

impl GameOutcome {
    /// Outcome of `board`, or `None` while the game is still running
    pub fn of(board: &Board) -> Option<Self> {
        match board.winner() {
            Some(side) => Some(GameOutcome::Win(side)),
            None if board.is_draw() => Some(GameOutcome::Draw),
            None => None,
        }
    }

    pub fn score(self) -> Score {
        match self {
            GameOutcome::Win(side) => side.sign(),
            GameOutcome::Draw => 0,
        }
    }
}

/// Result of one AI turn
#[derive(Debug, Clone)]
pub struct AiTurn {
    pub position: Position,
    pub score: Score,
    pub stats: SearchStats,
    /// Present when the board was small enough to record the search
    pub tree: Option<DecisionNode>,
}

/// A running game between a human (Min) and the AI (Max).
///
/// The live board is mutated in place by every move. The AI's search works
/// directly on it and restores it before the chosen move is applied.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    config: GameConfig,
    moves: Vec<Move>,
}

impl Game {
    /// Create a game where the human plays `human`
    pub fn new(human: Symbol) -> Self {
        Self::with_config(GameConfig::new(human))
    }

    pub fn with_config(config: GameConfig) -> Self {
        Game {
            board: Board::new(),
            config,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn human_symbol(&self) -> Symbol {
        self.config.human
    }

    pub fn ai_symbol(&self) -> Symbol {
        self.config.ai_symbol()
    }

    /// Display grid: `-` for empty cells, otherwise the owner's symbol
    pub fn display(&self) -> [[char; 3]; 3] {
        self.board.symbols(self.ai_symbol())
    }

    /// Place `side`'s mark at `position` and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OccupiedCell`] if the cell is taken and
    /// [`crate::Error::GameOver`] if the game already ended. The board is left
    /// unchanged in both cases.
    pub fn apply_move(&mut self, side: Side, position: Position) -> Result<Board, crate::Error> {
        if self.is_over() {
            return Err(crate::Error::GameOver);
        }
        self.board.place(position, side)?;
        self.moves.push(Move { position, side });
        Ok(self.board)
    }

    /// Place the human's mark
    pub fn apply_human_move(&mut self, position: Position) -> Result<Board, crate::Error> {
        self.apply_move(Side::Min, position)
    }

    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        GameOutcome::of(&self.board)
    }

    /// Score of the live board from the AI's point of view
    pub fn evaluate_outcome(&self) -> Score {
        self.board.evaluate()
    }

    /// Whether a decision tree would be recorded for the next AI move
    pub fn will_capture_tree(&self) -> bool {
        self.config.capture_trees
            && capture_allowed(self.board.empty_count(), self.config.tree_threshold)
    }

    /// Search the live board and play the best move for the AI.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] if the game already ended.
    pub fn ai_move(&mut self) -> Result<AiTurn, crate::Error> {
        if self.is_over() {
            return Err(crate::Error::GameOver);
        }

        let mut engine = Minimax::new();
        let (result, tree) = if self.will_capture_tree() {
            let (result, tree) = engine.best_move_with_tree(&mut self.board);
            (result, Some(tree))
        } else {
            (engine.best_move(&mut self.board), None)
        };

        let position = result.action.ok_or(crate::Error::GameOver)?;
        let stats = engine.stats();
        debug!(
            "AI plays {position} (score {}, {} nodes searched, tree {})",
            result.score,
            stats.nodes,
            if tree.is_some() { "captured" } else { "skipped" }
        );

        self.apply_move(Side::Max, position)?;

        Ok(AiTurn {
            position,
            score: result.score,
            stats,
            tree,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_symbols_are_assigned() {
        let game = Game::new(Symbol::O);
        assert_eq!(game.human_symbol(), Symbol::O);
        assert_eq!(game.ai_symbol(), Symbol::X);
    }

    #[test]
    fn test_occupied_cell_leaves_board_unchanged() {
        let mut game = Game::new(Symbol::X);
        game.apply_human_move(pos(1, 1)).unwrap();
        let before = *game.board();

        let err = game.apply_move(Side::Max, pos(1, 1)).unwrap_err();
        assert!(matches!(err, crate::Error::OccupiedCell { row: 1, col: 1 }));
        assert_eq!(*game.board(), before);
        assert_eq!(game.moves().len(), 1);
    }

    #[test]
    fn test_display_uses_player_symbols() {
        let mut game = Game::new(Symbol::X);
        game.apply_human_move(pos(0, 0)).unwrap();
        game.apply_move(Side::Max, pos(2, 2)).unwrap();

        let grid = game.display();
        assert_eq!(grid[0], ['X', '-', '-']);
        assert_eq!(grid[2], ['-', '-', 'O']);
    }

    #[test]
    fn test_ai_replies_to_center_with_corner() {
        let mut game = Game::new(Symbol::X);
        game.apply_human_move(pos(1, 1)).unwrap();

        // Eight empty cells exceed the tree threshold
        assert!(!game.will_capture_tree());
        let turn = game.ai_move().unwrap();
        assert!(turn.position.is_corner());
        assert_eq!(turn.score, 0);
        assert!(turn.tree.is_none());
        assert_eq!(game.board().get(turn.position).side(), Some(Side::Max));
    }

    #[test]
    fn test_ai_move_after_game_over_fails() {
        let mut game = Game::new(Symbol::X);
        for col in 0..3 {
            game.apply_human_move(pos(0, col)).unwrap();
        }
        assert!(game.is_over());
        assert_eq!(game.outcome(), Some(GameOutcome::Win(Side::Min)));
        assert_eq!(game.evaluate_outcome(), -1);
        assert!(matches!(game.ai_move(), Err(crate::Error::GameOver)));
    }

    #[test]
    fn test_tree_captured_once_board_is_small() {
        let config = GameConfig::new(Symbol::X);
        let mut game = Game::with_config(config);
        game.apply_human_move(pos(1, 1)).unwrap();
        game.apply_move(Side::Max, pos(0, 0)).unwrap();
        game.apply_human_move(pos(0, 2)).unwrap();

        // Six empty cells: 6! = 720 orderings
        assert!(game.will_capture_tree());
        let turn = game.ai_move().unwrap();
        let tree = turn.tree.expect("tree should be captured");
        assert_eq!(tree.value(), Some(turn.score));
        assert_eq!(tree.children().len(), 6);
    }

    #[test]
    fn test_capture_can_be_disabled() {
        let config = GameConfig::new(Symbol::X).with_capture_trees(false);
        let mut game = Game::with_config(config);
        game.apply_human_move(pos(1, 1)).unwrap();
        game.apply_move(Side::Max, pos(0, 0)).unwrap();
        game.apply_human_move(pos(0, 2)).unwrap();

        assert!(!game.will_capture_tree());
        assert!(game.ai_move().unwrap().tree.is_none());
    }
}
