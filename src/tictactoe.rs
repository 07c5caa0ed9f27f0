//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Position, Score, Side, Symbol};
pub use game::{AiTurn, Game, GameOutcome, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
