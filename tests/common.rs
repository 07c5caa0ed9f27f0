#![allow(dead_code)]

//! Common test utilities for the integration test suite.
//!
//! This module enumerates positions reachable in real play.

use std::collections::HashSet;

use ttt_minimax::tictactoe::{Board, Position, Side, Symbol};

/// Every board reachable from the empty board, with either side opening.
pub fn reachable_boards() -> HashSet<Board> {
    let mut visited = HashSet::new();
    for first in [Side::Max, Side::Min] {
        explore(Board::new(), first, &mut visited);
    }
    visited.into_iter().map(|(board, _)| board).collect()
}

fn explore(board: Board, to_move: Side, visited: &mut HashSet<(Board, Side)>) {
    if !visited.insert((board, to_move)) || board.is_terminal() {
        return;
    }
    for (_, next) in board.successors(to_move) {
        explore(next, to_move.opponent(), visited);
    }
}

/// Parse a board where `O` is the maximizing side
pub fn board(s: &str) -> Board {
    Board::from_string(s, Symbol::O).expect("test board should parse")
}

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).expect("test position should be in range")
}
