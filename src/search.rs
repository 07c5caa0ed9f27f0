//! Exhaustive minimax search
//!
//! The search walks every line of play below the given board. It mutates the
//! board in place (place a mark, recurse, erase it) instead of copying a board
//! per frame; each placement is held by a guard that erases the mark when the
//! branch returns, so the caller always gets its board back unchanged.
//!
//! Ties are broken towards the first move in row-major order: a child only
//! replaces the running best when it is strictly better for the side to move.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    tictactoe::{Board, Position, Score, Side},
    tree::DecisionNode,
};

/// Largest `empty_cells!` for which a visualization tree is captured (6!)
pub const DEFAULT_TREE_THRESHOLD: u64 = 720;

/// Outcome of a search: the chosen move and its minimax score.
///
/// `action` is `None` when no move applies, i.e. the board is terminal or the
/// depth limit was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub action: Option<Position>,
    pub score: Score,
}

/// Counters collected during one or more searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Every board visited, including the root
    pub nodes: u64,
    /// Boards where the recursion stopped (terminal or depth limit)
    pub leaves: u64,
}

/// Minimax engine
#[derive(Debug, Default)]
pub struct Minimax {
    stats: SearchStats,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `depth` plies below `board` with `side` to move.
    ///
    /// When `capture` is given, one child node per explored move is appended
    /// to it (recursively), each carrying its resolved value. Capturing does not
    /// influence the result.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: usize,
        side: Side,
        mut capture: Option<&mut DecisionNode>,
    ) -> SearchResult {
        self.stats.nodes += 1;

        if depth == 0 || board.is_terminal() {
            self.stats.leaves += 1;
            return SearchResult {
                action: None,
                score: board.evaluate(),
            };
        }

        let mut best: Option<SearchResult> = None;

        // Same row-major order as `Board::successors`
        for pos in board.empty_positions() {
            let mut placed = board.place_scoped(pos, side);
            let score = match capture.as_deref_mut() {
                Some(parent) => {
                    let mut child = DecisionNode::new(*placed, Some(pos), side.opponent());
                    let result =
                        self.search(&mut placed, depth - 1, side.opponent(), Some(&mut child));
                    child.set_value(result.score);
                    parent.push_child(child);
                    result.score
                }
                None => {
                    self.search(&mut placed, depth - 1, side.opponent(), None)
                        .score
                }
            };
            drop(placed);

            if improves(side, score, best) {
                best = Some(SearchResult {
                    action: Some(pos),
                    score,
                });
            }
        }

        // A non-terminal board always has an empty cell
        best.unwrap_or_else(|| SearchResult {
            action: None,
            score: board.evaluate(),
        })
    }

    /// Full-depth search for the AI, which always plays the maximizing side
    pub fn best_move(&mut self, board: &mut Board) -> SearchResult {
        let depth = board.empty_count();
        self.search(board, depth, Side::Max, None)
    }

    /// Full-depth search for the AI that also records the explored tree.
    ///
    /// The returned root carries the search score and has its best-move
    /// annotation applied.
    pub fn best_move_with_tree(&mut self, board: &mut Board) -> (SearchResult, DecisionNode) {
        let depth = board.empty_count();
        let mut root = DecisionNode::root(*board);
        let result = self.search(board, depth, Side::Max, Some(&mut root));
        root.set_value(result.score);
        root.mark_best();

        debug!(
            "captured decision tree with {} nodes for {} empty cells",
            root.node_count(),
            depth
        );

        (result, root)
    }
}

fn improves(side: Side, score: Score, best: Option<SearchResult>) -> bool {
    match best {
        None => true,
        Some(current) => match side {
            Side::Max => score > current.score,
            Side::Min => score < current.score,
        },
    }
}

/// Number of move orderings below a board with `empty_cells` free cells
pub fn orderings(empty_cells: usize) -> u64 {
    (1..=empty_cells as u64).product()
}

/// Whether a visualization tree should be built for a board with
/// `empty_cells` free cells. The numeric search runs either way.
pub fn capture_allowed(empty_cells: usize, threshold: u64) -> bool {
    orderings(empty_cells) <= threshold
}

/// Convenience wrapper: best move for Max on a copy of `board`
pub fn solve(board: &Board) -> SearchResult {
    let mut scratch = *board;
    Minimax::new().best_move(&mut scratch)
}
