//! Decision tree recorded during a capturing search
//!
//! A tree is built once by [`crate::search::Minimax::best_move_with_tree`],
//! annotated with [`DecisionNode::mark_best`], handed to a renderer that walks
//! it once through [`TreeVisitor`], and then dropped.

use std::fmt;

use serde::Serialize;

use crate::{
    Result,
    tictactoe::{Board, Position, Score, Side},
};

/// Dense pre-order node number assigned during [`DecisionNode::walk`]
pub type NodeId = usize;

/// Terminal classification of a node's board, used for fill colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    MaxWin,
    MinWin,
    Draw,
    InProgress,
}

impl Category {
    pub fn of(board: &Board) -> Self {
        match board.winner() {
            Some(Side::Max) => Category::MaxWin,
            Some(Side::Min) => Category::MinWin,
            None if board.is_draw() => Category::Draw,
            None => Category::InProgress,
        }
    }

    /// Fill color expected by the renderer
    pub fn color(self) -> &'static str {
        match self {
            Category::MaxWin => "#00AA00",
            Category::MinWin => "#AA0000",
            Category::Draw => "#AAAAAA",
            Category::InProgress => "#EEEEEE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::MaxWin => "max-win",
            Category::MinWin => "min-win",
            Category::Draw => "draw",
            Category::InProgress => "in-progress",
        };
        f.write_str(label)
    }
}

/// One board visited by the search
#[derive(Debug, Clone, Serialize)]
pub struct DecisionNode {
    state: Board,
    action: Option<Position>,
    value: Option<Score>,
    maximizing: bool,
    best: bool,
    category: Category,
    children: Vec<DecisionNode>,
}

impl DecisionNode {
    /// Snapshot `state`, reached by `action`, with `to_move` next to play
    pub fn new(state: Board, action: Option<Position>, to_move: Side) -> Self {
        DecisionNode {
            category: Category::of(&state),
            state,
            action,
            value: None,
            maximizing: to_move.is_maximizing(),
            best: false,
            children: Vec::new(),
        }
    }

    /// Root of an AI search: no action, Max to move
    pub fn root(state: Board) -> Self {
        Self::new(state, None, Side::Max)
    }

    pub fn state(&self) -> &Board {
        &self.state
    }

    pub fn action(&self) -> Option<Position> {
        self.action
    }

    /// Propagated minimax value; `None` until the subtree was evaluated
    pub fn value(&self) -> Option<Score> {
        self.value
    }

    pub fn is_maximizing(&self) -> bool {
        self.maximizing
    }

    /// Whether this node realizes its parent's value
    pub fn is_best(&self) -> bool {
        self.best
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn children(&self) -> &[DecisionNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn set_value(&mut self, value: Score) {
        self.value = Some(value);
    }

    pub(crate) fn push_child(&mut self, child: DecisionNode) {
        self.children.push(child);
    }

    /// Best child value for the side to move here
    pub fn optimal_value(&self) -> Option<Score> {
        let values = self.children.iter().filter_map(|child| child.value);
        if self.maximizing {
            values.max()
        } else {
            values.min()
        }
    }

    /// Whether the child reached by `action` is among this node's
    /// value-optimal children. Ties all count as optimal.
    pub fn is_optimal_action(&self, action: Position) -> bool {
        let Some(optimal) = self.optimal_value() else {
            return false;
        };
        self.children
            .iter()
            .any(|child| child.action == Some(action) && child.value == Some(optimal))
    }

    /// Mark every child that realizes its parent's value, across the whole
    /// subtree. More than one child per node may be marked.
    pub fn mark_best(&mut self) {
        for child in &mut self.children {
            child.mark_best();
        }

        let optimal = self.optimal_value();
        for child in &mut self.children {
            child.best = optimal.is_some() && child.value == optimal;
        }
    }

    /// Depth-first pre-order traversal: every node is visited before its
    /// children, and every edge after its child's subtree.
    pub fn walk<V: TreeVisitor + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        let mut next_id = 0;
        self.walk_from(0, &mut next_id, visitor)
    }

    fn walk_from<V: TreeVisitor + ?Sized>(
        &self,
        id: NodeId,
        next_id: &mut NodeId,
        visitor: &mut V,
    ) -> Result<()> {
        visitor.visit_node(id, self)?;
        for child in &self.children {
            *next_id += 1;
            let child_id = *next_id;
            child.walk_from(child_id, next_id, visitor)?;
            visitor.visit_edge(id, child_id, child)?;
        }
        Ok(())
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Longest root-to-leaf path length in edges
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Moves along the first marked child at every level
    pub fn best_path(&self) -> Vec<Position> {
        let mut path = Vec::new();
        let mut node = self;
        while let Some(child) = node.children.iter().find(|child| child.best) {
            if let Some(action) = child.action {
                path.push(action);
            }
            node = child;
        }
        path
    }
}

/// Consumer of a tree traversal (renderers, exporters)
pub trait TreeVisitor {
    fn visit_node(&mut self, id: NodeId, node: &DecisionNode) -> Result<()>;

    /// Called once per parent -> child link, after the child's subtree
    fn visit_edge(&mut self, parent: NodeId, child: NodeId, node: &DecisionNode) -> Result<()>;
}
