//! JSON and CSV dumps of decision trees

use std::io::Write;

use serde::Serialize;

use crate::{
    Result,
    tictactoe::{Board, Position, Score, Symbol},
    tree::{DecisionNode, NodeId, TreeVisitor},
};

/// One tree node flattened for tabular output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub row: Option<usize>,
    pub col: Option<usize>,
    pub value: Option<Score>,
    pub best: bool,
    pub maximizing: bool,
    pub category: String,
    pub board: String,
}

/// Collects one [`NodeRecord`] per node, indexed by node id
pub struct RecordCollector {
    max: Symbol,
    records: Vec<NodeRecord>,
}

impl RecordCollector {
    pub fn new(max: Symbol) -> Self {
        RecordCollector {
            max,
            records: Vec::new(),
        }
    }

    pub fn collect(tree: &DecisionNode, max: Symbol) -> Result<Vec<NodeRecord>> {
        let mut collector = RecordCollector::new(max);
        tree.walk(&mut collector)?;
        Ok(collector.records)
    }
}

impl TreeVisitor for RecordCollector {
    fn visit_node(&mut self, id: NodeId, node: &DecisionNode) -> Result<()> {
        debug_assert_eq!(id, self.records.len());
        let action = node.action();
        self.records.push(NodeRecord {
            id,
            parent: None,
            row: action.map(Position::row),
            col: action.map(Position::col),
            value: node.value(),
            best: node.is_best(),
            maximizing: node.is_maximizing(),
            category: node.category().to_string(),
            board: board_code(node.state(), self.max),
        });
        Ok(())
    }

    fn visit_edge(&mut self, parent: NodeId, child: NodeId, _node: &DecisionNode) -> Result<()> {
        if let Some(record) = self.records.get_mut(child) {
            record.parent = Some(parent);
        }
        Ok(())
    }
}

/// Nine characters, row-major, `-` for empty cells
pub fn board_code(board: &Board, max: Symbol) -> String {
    board.symbols(max).iter().flatten().collect()
}

/// Write the tree as a flat CSV table, one row per node in pre-order
pub fn write_csv<W: Write>(tree: &DecisionNode, max: Symbol, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in RecordCollector::collect(tree, max)? {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the tree as nested JSON
pub fn write_json<W: Write>(tree: &DecisionNode, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, tree)?;
    Ok(())
}
