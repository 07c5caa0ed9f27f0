//! Graphviz DOT rendering of decision trees

use crate::{
    Result,
    tictactoe::{Board, Symbol},
    tree::{DecisionNode, NodeId, TreeVisitor},
};

const BEST_EDGE_STYLE: &str = ", style=bold, color=\"#0000FF\", fontcolor=\"#0000FF\"";

/// Builds a `digraph` from one tree traversal.
///
/// Leaves are circles and internal nodes boxes, both filled with the node's
/// category color. Edges carry `(row, col) value` with 1-based coordinates;
/// edges into best children are drawn bold and blue.
pub struct DotRenderer {
    max: Symbol,
    out: String,
}

impl DotRenderer {
    /// `max` is the symbol drawn for the maximizing side's marks
    pub fn new(max: Symbol) -> Self {
        let mut out = String::from("digraph decision_tree {\n");
        out.push_str("    node [style=filled, fontname=\"Courier\"];\n");
        DotRenderer { max, out }
    }

    pub fn finish(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }

    /// Render a whole tree to DOT source
    pub fn render(tree: &DecisionNode, max: Symbol) -> Result<String> {
        let mut renderer = DotRenderer::new(max);
        tree.walk(&mut renderer)?;
        Ok(renderer.finish())
    }
}

/// Board rows separated by DOT line breaks
pub fn board_label(board: &Board, max: Symbol) -> String {
    board
        .symbols(max)
        .iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\\n")
}

impl TreeVisitor for DotRenderer {
    fn visit_node(&mut self, id: NodeId, node: &DecisionNode) -> Result<()> {
        let shape = if node.is_leaf() { "circle" } else { "box" };
        self.out.push_str(&format!(
            "    n{id} [label=\"{}\", shape={shape}, fillcolor=\"{}\"];\n",
            board_label(node.state(), self.max),
            node.category().color()
        ));
        Ok(())
    }

    fn visit_edge(&mut self, parent: NodeId, child: NodeId, node: &DecisionNode) -> Result<()> {
        let action = node
            .action()
            .map(|pos| format!("({}, {})", pos.row() + 1, pos.col() + 1))
            .unwrap_or_default();
        let value = node
            .value()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".to_string());
        let style = if node.is_best() { BEST_EDGE_STYLE } else { "" };
        self.out.push_str(&format!(
            "    n{parent} -> n{child} [label=\"{action} {value}\"{style}];\n"
        ));
        Ok(())
    }
}
