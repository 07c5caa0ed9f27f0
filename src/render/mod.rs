//! Rendering and export of captured decision trees
//!
//! Every output walks the tree once through [`crate::tree::TreeVisitor`]:
//! DOT source, Graphviz images (PDF/SVG/PNG), nested JSON or a flat CSV table.

mod dot;
mod export;
mod graphviz;

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use log::{info, warn};

pub use dot::{DotRenderer, board_label};
pub use export::{NodeRecord, RecordCollector, board_code, write_csv, write_json};
pub use graphviz::Graphviz;

use crate::{Result, config::RenderFormat, tictactoe::Symbol, tree::DecisionNode};

/// File name for the tree captured on the AI's `move_number`-th move
pub fn tree_file_name(move_number: usize, format: RenderFormat) -> String {
    format!("move-{move_number}.{}", format.extension())
}

/// Write `tree` to `path` in `format` and return the path actually written.
///
/// Image formats need Graphviz; when `dot` cannot be found the DOT source is
/// written next to the requested path (with a `.dot` extension) instead.
pub fn write_tree(
    tree: &DecisionNode,
    format: RenderFormat,
    max: Symbol,
    path: &Path,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| crate::Error::Io {
            operation: format!("create directory {}", parent.display()),
            source,
        })?;
    }

    let written = match format {
        RenderFormat::Dot => {
            write_dot(tree, max, path)?;
            path.to_path_buf()
        }
        RenderFormat::Json => {
            write_json(tree, BufWriter::new(create_file(path)?))?;
            path.to_path_buf()
        }
        RenderFormat::Csv => {
            write_csv(tree, max, BufWriter::new(create_file(path)?))?;
            path.to_path_buf()
        }
        RenderFormat::Pdf | RenderFormat::Svg | RenderFormat::Png => match Graphviz::detect() {
            Some(graphviz) => {
                let source = DotRenderer::render(tree, max)?;
                graphviz.render(&source, format, path)?;
                path.to_path_buf()
            }
            None => {
                let fallback = path.with_extension(RenderFormat::Dot.extension());
                warn!(
                    "Graphviz '{}' not found; writing DOT source to {} instead of {format}",
                    Graphviz::DEFAULT_PROGRAM,
                    fallback.display()
                );
                write_dot(tree, max, &fallback)?;
                fallback
            }
        },
    };

    info!(
        "wrote decision tree ({} nodes) to {}",
        tree.node_count(),
        written.display()
    );
    Ok(written)
}

fn write_dot(tree: &DecisionNode, max: Symbol, path: &Path) -> Result<()> {
    let source = DotRenderer::render(tree, max)?;
    fs::write(path, source).map_err(|source| crate::Error::Io {
        operation: format!("write {}", path.display()),
        source,
    })
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| crate::Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })
}
