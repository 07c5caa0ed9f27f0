//! Solve command - best move for a single position

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use super::parse_symbol_token;
use crate::{
    RenderFormat,
    cli::output::{format_grid, print_kv, print_section},
    render,
    search::{DEFAULT_TREE_THRESHOLD, Minimax, capture_allowed, orderings},
    tictactoe::{Board, GameOutcome, Side},
};

#[derive(Parser, Debug)]
#[command(about = "Compute the AI's best move for a position")]
pub struct SolveArgs {
    /// Board as nine cells in row-major order, `.` or `-` for empty (e.g. "X...O....")
    pub board: String,

    /// Symbol the AI plays; the AI is the side to move
    #[arg(long, default_value = "o")]
    pub ai: String,

    /// Export the decision tree; the format follows the extension (dot, pdf, svg, png, json, csv)
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Refuse to export trees with more move orderings than this
    #[arg(long, default_value_t = DEFAULT_TREE_THRESHOLD)]
    pub threshold: u64,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let ai = parse_symbol_token(&args.ai, "--ai")?;
    let mut board = Board::from_string(&args.board, ai)?;

    println!("AI plays {ai}\n");
    print!("{}", format_grid(&board.symbols(ai)));

    if let Some(outcome) = GameOutcome::of(&board) {
        let message = match outcome {
            GameOutcome::Win(Side::Max) => format!("{ai} has already won"),
            GameOutcome::Win(Side::Min) => format!("{} has already won", ai.opponent()),
            GameOutcome::Draw => "The board is full".to_string(),
        };
        println!("\n{message}; nothing to search.");
        return Ok(());
    }

    let mut engine = Minimax::new();
    let (result, tree) = match &args.export {
        Some(path) => {
            let format = RenderFormat::from_path(path)?;
            let empty = board.empty_count();
            if !capture_allowed(empty, args.threshold) {
                bail!(
                    "tree for {empty} empty cells has {} move orderings, above --threshold {}",
                    orderings(empty),
                    args.threshold
                );
            }
            let (result, tree) = engine.best_move_with_tree(&mut board);
            let written = render::write_tree(&tree, format, ai, path)?;
            println!("\nDecision tree written to {}", written.display());
            (result, Some(tree))
        }
        None => (engine.best_move(&mut board), None),
    };

    print_section("Best move");
    if let Some(action) = result.action {
        print_kv("Move", &action.to_string());
    }
    let verdict = match result.score {
        1 => "win",
        -1 => "loss",
        _ => "draw",
    };
    print_kv("Score", &format!("{} ({verdict})", result.score));
    print_kv("Nodes searched", &engine.stats().nodes.to_string());

    if let Some(tree) = tree {
        let line: Vec<String> = tree.best_path().iter().map(|p| p.to_string()).collect();
        print_kv("Principal line", &line.join(" "));
        print_kv("Tree nodes", &tree.node_count().to_string());
    }

    Ok(())
}
