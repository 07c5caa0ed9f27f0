//! ttt - play perfect tic-tac-toe and inspect the AI's decision trees

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "ttt")]
#[command(version, about = "Perfect-play tic-tac-toe with decision-tree capture", long_about = None)]
struct Cli {
    /// Log search statistics (repeat for more detail); RUST_LOG overrides
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the AI
    Play(ttt_minimax::cli::commands::play::PlayArgs),

    /// Compute the best move for a single position
    Solve(ttt_minimax::cli::commands::solve::SolveArgs),

    /// Play the AI against a random opponent
    Evaluate(ttt_minimax::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Play(args) => ttt_minimax::cli::commands::play::execute(args),
        Commands::Solve(args) => ttt_minimax::cli::commands::solve::execute(args),
        Commands::Evaluate(args) => ttt_minimax::cli::commands::evaluate::execute(args),
    }
}
