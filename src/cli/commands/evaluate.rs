//! Evaluate command - AI against a uniformly random opponent

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::Serialize;

use crate::{
    GameConfig,
    cli::output::{create_game_progress, print_kv, print_section},
    tictactoe::{Game, GameOutcome, Side},
};

#[derive(Parser, Debug)]
#[command(about = "Play the AI against a random opponent")]
pub struct EvaluateArgs {
    /// Number of games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let the AI open every game
    #[arg(long)]
    pub ai_first: bool,

    /// Export the summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Tally of finished games, from the AI's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationSummary {
    pub games: usize,
    pub ai_wins: usize,
    pub draws: usize,
    pub ai_losses: usize,
}

impl EvaluationSummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Win(Side::Max) => self.ai_wins += 1,
            GameOutcome::Win(Side::Min) => self.ai_losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    print_section("Evaluation");
    print_kv("Opponent", "random");
    print_kv("Games", &args.games.to_string());
    print_kv("AI opens", &args.ai_first.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let progress = create_game_progress(args.games as u64)?;
    let summary = play_random_games(args.games, args.seed, args.ai_first, Some(&progress))?;
    progress.finish_with_message("done");

    print_section("Results");
    print_kv("AI wins", &summary.ai_wins.to_string());
    print_kv("Draws", &summary.draws.to_string());
    print_kv("AI losses", &summary.ai_losses.to_string());

    if let Some(path) = args.export {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        println!("\nSummary exported to: {}", path.display());
    }

    Ok(())
}

/// Play `games` games of the AI against an opponent picking uniformly among
/// the empty cells. Trees are never captured.
pub fn play_random_games(
    games: usize,
    seed: Option<u64>,
    ai_first: bool,
    progress: Option<&ProgressBar>,
) -> Result<EvaluationSummary> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let config = GameConfig::default()
        .with_capture_trees(false)
        .with_ai_first(ai_first);

    let mut summary = EvaluationSummary::default();
    for _ in 0..games {
        let mut game = Game::with_config(config.clone());
        let mut ai_to_move = ai_first;

        let outcome = loop {
            if let Some(outcome) = game.outcome() {
                break outcome;
            }
            if ai_to_move {
                game.ai_move()?;
            } else {
                let empty = game.board().empty_positions();
                let position = *empty
                    .choose(&mut rng)
                    .context("non-terminal board without empty cells")?;
                game.apply_human_move(position)?;
            }
            ai_to_move = !ai_to_move;
        };

        summary.record(outcome);
        if let Some(pb) = progress {
            pb.set_message(format!(
                "W {} / D {} / L {}",
                summary.ai_wins, summary.draws, summary.ai_losses
            ));
            pb.inc(1);
        }
    }

    Ok(summary)
}
