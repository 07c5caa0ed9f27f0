//! Play command - interactive game against the AI

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Parser;

use super::parse_symbol_token;
use crate::{
    GameConfig, RenderFormat,
    cli::output::format_grid,
    render,
    tictactoe::{Game, GameOutcome, Position, Side, Symbol},
};

#[derive(Parser, Debug)]
#[command(about = "Play a game against the AI")]
pub struct PlayArgs {
    /// Symbol you play (`x` or `o`); asked interactively when omitted
    #[arg(long, short = 's')]
    pub symbol: Option<String>,

    /// Let the AI make the first move
    #[arg(long)]
    pub ai_first: bool,

    /// Do not record decision trees
    #[arg(long)]
    pub no_trees: bool,

    /// Record a tree only when the remaining move orderings are at most this many
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Directory for rendered decision trees
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Tree format: dot, pdf, svg, png, json, csv
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (config, human) = session_config(&args)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    let human = match human {
        Some(symbol) => symbol,
        None => prompt_symbol(&mut input, &mut output)?,
    };
    let config = config.with_human(human);
    config.validate()?;

    run_session(Game::with_config(config), &mut input, &mut output)?;
    Ok(())
}

/// Merge the config file (if any) with the command-line flags.
///
/// Returns the human's symbol when `--symbol` or the file chose it; `None`
/// means the player still has to be asked.
fn session_config(args: &PlayArgs) -> Result<(GameConfig, Option<Symbol>)> {
    let (mut config, file_human) = match &args.config {
        Some(path) => GameConfig::load_with_human(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => (GameConfig::default(), None),
    };

    if args.ai_first {
        config = config.with_ai_first(true);
    }
    if args.no_trees {
        config = config.with_capture_trees(false);
    }
    if let Some(threshold) = args.threshold {
        config = config.with_tree_threshold(threshold);
    }
    if let Some(dir) = &args.out {
        config = config.with_output_dir(dir.clone());
    }
    if let Some(format) = &args.format {
        config = config.with_format(format.parse::<RenderFormat>()?);
    }

    let human = match &args.symbol {
        Some(token) => Some(parse_symbol_token(token, "--symbol")?),
        None => file_human,
    };
    Ok((config, human))
}

/// Drive one game over the given streams and return its outcome.
///
/// Each AI move whose search was recorded is rendered to the configured
/// output directory as `move-<n>.<ext>`.
pub fn run_session<R: BufRead, W: Write>(
    mut game: Game,
    input: &mut R,
    output: &mut W,
) -> Result<GameOutcome> {
    let mut ai_moves = 0;

    if game.config().ai_first {
        play_ai_turn(&mut game, &mut ai_moves, output)?;
    }

    loop {
        writeln!(output)?;
        write!(output, "{}", format_grid(&game.display()))?;

        if let Some(outcome) = game.outcome() {
            let message = match outcome {
                GameOutcome::Win(Side::Max) => "You Lost!",
                GameOutcome::Win(Side::Min) => "You Won!",
                GameOutcome::Draw => "It's a draw!",
            };
            writeln!(output, "{message}")?;
            return Ok(outcome);
        }

        loop {
            let position = prompt_move(input, output)?;
            match game.apply_human_move(position) {
                Ok(_) => break,
                Err(crate::Error::OccupiedCell { .. }) => {
                    writeln!(output, "That space is already taken.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if !game.is_over() {
            play_ai_turn(&mut game, &mut ai_moves, output)?;
        }
    }
}

fn play_ai_turn<W: Write>(game: &mut Game, ai_moves: &mut usize, output: &mut W) -> Result<()> {
    let turn = game.ai_move()?;
    *ai_moves += 1;
    writeln!(output, "\nAI ({}) plays {}", game.ai_symbol(), turn.position)?;

    if let Some(tree) = turn.tree {
        let config = game.config();
        let path = config
            .output_dir
            .join(render::tree_file_name(*ai_moves, config.format));
        let written = render::write_tree(&tree, config.format, game.ai_symbol(), &path)?;
        writeln!(
            output,
            "Decision tree ({} nodes) written to {}",
            tree.node_count(),
            written.display()
        )?;
    }
    Ok(())
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed before the game finished");
    }
    Ok(line.trim().to_string())
}

fn prompt_symbol<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Symbol> {
    loop {
        write!(output, "Would you like to be X or O | ")?;
        output.flush()?;
        match read_trimmed_line(input)?.parse::<Symbol>() {
            Ok(symbol) => return Ok(symbol),
            Err(_) => writeln!(output, "Please enter X or O")?,
        }
    }
}

fn prompt_move<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Position> {
    loop {
        write!(output, "\nEnter a move: ")?;
        output.flush()?;
        match read_trimmed_line(input)?.parse::<Position>() {
            Ok(position) => return Ok(position),
            Err(_) => writeln!(output, "Please enter a valid move (column a-c, row 1-3, e.g. b2).")?,
        }
    }
}
