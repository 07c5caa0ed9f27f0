//! End-to-end games through the controller and the console session

mod common;

use std::io::Cursor;

use common::pos;
use ttt_minimax::{
    GameConfig, Minimax, RenderFormat,
    cli::commands::{evaluate::play_random_games, play::run_session},
    tictactoe::{Game, GameOutcome, Side, Symbol},
};

/// Best move for the human (Min) on the live board, without touching it
fn best_human_move(game: &Game) -> ttt_minimax::tictactoe::Position {
    let mut scratch = *game.board();
    let depth = scratch.empty_count();
    Minimax::new()
        .search(&mut scratch, depth, Side::Min, None)
        .action
        .expect("non-terminal board has a move")
}

#[test]
fn center_opening_is_answered_with_a_corner_and_perfect_play_draws() {
    let mut game = Game::new(Symbol::X);
    assert_eq!(game.ai_symbol(), Symbol::O);

    game.apply_human_move(pos(1, 1)).unwrap();
    let reply = game.ai_move().unwrap();
    assert!(reply.position.is_corner(), "AI answered {}", reply.position);
    assert_eq!(reply.score, 0);

    while !game.is_over() {
        let human = best_human_move(&game);
        game.apply_human_move(human).unwrap();
        if game.is_over() {
            break;
        }
        let turn = game.ai_move().unwrap();
        assert_eq!(turn.score, 0);
    }

    assert_eq!(game.outcome(), Some(GameOutcome::Draw));
    assert_eq!(game.evaluate_outcome(), 0);
    assert_eq!(game.moves().len(), 9);
}

#[test]
fn ai_never_loses_to_first_empty_cell_player() {
    let mut game = Game::new(Symbol::O);
    game.apply_human_move(pos(0, 1)).unwrap();
    game.ai_move().unwrap();
    while !game.is_over() {
        let empty = game.board().empty_positions();
        game.apply_human_move(empty[0]).unwrap();
        if !game.is_over() {
            game.ai_move().unwrap();
        }
    }
    assert_ne!(game.outcome(), Some(GameOutcome::Win(Side::Min)));
}

#[test]
fn console_session_reprompts_and_finishes() {
    let config = GameConfig::new(Symbol::X).with_capture_trees(false);
    let game = Game::with_config(config);

    // Invalid text, then an occupied cell, then legal moves until the game ends
    let script = "z9\nb2\nb2\na1\na2\na3\nb1\nb3\nc1\nc2\nc3\n";
    let mut input = Cursor::new(script);
    let mut output = Vec::new();

    let outcome = run_session(game, &mut input, &mut output).unwrap();
    let transcript = String::from_utf8(output).unwrap();

    assert!(transcript.contains("Please enter a valid move"));
    assert!(transcript.contains("That space is already taken."));
    assert!(transcript.contains("  a   b   c"));
    assert!(transcript.contains("AI (O) plays"));
    assert_ne!(outcome, GameOutcome::Win(Side::Min));
    let expected = match outcome {
        GameOutcome::Win(_) => "You Lost!",
        GameOutcome::Draw => "It's a draw!",
    };
    assert!(transcript.trim_end().ends_with(expected));
}

#[test]
fn console_session_writes_tree_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::new(Symbol::X)
        .with_output_dir(dir.path())
        .with_format(RenderFormat::Dot);
    let game = Game::with_config(config);

    let script = "b2\na1\na2\na3\nb1\nb3\nc1\nc2\nc3\n";
    let mut input = Cursor::new(script);
    let mut output = Vec::new();
    run_session(game, &mut input, &mut output).unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Decision tree"));

    // The first AI move (8 empty cells) is too large to record; later ones are not
    assert!(!dir.path().join("move-1.dot").exists());
    let second = std::fs::read_to_string(dir.path().join("move-2.dot")).unwrap();
    assert!(second.starts_with("digraph decision_tree {"));
    assert!(second.contains("shape=circle"));
}

#[test]
fn ai_first_session_opens_with_a_move() {
    let config = GameConfig::new(Symbol::O)
        .with_ai_first(true)
        .with_capture_trees(false);
    let game = Game::with_config(config);

    let script = "a1\na2\na3\nb1\nb2\nb3\nc1\nc2\nc3\n";
    let mut input = Cursor::new(script);
    let mut output = Vec::new();
    let outcome = run_session(game, &mut input, &mut output).unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.starts_with("\nAI (X) plays A1"));
    assert_ne!(outcome, GameOutcome::Win(Side::Min));
}

#[test]
fn random_opponent_never_beats_the_ai() {
    let summary = play_random_games(30, Some(7), false, None).unwrap();
    assert_eq!(summary.games, 30);
    assert_eq!(summary.ai_losses, 0);
    assert_eq!(summary.ai_wins + summary.draws, 30);
}
