//! Perfect-play tic-tac-toe
//!
//! This crate provides:
//! - The 3x3 board model with win/draw detection
//! - An exhaustive minimax search that never loses
//! - Optional capture of the full decision tree explored for a move, with
//!   best-move annotation for visualization
//! - A game controller pairing a human with the AI
//! - DOT/Graphviz, JSON and CSV rendering of captured trees
//! - The `ttt` command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod search;
pub mod tictactoe;
pub mod tree;

pub use config::{GameConfig, RenderFormat};
pub use error::{Error, Result};
pub use search::{Minimax, SearchResult, SearchStats};
pub use tree::{Category, DecisionNode, NodeId, TreeVisitor};
