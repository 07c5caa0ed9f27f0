//! CLI infrastructure for the `ttt` binary
//!
//! This module provides the interactive game loop and the one-shot `solve`
//! and `evaluate` commands.

pub mod commands;
pub mod output;
