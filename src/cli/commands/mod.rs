//! Subcommands of the `ttt` binary

pub mod evaluate;
pub mod play;
pub mod solve;

use anyhow::{Context, Result};

use crate::tictactoe::Symbol;

/// Parse an `x`/`o` command-line token, naming the flag in the error
pub fn parse_symbol_token(value: &str, flag: &str) -> Result<Symbol> {
    value
        .parse::<Symbol>()
        .with_context(|| format!("invalid value for {flag}"))
}
