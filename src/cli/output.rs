//! Output formatting and progress bars for CLI

use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar counting games
pub fn create_game_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .map_err(|e| anyhow!("invalid progress bar template: {e}"))?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Board with column letters on top and row numbers on the left:
///
/// ```text
///   a   b   c
/// 1 X | - | O
/// 2 - | X | -
/// 3 - | - | -
/// ```
pub fn format_grid(grid: &[[char; 3]; 3]) -> String {
    let mut out = String::from("  a   b   c\n");
    for (i, row) in grid.iter().enumerate() {
        out.push_str(&format!("{} {} | {} | {}\n", i + 1, row[0], row[1], row[2]));
    }
    out
}
