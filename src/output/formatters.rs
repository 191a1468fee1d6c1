//! Formatting utilities for terminal output

use crate::core::{Pattern, Tile, Word};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

/// Guess letters on tile-colored backgrounds
#[must_use]
pub fn colored_guess(word: &Word, pattern: Pattern) -> String {
    word.text()
        .to_uppercase()
        .chars()
        .zip(pattern.tiles())
        .map(|(ch, tile)| colored_tile(ch, tile).to_string())
        .collect()
}

fn colored_tile(ch: char, tile: Tile) -> ColoredString {
    let cell = format!(" {ch} ").black().bold();
    match tile {
        Tile::Green => cell.on_green(),
        Tile::Yellow => cell.on_yellow(),
        Tile::Gray => cell.on_bright_black(),
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max).clamp(0.0, 1.0) * width as f64) as usize
    } else {
        0
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Progress bar for long passes, hidden when `visible` is false
#[must_use]
pub fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}
