//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static MUSIC: Emoji<'_, '_> = Emoji("🎵 ", "");
pub static WAVE: Emoji<'_, '_> = Emoji("〰️  ", "");

/// Print the run configuration card
pub fn print_config(input: &Path, output: &Path, force: bool, format: &str) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!();
    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  convert2wav").cyan().bold(),
        " ".repeat(box_width - 17)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(input, 38)
    );
    println!(
        "    │  {} Output: {:<39}│",
        SAVE,
        truncate_path(output, 38)
    );
    println!(
        "    │  {} Format: {:<39}│",
        WAVE,
        truncate_string(format, 38)
    );
    println!(
        "    │  {} Overwrite: {:<36}│",
        INFO,
        if force { "always" } else { "ask" }
    );
    println!("    └{}┘", line);
    println!();
}

/// Print the input file about to be processed
pub fn print_job(input: &Path) {
    println!("    {} {}", MUSIC, style(input.display()).white());
}

/// Print a file left untouched at the operator's request
pub fn print_skip(output: &Path) {
    println!(
        "      {} {}",
        style("↷").yellow(),
        style(format!("Kept existing {}", output.display())).dim()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a non-fatal problem
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Print a fatal error
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Conversion complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let tail: Vec<char> = s.chars().rev().take(max_len - 3).collect();
        format!("...{}", tail.into_iter().rev().collect::<String>())
    }
}
