//! Output formatting for the human-facing `cache` commands.
//!
//! The status line itself never goes through here: it is written raw so tmux or the
//! terminal can interpret its colour markup.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors and failures, green for success, bright_black for details
//! - **Standardized spacing**: Newline before each message block

use chrono::TimeDelta;
use colored::*;

/// Formats and prints an error message to stderr
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Marker for a remote sync outcome
pub fn sync_marker(success: bool) -> ColoredString {
    if success {
        "✓".green()
    } else {
        "✕".red()
    }
}

/// Compact age such as `42s`, `7m`, `3h` or `2d`
pub fn format_age(age: TimeDelta) -> String {
    let secs = age.num_seconds().max(0);
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}
