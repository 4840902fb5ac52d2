//! TTY detection and color support logic

use std::io::IsTerminal;

use crate::config::ColorChoice;

/// Determine if colors should be used based on the configured choice,
/// the environment and TTY status
pub fn should_use_colors(choice: ColorChoice) -> bool {
    // NO_COLOR always wins (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    match choice {
        ColorChoice::Always => return true,
        ColorChoice::Never => return false,
        ColorChoice::Auto => {}
    }

    // CLICOLOR_FORCE enables colors even when piped
    if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if val != "0" {
            return true;
        }
    }

    if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
