//! Terminal display module
//!
//! Handles rich terminal output with automatic TTY detection.

mod formatter;
mod terminal;

pub use formatter::{analysis_markdown, print_analysis, print_markdown, FALLBACK_NOTICE};
pub use terminal::should_use_colors;
