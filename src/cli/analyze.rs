use std::path::PathBuf;

use crate::analysis::extract_sections;
use crate::config;
use crate::display;
use crate::error::Result;

/// Extract and display the sections of a business analysis
pub fn run(input: Option<PathBuf>, json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let text = super::read_input(input.as_deref())?;
    let sections = extract_sections(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    let config = config::load_or_default(&config::resolve_path(config_path))?;
    display::print_analysis(&sections, &text, config.display.color);

    Ok(())
}
