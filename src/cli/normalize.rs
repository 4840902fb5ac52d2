use std::path::PathBuf;

use crate::error::Result;
use crate::markdown;

/// Print normalized markdown
pub fn run(input: Option<PathBuf>) -> Result<()> {
    let text = super::read_input(input.as_deref())?;
    let normalized = markdown::normalize(&text);
    if !normalized.is_empty() {
        println!("{}", normalized);
    }
    Ok(())
}
