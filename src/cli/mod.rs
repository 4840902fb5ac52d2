//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - config init / show: Manage the settings file
//! - normalize: Repair AI-generated markdown
//! - analyze: Split a business analysis into its sections
//! - render: Produce styled HTML for one markdown field
//! - export: Write a blueprint document for print or Word

pub mod analyze;
pub mod config;
pub mod export;
pub mod normalize;
pub mod render;

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{ArchitectError, Result};

/// Read a text argument from a file, or from stdin when no path is given
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            ArchitectError::Input(format!("Cannot read '{}': {}", path.display(), e))
        }),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
