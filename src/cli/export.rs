use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::extract_sections;
use crate::config;
use crate::error::{ArchitectError, Result};
use crate::export::{self, ExportFormat};
use crate::models::{Idea, IdeaSet};

/// Assemble and write a blueprint document
pub fn run(
    ideas_path: PathBuf,
    analysis_path: Option<PathBuf>,
    select: Option<String>,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let config = config::load_or_default(&config::resolve_path(config_path))?;
    let format = format.unwrap_or(config.export.format);

    let payload = fs::read_to_string(&ideas_path).map_err(|e| {
        ArchitectError::Input(format!("Cannot read '{}': {}", ideas_path.display(), e))
    })?;
    let ideas = IdeaSet::from_json(&payload)?.into_vec();
    let idea = select_idea(&ideas, select.as_deref())?;

    let sections = match analysis_path {
        Some(path) => Some(extract_sections(&super::read_input(Some(&path))?)),
        None => None,
    };
    if sections.as_ref().is_some_and(|s| s.is_empty()) {
        eprintln!("Warning: no analysis sections recognized, leaving out the business analysis");
    }

    let document = export::assemble(idea, sections.as_ref());
    let content = export::render(&document, format);

    if dry_run {
        print!("{}", content);
        return Ok(());
    }

    let target = output_path(
        output.as_deref(),
        &config.output_dir,
        &document.file_name(format),
    );
    write_document(&target, &content)?;

    tracing::info!(path = %target.display(), %format, "blueprint written");
    println!("Blueprint written to: {}", target.display());

    Ok(())
}

fn write_document(target: &Path, content: &str) -> Result<()> {
    let export_error = |e: std::io::Error| {
        ArchitectError::Export(format!("Cannot write '{}': {}", target.display(), e))
    };
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(export_error)?;
        }
    }
    fs::write(target, content).map_err(export_error)
}

/// Pick the idea to export
///
/// Without an id the payload must hold exactly one idea.
fn select_idea<'a>(ideas: &'a [Idea], id: Option<&str>) -> Result<&'a Idea> {
    match id {
        Some(id) => ideas.iter().find(|idea| idea.id == id).ok_or_else(|| {
            ArchitectError::Input(format!(
                "No idea with id '{}'. Available: {}",
                id,
                idea_ids(ideas)
            ))
        }),
        None => match ideas {
            [] => Err(ArchitectError::Input("The ideas file holds no ideas".to_string())),
            [idea] => Ok(idea),
            _ => Err(ArchitectError::Input(format!(
                "The ideas file holds {} ideas; pick one with --select ({})",
                ideas.len(),
                idea_ids(ideas)
            ))),
        },
    }
}

fn idea_ids(ideas: &[Idea]) -> String {
    ideas
        .iter()
        .map(|idea| idea.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve where the document goes
///
/// An existing directory as `--output` receives the default file name.
fn output_path(output: Option<&Path>, output_dir: &Path, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => output_dir.join(file_name),
    }
}
