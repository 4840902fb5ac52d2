use std::path::PathBuf;

use crate::config;
use crate::error::Result;
use crate::markdown::{render_block, render_inline, RenderVariant};

/// Print the styled HTML fragment for one markdown field
pub fn run(
    input: Option<PathBuf>,
    variant: Option<RenderVariant>,
    inline: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let text = super::read_input(input.as_deref())?;

    let variant = match variant {
        Some(variant) => variant,
        None => config::load_or_default(&config::resolve_path(config_path))?
            .display
            .variant,
    };

    let node = if inline {
        render_inline(&text, variant)
    } else {
        render_block(&text, variant)
    };

    match node {
        Some(node) => println!("{}", node.to_html()),
        None => tracing::debug!("nothing to render after normalization"),
    }

    Ok(())
}
