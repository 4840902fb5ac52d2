//! Markdown pipeline
//!
//! Normalizer, structural parser and the two-variant presentation renderer.

pub mod ast;
pub mod normalize;
pub mod render;
pub mod theme;

pub use normalize::{normalize, strip_citations};
pub use render::{escape_html, render_block, render_inline, Node, StyledNode};
pub use theme::{Element, RenderVariant, Style, Theme};
