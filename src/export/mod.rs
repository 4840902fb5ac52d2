//! Blueprint export
//!
//! `assemble` builds one document model; `print` and `word` serialize it.

pub mod document;
pub mod print;
pub mod word;

pub use document::{assemble, Document, ExportFormat, Part, Section};

/// Serialize an assembled document for the given target
pub fn render(doc: &Document, format: ExportFormat) -> String {
    match format {
        ExportFormat::Print => print::to_html(doc),
        ExportFormat::Word => word::to_html(doc),
    }
}
