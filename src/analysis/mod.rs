//! Business analysis parsing
//!
//! Splits the provider's freeform analysis into activity, audience and tasks
//! sections using the header table in `patterns`.

pub mod extract;
pub mod patterns;

pub use extract::extract_sections;
pub use patterns::{HeaderPattern, SectionKind};
