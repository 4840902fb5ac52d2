//! Data models module
//!
//! Defines the records exchanged with the generation collaborator (Idea, Blueprint)
//! and the derived AnalysisSections record.

pub mod analysis;
pub mod idea;

pub use analysis::AnalysisSections;
pub use idea::{Blueprint, Idea, IdeaSet, Tier};
