//! Text pipeline behind the n8n SaaS Architect
//!
//! Repairs AI-generated markdown, renders it for screen and print, splits
//! business analyses into their named sections and assembles the blueprint
//! documents exported for print and Word.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod markdown;
pub mod models;
