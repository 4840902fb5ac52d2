use thiserror::Error;

/// Architect error types
///
/// The text pipeline itself never fails; these cover the I/O glue around it.
#[derive(Error, Debug)]
pub enum ArchitectError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Architect operations
pub type Result<T> = std::result::Result<T, ArchitectError>;
