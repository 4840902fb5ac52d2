use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::export::ExportFormat;
use crate::markdown::RenderVariant;

/// saas-architect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where exported blueprints are written
    pub output_dir: PathBuf,

    /// Generation provider settings, passed through untouched
    pub provider: ProviderSettings,

    /// Terminal display settings
    pub display: Display,

    /// Export defaults
    pub export: ExportSettings,
}

/// Which hosted model answers generation and analysis requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[default]
    Google,
    OpenRouter,
}

/// Opaque provider blob; this crate never calls the provider itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub provider: ApiProvider,
    pub model_id: String,
    pub openrouter_model_id: String,
}

/// When to emit terminal colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Follow NO_COLOR / CLICOLOR and TTY detection
    #[default]
    Auto,
    Always,
    Never,
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
        }
    }
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!("unknown color choice '{}'", other)),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    /// Default variant for `render`
    pub variant: RenderVariant,

    pub color: ColorChoice,
}

/// Export configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Target used when `export` gets no `--format`
    pub format: ExportFormat,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: ApiProvider::Google,
            model_id: "gemini-2.0-flash".to_string(),
            openrouter_model_id: "anthropic/claude-3.5-sonnet".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./blueprints"),
            provider: ProviderSettings::default(),
            display: Display::default(),
            export: ExportSettings::default(),
        }
    }
}
