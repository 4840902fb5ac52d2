use crate::config::{self, Config};
use crate::error::{ArchitectError, Result};
use std::path::PathBuf;

/// Initialize saas-architect.toml configuration file
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = config::resolve_path(path);

    if config_path.exists() {
        eprintln!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    let config = Config::default();
    config::save(&config, &config_path)?;

    println!("Configuration file created: {}", config_path.display());
    println!("\nNext steps:");
    println!(
        "1. Edit {} to pick your provider and export defaults",
        config_path.display()
    );
    println!("2. Run 'saas-architect export ideas.json' to write your first blueprint");

    Ok(())
}

/// Print the effective configuration
pub fn show(path: Option<PathBuf>) -> Result<()> {
    let config_path = config::resolve_path(path);
    let config = config::load_or_default(&config_path)?;

    let toml = toml::to_string_pretty(&config)
        .map_err(|e| ArchitectError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", toml);

    Ok(())
}
