use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use saas_architect::cli;
use saas_architect::export::ExportFormat;
use saas_architect::markdown::RenderVariant;

#[derive(Parser)]
#[command(name = "saas-architect")]
#[command(about = "Normalize, analyze, render and export n8n SaaS blueprints", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print normalized markdown
    Normalize {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Split a business analysis into activity, audience and tasks
    Analyze {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print the extracted sections as JSON
        #[arg(long)]
        json: bool,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render a markdown field as styled HTML
    Render {
        /// Input file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Style variant: dark (screen) or light (print)
        #[arg(long)]
        variant: Option<RenderVariant>,

        /// Flatten to a single inline run
        #[arg(long)]
        inline: bool,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Export a blueprint document
    Export {
        /// JSON file holding one idea or a list of ideas
        ideas: PathBuf,

        /// Business analysis text to include
        #[arg(long)]
        analysis: Option<PathBuf>,

        /// Id of the idea to export
        #[arg(long)]
        select: Option<String>,

        /// Target: print or word
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Output file or directory (defaults to the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dry run - print to stdout instead of writing file
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize saas-architect.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the effective configuration
    Show {
        /// Path to the config file (defaults to saas-architect.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cli::config::init(path),
            ConfigCommands::Show { config } => cli::config::show(config),
        },
        Commands::Normalize { file } => cli::normalize::run(file),
        Commands::Analyze { file, json, config } => cli::analyze::run(file, json, config),
        Commands::Render {
            file,
            variant,
            inline,
            config,
        } => cli::render::run(file, variant, inline, config),
        Commands::Export {
            ideas,
            analysis,
            select,
            format,
            output,
            config,
            dry_run,
        } => cli::export::run(ideas, analysis, select, format, output, config, dry_run),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
