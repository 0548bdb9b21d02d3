//! ChainSpec command-line tool
//!
//! Usage: chainspec <parse|generate|batch|templates> [options]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chainspec::config::{ChainspecConfig, CliOverrides};

mod cli;

#[derive(Parser)]
#[command(name = "chainspec")]
#[command(version, about = "Markdown contract specs to Solidity skeletons", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./chainspec.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of `<name>.sol` templates (default: bundled templates)
    #[arg(long, global = true)]
    templates_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a markdown spec and print or save the record
    Parse {
        /// Markdown spec file
        file: PathBuf,

        /// Write the JSON record to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Generate a Solidity contract from a markdown spec
    Generate {
        /// Markdown spec file
        file: PathBuf,

        /// Template name (default: chosen from the contract name)
        #[arg(short, long)]
        template: Option<String>,

        /// Directory for the rendered contract
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Also write the JSON record to this path
        #[arg(long)]
        record: Option<PathBuf>,

        /// Print the contract instead of writing it
        #[arg(long)]
        stdout: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Parse and generate every `*.md` spec in a directory
    Batch {
        /// Directory of markdown specs
        dir: PathBuf,

        /// Directory for rendered contracts
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Directory for JSON records
        #[arg(long)]
        records_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List available templates
    Templates,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Expected: human, json", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut overrides = CliOverrides {
        config_path: cli.config.clone(),
        templates_dir: cli.templates_dir.clone(),
        ..Default::default()
    };
    match &cli.command {
        Commands::Generate { out_dir, .. } => overrides.output_dir = out_dir.clone(),
        Commands::Batch {
            out_dir,
            records_dir,
            ..
        } => {
            overrides.output_dir = out_dir.clone();
            overrides.records_dir = records_dir.clone();
        }
        _ => {}
    }

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match ChainspecConfig::load(&root, &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "resolved configuration");

    let result = match cli.command {
        Commands::Parse {
            file,
            output,
            format,
        } => cli::commands::handle_parse(&file, output.as_deref(), format),
        Commands::Generate {
            file,
            template,
            record,
            stdout,
            format,
            out_dir: _,
        } => cli::commands::handle_generate(
            &config,
            &file,
            template.as_deref(),
            record.as_deref(),
            stdout,
            format,
        ),
        Commands::Batch { dir, format, .. } => cli::commands::handle_batch(&config, &dir, format),
        Commands::Templates => cli::commands::handle_templates(&config),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
