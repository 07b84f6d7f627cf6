use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use jsonlens::config::Config;
use jsonlens::document::{RawContent, SelectedFile};
use jsonlens::parser::parse_document;
use jsonlens::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "jsonlens")]
#[command(about = "View a local JSON file as a validated document tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on a file and print the document
    View {
        /// File to ingest
        file: PathBuf,

        /// Print compact instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },
    /// Validate a file without printing the document; exit 1 on failure
    Check {
        /// File to validate
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::View { file, compact } => run_view(file, compact, config).await,
        Commands::Check { file } => run_check(file).await,
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("config {} is not valid JSON", path.display()))?;
    Ok(Config::from_json(Some(value)))
}

async fn run_view(file: PathBuf, compact: bool, config: Config) -> ExitCode {
    let compact = compact || config.view.compact;

    let selected = match SelectedFile::from_path(&file) {
        Ok(selected) => selected,
        Err(e) => {
            eprintln!("Error selecting {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = Pipeline::new(config);
    let snapshot = pipeline.run(selected).await;

    if let Some(document) = snapshot.document {
        let rendered = if compact {
            document.to_compact_string()
        } else {
            document.to_pretty_string()
        };
        match rendered {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize document: {e}");
                ExitCode::FAILURE
            }
        }
    } else if let Some(error) = snapshot.error {
        eprintln!("Error: {error}");
        ExitCode::FAILURE
    } else {
        // Unreachable for a sequential run; treat as failure rather than
        // printing nothing.
        eprintln!("Pipeline produced no result");
        ExitCode::FAILURE
    }
}

async fn run_check(file: PathBuf) -> ExitCode {
    let content = match tokio::fs::read_to_string(&file).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {e}");
            return ExitCode::FAILURE;
        }
    };

    match parse_document(&RawContent::new(content)) {
        Ok(document) => {
            println!("{}: valid JSON ({} nodes)", file.display(), document.node_count());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}: {}", file.display(), error);
            ExitCode::FAILURE
        }
    }
}
