//! The `geoquiz` binary: play, generate, validate and init.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "geoquiz", version, about = "Multiple-choice geography quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz in the terminal
    Play {
        /// Dataset file path or http(s) URL
        #[arg(long)]
        dataset: Option<String>,

        /// Number of questions
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed for a reproducible quiz
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to save the final summary as JSON
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print generated questions without playing
    Generate {
        /// Dataset file path or http(s) URL
        #[arg(long)]
        dataset: Option<String>,

        /// Number of questions
        #[arg(long)]
        count: Option<usize>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the correct answer under each question
        #[arg(long)]
        show_answers: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a dataset for problems that break question generation
    Validate {
        /// Dataset file path or http(s) URL
        #[arg(long)]
        dataset: String,
    },

    /// Create starter config and sample dataset
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("geoquiz=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            dataset,
            count,
            seed,
            output,
            config,
        } => commands::play::execute(dataset, count, seed, output, config).await,
        Commands::Generate {
            dataset,
            count,
            seed,
            show_answers,
            format,
            config,
        } => commands::generate::execute(dataset, count, seed, show_answers, format, config).await,
        Commands::Validate { dataset } => commands::validate::execute(dataset).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
