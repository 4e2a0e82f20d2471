#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod extractor;

use command::{
    CacheKeyStrategy, CommandStrategy, ExtractInput, ExtractStrategy, InfoStrategy, InitStrategy,
    SentencesInput, SentencesStrategy, TreeStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "nlmodel")]
#[command(about = "Load natural-language model files and extract mechanisms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every sentence of the given model files, in order
    Sentences {
        /// Model files (YAML)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print one JSON object per sentence
        #[arg(long)]
        json: bool,
    },
    /// Show the module tree of the given model files
    Tree {
        /// Model files (YAML)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Run the configured extractor over every sentence, using the cache
    Extract {
        /// Model files (YAML)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Cache directory override
        #[arg(short = 'c', long)]
        cache_dir: Option<PathBuf>,
    },
    /// Print the cache key derived from a sentence
    CacheKey {
        /// Sentence text
        text: String,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Sentences { files, json } => {
            SentencesStrategy.execute(SentencesInput { files, json })
        }
        Commands::Tree { files } => TreeStrategy.execute(files),
        Commands::Extract { files, cache_dir } => {
            ExtractStrategy.execute(ExtractInput { files, cache_dir })
        }
        Commands::CacheKey { text } => CacheKeyStrategy.execute(text),
        Commands::Init => InitStrategy.execute(()),
        Commands::Info => InfoStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
