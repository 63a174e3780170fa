//! vocabfill entry point.
//!
//! Records and filled notes go to stdout; logging goes to stderr so output
//! can be piped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vocabfill_client::BunproClient;
use vocabfill_core::{AppConfig, Note};

mod batch;

#[derive(Parser)]
#[command(name = "vocabfill", about = "Fill Japanese vocabulary notes from Bunpro")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up words and print their records as JSON
    Lookup {
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Fill a JSON array of notes
    Fill {
        /// Notes file
        notes: PathBuf,
        /// Write filled notes here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let client = Arc::new(BunproClient::from_config(&config)?);

    tracing::debug!(base_url = %client.base_url(), "vocabfill starting");

    match cli.command {
        Commands::Lookup { words } => lookup(client, words, config.batch_concurrency).await,
        Commands::Fill { notes, output } => fill(client, &config, &notes, output.as_deref()).await,
    }
}

async fn lookup(client: Arc<BunproClient>, words: Vec<String>, concurrency: usize) -> Result<()> {
    let total = words.len();
    let records = batch::lookup_all(client, words, concurrency).await?;

    let mut missing = 0;
    for record in &records {
        match record {
            Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
            None => missing += 1,
        }
    }

    if missing > 0 {
        bail!("{missing} of {total} lookup(s) not found");
    }
    Ok(())
}

async fn fill(client: Arc<BunproClient>, config: &AppConfig, notes: &Path, output: Option<&Path>) -> Result<()> {
    let input = tokio::fs::read_to_string(notes)
        .await
        .with_context(|| format!("reading {}", notes.display()))?;
    let mut parsed: Vec<Note> =
        serde_json::from_str(&input).with_context(|| format!("parsing notes in {}", notes.display()))?;

    let summary = batch::fill_notes(client, &mut parsed, config.batch_concurrency, &config.tag_prefix).await?;
    let rendered = serde_json::to_string_pretty(&parsed)?;

    match output {
        Some(path) => tokio::fs::write(path, rendered)
            .await
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{rendered}"),
    }

    eprintln!("{summary}");
    Ok(())
}
