//! Command-line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::utils::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(
    name = "catalog-ingest",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about = "Load supplier products into the hosted catalog and backfill their embeddings"
)]
pub struct Cli {
    /// YAML configuration file (default: config/ingest.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project base URL, overrides SUPABASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate embeddings for every product still missing one
    Embed(EmbedArgs),
    /// Bulk insert products from a JSON file
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct EmbedArgs {
    /// Products embedded per call
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Stop after this many successful calls
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON array of product rows (also looked up under data/)
    #[arg(long)]
    pub json_file: Option<PathBuf>,

    /// Rows per insert request
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Parse the input and print the summary without inserting
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    /// Apply command-line flags on top of file and environment settings
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.remote.base_url = Some(url.clone());
        }

        match &self.command {
            Command::Embed(args) => {
                if let Some(page_size) = args.page_size {
                    config.embeddings.page_size = page_size;
                }
                if args.max_iterations.is_some() {
                    config.embeddings.max_iterations = args.max_iterations;
                }
            }
            Command::Import(args) => {
                if let Some(path) = &args.json_file {
                    config.import.json_file = path.clone();
                }
                if let Some(batch_size) = args.batch_size {
                    config.import.batch_size = batch_size;
                }
            }
        }
    }
}
