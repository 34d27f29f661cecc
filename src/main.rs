//! catalog-ingest - product import and embedding backfill

use catalog_ingest::cli::{Cli, Command};
use catalog_ingest::commands::{self, ImportOptions};
use catalog_ingest::config::Config;
use catalog_ingest::utils::logging::init_logging;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_format(), "info");

    let mut config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    let result = match &cli.command {
        Command::Embed(_) => commands::generate_embeddings(&config).await.map(|_| ()),
        Command::Import(args) => {
            let options = ImportOptions {
                dry_run: args.dry_run,
            };
            commands::import_products(&config, &options)
                .await
                .map(|_| ())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
