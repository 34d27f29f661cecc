//! `embed` subcommand

use std::time::Instant;
use tracing::{error, info, warn};

use super::http_client;
use crate::config::Config;
use crate::core::embeddings::{
    CompletionLoop, CompletionReport, EmbeddingFunctionClient, StopReason,
};
use crate::utils::error::Result;
use crate::utils::format_duration;

/// Call the embedding function until every product has an embedding
pub async fn generate_embeddings(config: &Config) -> Result<CompletionReport> {
    config.validate()?;
    let url = config.embeddings_url()?;
    let credential = config.require_openai_key()?;

    let endpoint = EmbeddingFunctionClient::new(
        http_client(config)?,
        url,
        credential.expose(),
        config.embeddings.request_timeout(),
    )
    .with_service_key(
        config
            .remote
            .service_key
            .as_ref()
            .map(|key| key.expose().to_string()),
    );

    info!(endpoint = endpoint.url(), "Generating embeddings for all products");
    let started = Instant::now();
    let report = CompletionLoop::new(endpoint, config.embeddings.loop_config())
        .run_until_complete()
        .await?;
    let elapsed = format_duration(started.elapsed().as_millis() as u64);

    match &report.stop_reason {
        StopReason::Drained => info!(
            total = report.total_processed,
            rounds = report.rounds,
            elapsed = %elapsed,
            "Done! All embeddings generated"
        ),
        StopReason::NoProgress { remaining } => warn!(
            total = report.total_processed,
            remaining,
            elapsed = %elapsed,
            "Stopped because the server made no progress; rerun or inspect the failing rows"
        ),
        StopReason::IterationCap { remaining } => warn!(
            total = report.total_processed,
            remaining,
            elapsed = %elapsed,
            "Stopped at the iteration limit"
        ),
        StopReason::Rejected { status } => error!(
            total = report.total_processed,
            status,
            "Embedding run aborted by the server"
        ),
        StopReason::TimeoutsExhausted { attempts } => error!(
            total = report.total_processed,
            attempts,
            "Embedding run abandoned after repeated timeouts"
        ),
        StopReason::Failed(reason) => error!(
            total = report.total_processed,
            "Embedding run failed: {}",
            reason
        ),
    }

    Ok(report)
}
