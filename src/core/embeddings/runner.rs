//! Completion loop over the embedding function

use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::client::WorkEndpoint;
use crate::core::models::WorkCallResult;
use crate::utils::body_excerpt;
use crate::utils::error::{IngestError, Result};

const BODY_EXCERPT_CHARS: usize = 300;

/// Settings for the completion loop
#[derive(Debug, Clone)]
pub struct CompletionLoopConfig {
    /// Rows requested per call (default: 100)
    pub page_size: u32,
    /// Pause between successful rounds (default: 1s)
    pub pause: Duration,
    /// Pause before retrying a timed out call (default: 5s)
    pub timeout_pause: Duration,
    /// Give up after this many timeouts in a row (default: 10)
    pub max_consecutive_timeouts: Option<u32>,
    /// Stop after this many successful rounds (default: unbounded)
    pub max_iterations: Option<u32>,
    /// Item errors logged per round (default: 3)
    pub reported_errors: usize,
}

impl Default for CompletionLoopConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            pause: Duration::from_secs(1),
            timeout_pause: Duration::from_secs(5),
            max_consecutive_timeouts: Some(10),
            max_iterations: None,
            reported_errors: 3,
        }
    }
}

impl CompletionLoopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero is rejected by [`CompletionLoop::run_until_complete`]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_pauses(mut self, pause: Duration, timeout_pause: Duration) -> Self {
        self.pause = pause;
        self.timeout_pause = timeout_pause;
        self
    }

    pub fn with_max_consecutive_timeouts(mut self, limit: Option<u32>) -> Self {
        self.max_consecutive_timeouts = limit;
        self
    }

    pub fn with_max_iterations(mut self, limit: Option<u32>) -> Self {
        self.max_iterations = limit;
        self
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Server reported `remaining == 0`
    Drained,
    /// Server processed nothing; `remaining` rows were left behind
    NoProgress { remaining: u64 },
    /// Non-200 response
    Rejected { status: u16 },
    /// Transport failure other than a timeout, or an unreadable body
    Failed(String),
    /// Too many consecutive timeouts
    TimeoutsExhausted { attempts: u32 },
    /// `max_iterations` reached before the server drained
    IterationCap { remaining: u64 },
}

/// Outcome of a completion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    /// Sum of `processed` over all successful rounds
    pub total_processed: u64,
    /// Successful (HTTP 200) rounds
    pub rounds: u32,
    /// Requests issued, including timed out ones
    pub requests: u32,
    /// Requests that timed out
    pub timeouts: u32,
    /// `remaining` reported by the last successful round
    pub last_remaining: Option<u64>,
    pub stop_reason: StopReason,
}

impl CompletionReport {
    /// True when the server reported all work done
    pub fn is_complete(&self) -> bool {
        self.stop_reason == StopReason::Drained
    }
}

/// Drives a [`WorkEndpoint`] until the server has no work left
pub struct CompletionLoop<E> {
    endpoint: E,
    config: CompletionLoopConfig,
}

impl<E: WorkEndpoint> CompletionLoop<E> {
    pub fn new(endpoint: E, config: CompletionLoopConfig) -> Self {
        Self { endpoint, config }
    }

    pub fn config(&self) -> &CompletionLoopConfig {
        &self.config
    }

    /// Call the endpoint until it reports `remaining == 0` or `processed == 0`
    ///
    /// Only an invalid configuration is returned as `Err`. Every way the
    /// remote side can end the run is recorded in the report's
    /// [`StopReason`] together with the total processed so far.
    pub async fn run_until_complete(&self) -> Result<CompletionReport> {
        let page_size = self.config.page_size;
        if page_size == 0 {
            return Err(IngestError::validation("page size must be at least 1"));
        }

        let mut total_processed = 0u64;
        let mut rounds = 0u32;
        let mut requests = 0u32;
        let mut timeouts = 0u32;
        let mut consecutive_timeouts = 0u32;
        let mut last_remaining = None;

        let stop_reason = loop {
            if let Some(cap) = self.config.max_iterations {
                if rounds >= cap {
                    let remaining = last_remaining.unwrap_or(0);
                    warn!(rounds, remaining, "Iteration limit reached before the server drained");
                    break StopReason::IterationCap { remaining };
                }
            }

            requests += 1;
            let round = rounds + 1;

            let reply = match self.endpoint.process(page_size).await {
                Ok(reply) => reply,
                Err(IngestError::Timeout(msg)) => {
                    timeouts += 1;
                    consecutive_timeouts += 1;
                    if let Some(limit) = self.config.max_consecutive_timeouts {
                        if consecutive_timeouts >= limit {
                            error!(
                                round,
                                attempts = consecutive_timeouts,
                                "Giving up after consecutive timeouts: {}",
                                msg
                            );
                            break StopReason::TimeoutsExhausted {
                                attempts: consecutive_timeouts,
                            };
                        }
                    }
                    warn!(
                        round,
                        retry_in_ms = self.config.timeout_pause.as_millis() as u64,
                        "Round timed out, retrying"
                    );
                    tokio::time::sleep(self.config.timeout_pause).await;
                    continue;
                }
                Err(e) => {
                    error!(round, "Embedding request failed: {}", e);
                    break StopReason::Failed(e.to_string());
                }
            };
            consecutive_timeouts = 0;

            // Only a 200 carries a usable work result
            if reply.status != 200 {
                let err = IngestError::from_status(
                    reply.status,
                    body_excerpt(&reply.body, BODY_EXCERPT_CHARS),
                );
                error!(
                    round,
                    status = reply.status,
                    "Embedding function rejected the request: {}",
                    err
                );
                if matches!(err, IngestError::Auth(_)) {
                    error!("Check the embedding credential and project key");
                }
                break StopReason::Rejected { status: reply.status };
            }

            let result: WorkCallResult = match reply.json() {
                Ok(result) => result,
                Err(e) => {
                    error!(round, "{}", e);
                    break StopReason::Failed(e.to_string());
                }
            };

            rounds += 1;
            total_processed += result.processed;
            last_remaining = Some(result.remaining);

            info!(
                round,
                processed = result.processed,
                total = total_processed,
                remaining = result.remaining,
                "Embedding round completed"
            );
            self.report_item_errors(round, &result.errors);

            if result.is_final() {
                if result.remaining == 0 {
                    break StopReason::Drained;
                }
                warn!(
                    round,
                    remaining = result.remaining,
                    "Server made no progress; stopping with rows still pending"
                );
                break StopReason::NoProgress { remaining: result.remaining };
            }

            tokio::time::sleep(self.config.pause).await;
        };

        Ok(CompletionReport {
            total_processed,
            rounds,
            requests,
            timeouts,
            last_remaining,
            stop_reason,
        })
    }

    fn report_item_errors(&self, round: u32, errors: &[String]) {
        for item in errors.iter().take(self.config.reported_errors) {
            warn!(round, "Item error: {}", item);
        }
        if errors.len() > self.config.reported_errors {
            debug!(
                round,
                omitted = errors.len() - self.config.reported_errors,
                "Further item errors not shown"
            );
        }
    }
}
