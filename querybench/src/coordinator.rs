//! Fans out every configured query at once and collects all outcomes.
//!
//! Each dispatch runs as its own tokio task and produces its result through
//! the [`JoinSet`], which the coordinator drains serially. There is no shared
//! mutable state between in-flight dispatches; the only writer of the
//! collected outcome is this function.

use crate::config::RunConfig;
use crate::dispatch::{self, DispatchError, Measurement};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Every outcome of one batch run: the surviving measurements plus the
/// failures that were recorded along the way (fail-soft).
#[derive(Debug)]
pub struct BatchOutcome {
    pub measurements: Vec<Measurement>,
    pub failures: Vec<DispatchError>,
}

impl BatchOutcome {
    /// Total dispatches observed, successes and failures combined.
    pub fn dispatched(&self) -> usize {
        self.measurements.len() + self.failures.len()
    }
}

/// Launches one dispatch per configured query and waits for all of them.
///
/// All tasks are spawned up front; when `concurrency_limit` is set, a
/// semaphore caps how many are past their permit and actually on the wire.
/// The batch never aborts early: failed dispatches are logged, counted, and
/// returned alongside the successes.
pub async fn run_batch(client: &Client, config: &RunConfig) -> BatchOutcome {
    let semaphore = config
        .concurrency_limit
        .map(|limit| Arc::new(Semaphore::new(limit)));

    let mut in_flight = JoinSet::new();
    for query in config.queries.iter().cloned() {
        let client = client.clone();
        let url = config.endpoint_url.clone();
        let timeout = config.per_request_timeout;
        let semaphore = semaphore.clone();
        in_flight.spawn(async move {
            let _permit = match &semaphore {
                Some(semaphore) => match semaphore.clone().acquire_owned().await {
                    Ok(permit) => Some(permit),
                    // Nothing closes the semaphore while dispatches are in
                    // flight; proceeding without a permit would break the cap.
                    Err(_) => unreachable!("semaphore closed with dispatches in flight"),
                },
                None => None,
            };
            dispatch::dispatch(&client, &url, query, timeout).await
        });
    }
    debug!(dispatched = in_flight.len(), "batch launched");

    let mut outcome = BatchOutcome {
        measurements: Vec::with_capacity(config.queries.len()),
        failures: Vec::new(),
    };
    while let Some(joined) = in_flight.join_next().await {
        match joined {
            Ok(Ok(measurement)) => outcome.measurements.push(measurement),
            Ok(Err(err)) => {
                warn!(%err, "dispatch failed");
                outcome.failures.push(err);
            }
            Err(join_err) => {
                warn!(%join_err, "dispatch task panicked");
                outcome.failures.push(join_err.into());
            }
        }
    }

    debug!(
        ok = outcome.measurements.len(),
        failed = outcome.failures.len(),
        "batch complete"
    );
    outcome
}
