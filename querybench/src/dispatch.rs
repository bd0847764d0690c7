//! Sends a single query to the target endpoint and turns the response into
//! one [`Measurement`].
//!
//! The timing window runs from immediately before the request is issued to
//! the point the body has been fully received; JSON parsing happens outside
//! the window.

use crate::timer::RequestTimer;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

/// A single dispatch failure. Recovered locally by the coordinator; never
/// aborts the batch.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("dispatch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The outcome of one dispatched query. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Elapsed wall-clock time for the request.
    pub duration: Duration,
    /// Character length of the stringified `output` field, zero if absent.
    pub response_size: usize,
    /// The `cost` field echoed from the response, if present.
    pub cost: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    cost: Option<f64>,
}

/// Sends `query` verbatim as the POST body and measures the round trip.
///
/// Non-2xx statuses, transport failures, and timeouts all count as a
/// [`DispatchError`]; so does a body that is not valid JSON.
pub async fn dispatch(
    client: &Client,
    url: &str,
    query: String,
    timeout: Duration,
) -> Result<Measurement, DispatchError> {
    let timer = RequestTimer::start();
    let response = client
        .post(url)
        .timeout(timeout)
        .body(query)
        .send()
        .await?
        .error_for_status()?;
    let body = response.bytes().await?;
    let duration = timer.stop();

    let parsed: QueryResponse = serde_json::from_slice(&body)?;
    let response_size = output_len(parsed.output.as_ref());
    trace!(?duration, response_size, "dispatch complete");

    Ok(Measurement {
        duration,
        response_size,
        cost: parsed.cost,
    })
}

fn output_len(output: Option<&Value>) -> usize {
    match output {
        None | Some(Value::Null) => 0,
        Some(Value::String(s)) => s.chars().count(),
        Some(other) => other.to_string().chars().count(),
    }
}
