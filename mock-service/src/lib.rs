//! Stub of the query-execution server, for integration tests and manual
//! poking. Speaks the same wire shape: POST a raw query body, get back a JSON
//! object with `output` and `cost` fields.

use axum::{debug_handler, extract::Path, http::StatusCode, routing::post, Json, Router};
use lazy_static::lazy_static;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// Fixed `output` payload, so tests can assert on its character length.
pub const MOCK_OUTPUT: &str = "name,age\nuser_0,42\nuser_1,37";
/// Fixed `cost` echoed with every successful response.
pub const MOCK_COST: f64 = 7.0;

const DEFAULT_DELAY_MS: u64 = 25;

pub async fn run(addr: SocketAddr) {
    let app = Router::new()
        .route("/run-query", post(run_query))
        .route("/delay/ms/:delay_ms", post(delay))
        .route("/flaky/:fail_every", post(flaky))
        .route("/no-output", post(no_output))
        .route("/garbage", post(garbage));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

#[debug_handler]
async fn run_query(body: String) -> Json<Value> {
    debug!(%body, "mock query received");
    tokio::time::sleep(Duration::from_millis(DEFAULT_DELAY_MS)).await;
    query_response()
}

#[debug_handler]
async fn delay(Path(delay_ms): Path<u64>, _body: String) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    query_response()
}

lazy_static! {
    static ref FLAKY_COUNTERS: Arc<RwLock<HashMap<u64, Arc<AtomicU64>>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

/// Fails every Nth request with a 500, counting per `fail_every` value so
/// concurrent test binaries using different routes do not interfere.
#[debug_handler]
async fn flaky(
    Path(fail_every): Path<u64>,
    _body: String,
) -> Result<Json<Value>, StatusCode> {
    let read = FLAKY_COUNTERS.read().unwrap().get(&fail_every).cloned();
    let counter = if let Some(counter) = read {
        counter
    } else {
        let counter = Arc::new(AtomicU64::new(0));
        FLAKY_COUNTERS
            .write()
            .unwrap()
            .insert(fail_every, counter.clone());
        counter
    };

    let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
    if fail_every > 0 && n % fail_every == 0 {
        debug!(n, "mock flaky failure");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(query_response())
}

#[debug_handler]
async fn no_output(_body: String) -> Json<Value> {
    Json(json!({ "status": "done", "cost": null }))
}

#[debug_handler]
async fn garbage(_body: String) -> &'static str {
    "this is not json"
}

fn query_response() -> Json<Value> {
    Json(json!({
        "status": "done",
        "output": MOCK_OUTPUT,
        "cost": MOCK_COST,
    }))
}
