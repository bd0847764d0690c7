mod utils;
#[allow(unused)]
use utils::*;

use querybench::run::{self, EXIT_FATAL, EXIT_OK, EXIT_PARTIAL_FAILURE};
use querybench::{coordinator, report, stats, Error, RunConfig};
use reqwest::Client;
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn config(path: &str, n: usize) -> RunConfig {
    RunConfig {
        endpoint_url: format!("http://{MOCK_HOST}/{path}"),
        queries: vec!["df = df.select(['name','age'])".to_string(); n],
        concurrency_limit: None,
        per_request_timeout: Duration::from_secs(5),
        report_destination: PathBuf::from("unused.csv"),
    }
}

#[tokio::test]
async fn fan_out_is_concurrent() {
    init().await;

    let start = Instant::now();
    let outcome = coordinator::run_batch(&Client::new(), &config("delay/ms/100", 10)).await;
    let elapsed = start.elapsed();

    assert_eq!(outcome.measurements.len(), 10);
    assert!(outcome.failures.is_empty());
    // Ten serialized 100ms requests would take a second; true fan-out
    // finishes in roughly one request's worth of time.
    assert!(
        elapsed < Duration::from_millis(500),
        "batch took {elapsed:?}"
    );
    for measurement in &outcome.measurements {
        assert!(measurement.duration >= Duration::from_millis(100));
    }
}

#[tokio::test]
async fn concurrency_limit_still_completes_the_batch() {
    init().await;

    let mut config = config("delay/ms/50", 6);
    config.concurrency_limit = Some(2);

    let start = Instant::now();
    let outcome = coordinator::run_batch(&Client::new(), &config).await;
    let elapsed = start.elapsed();

    assert_eq!(outcome.measurements.len(), 6);
    assert!(outcome.failures.is_empty());
    // Three waves of two.
    assert!(elapsed >= Duration::from_millis(150), "took {elapsed:?}");
}

#[tokio::test]
async fn partial_failures_are_recorded_not_fatal() {
    init().await;

    let outcome = coordinator::run_batch(&Client::new(), &config("flaky/5", 10)).await;

    assert_eq!(outcome.dispatched(), 10);
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.measurements.len(), 8);

    // Survivors still aggregate to a valid summary.
    let summary = stats::summarize(&outcome.measurements).unwrap();
    assert!(summary.min <= summary.mean);
    assert!(summary.throughput > 0.0);
}

#[tokio::test]
async fn all_failures_leave_nothing_to_aggregate() {
    init().await;

    let outcome = coordinator::run_batch(&Client::new(), &config("garbage", 4)).await;

    assert_eq!(outcome.failures.len(), 4);
    assert!(outcome.measurements.is_empty());
    assert!(matches!(
        stats::summarize(&outcome.measurements),
        Err(Error::EmptyInput)
    ));
}

#[tokio::test]
async fn response_fields_are_extracted() {
    init().await;

    let outcome = coordinator::run_batch(&Client::new(), &config("run-query", 1)).await;

    assert_eq!(outcome.measurements.len(), 1);
    let measurement = &outcome.measurements[0];
    assert_eq!(
        measurement.response_size,
        mock_service::MOCK_OUTPUT.chars().count()
    );
    assert_eq!(measurement.cost, Some(mock_service::MOCK_COST));
}

#[tokio::test]
async fn missing_output_and_cost_default() {
    init().await;

    let outcome = coordinator::run_batch(&Client::new(), &config("no-output", 1)).await;

    assert_eq!(outcome.measurements.len(), 1);
    assert_eq!(outcome.measurements[0].response_size, 0);
    assert_eq!(outcome.measurements[0].cost, None);
}

#[tokio::test]
async fn hung_request_times_out_without_stalling_the_rest() {
    init().await;

    let mut config = config("delay/ms/2000", 4);
    config.per_request_timeout = Duration::from_millis(100);

    let start = Instant::now();
    let outcome = coordinator::run_batch(&Client::new(), &config).await;
    let elapsed = start.elapsed();

    assert_eq!(outcome.dispatched(), 4);
    assert_eq!(outcome.failures.len(), 4);
    // The batch is bounded by the timeout, not the 2s stub delay.
    assert!(elapsed < Duration::from_millis(1000), "took {elapsed:?}");
}

#[tokio::test]
async fn exit_code_is_zero_on_a_clean_run() {
    init().await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config("run-query", 3);
    config.report_destination = dir.path().join("summary.csv");

    assert_eq!(run::run(&Client::new(), &config).await, EXIT_OK);
    assert!(config.report_destination.exists());
}

#[tokio::test]
async fn exit_code_flags_partial_failure_but_still_reports() {
    init().await;

    let dir = tempfile::tempdir().unwrap();
    // Every 4th request fails: 2 of 8.
    let mut config = config("flaky/4", 8);
    config.report_destination = dir.path().join("summary.csv");

    assert_eq!(run::run(&Client::new(), &config).await, EXIT_PARTIAL_FAILURE);
    assert!(config.report_destination.exists());
}

#[tokio::test]
async fn exit_code_is_fatal_when_every_dispatch_fails() {
    init().await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config("garbage", 3);
    config.report_destination = dir.path().join("summary.csv");

    assert_eq!(run::run(&Client::new(), &config).await, EXIT_FATAL);
    // Nothing aggregated, so nothing persisted.
    assert!(!config.report_destination.exists());
}

#[tokio::test]
async fn exit_code_is_fatal_when_the_report_cannot_be_written() {
    init().await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config("run-query", 2);
    // A directory path cannot be opened as a file.
    config.report_destination = dir.path().to_path_buf();

    assert_eq!(run::run(&Client::new(), &config).await, EXIT_FATAL);
}

#[tokio::test]
async fn end_to_end_summary_is_persisted() {
    init().await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("summary.csv");

    let outcome = coordinator::run_batch(&Client::new(), &config("run-query", 5)).await;
    let summary = stats::summarize(&outcome.measurements).unwrap();
    report::write_summary(&dest, &summary).unwrap();

    let contents = std::fs::read_to_string(&dest).unwrap();
    assert!(contents.starts_with("min,mean,p95,throughput\n"));
    assert_eq!(contents.lines().count(), 2);
}
