//! Ties one batch run together: dispatch, aggregate, persist, and map the
//! outcome to the process exit code.

use crate::config::RunConfig;
use crate::{coordinator, report, stats};
use reqwest::Client;
use tracing::{error, warn};

/// Every dispatch succeeded, the summary aggregated, the report was written.
pub const EXIT_OK: u8 = 0;
/// Nothing usable to aggregate, or the report could not be written.
pub const EXIT_FATAL: u8 = 1;
/// Some dispatches failed; the survivors still aggregated and the report was
/// written, but the failure count is on record.
pub const EXIT_PARTIAL_FAILURE: u8 = 2;

/// Runs one full batch and returns the exit code for the process.
pub async fn run(client: &Client, config: &RunConfig) -> u8 {
    let outcome = coordinator::run_batch(client, config).await;
    let failed = outcome.failures.len();
    if failed > 0 {
        warn!(
            failed,
            dispatched = outcome.dispatched(),
            "batch completed with failures"
        );
    }

    let summary = match stats::summarize(&outcome.measurements) {
        Ok(summary) => summary,
        Err(err) => {
            error!(%err, "aggregation failed");
            return EXIT_FATAL;
        }
    };

    if let Err(err) = report::write_summary(&config.report_destination, &summary) {
        error!(%err, "report write failed");
        return EXIT_FATAL;
    }

    println!("{summary}");

    if failed > 0 {
        EXIT_PARTIAL_FAILURE
    } else {
        EXIT_OK
    }
}
