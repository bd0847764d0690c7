//! Persists the summary as one labelled CSV row.

use crate::error::Error;
use crate::stats::Summary;
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct SummaryRow {
    min: f64,
    mean: f64,
    p95: f64,
    throughput: f64,
}

/// Writes `summary` to `dest` as a header plus one row, durations in
/// seconds. Any existing file at `dest` is replaced.
pub fn write_summary(dest: &Path, summary: &Summary) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(dest)?;
    writer.serialize(SummaryRow {
        min: summary.min.as_secs_f64(),
        mean: summary.mean.as_secs_f64(),
        p95: summary.p95.as_secs_f64(),
        throughput: summary.throughput,
    })?;
    writer.flush().map_err(csv::Error::from)?;
    info!(dest = %dest.display(), "summary persisted");
    Ok(())
}
