//! Querybench fires a configured batch of queries at an HTTP query-execution
//! endpoint, measures per-request latency and response size, and reduces the
//! results to summary statistics (min, mean, p95, throughput) plus a persisted
//! CSV report.
//!
//! The building blocks:
//!
//! - [`config::RunConfig`]: the full configuration for one run.
//! - [`dispatch`]: sends a single query and produces one [`Measurement`].
//! - [`coordinator`]: fans out every dispatch concurrently and collects all
//!   outcomes exactly once.
//! - [`stats`]: pure reduction of the collected measurements to a [`Summary`].
//! - [`report`]: writes the summary row to disk.
//! - [`run`]: one full batch end to end, mapped to a process exit code.
//!
//! Individual dispatch failures are fail-soft: they are counted and logged,
//! and the surviving measurements are still aggregated. Only an empty result
//! set or a report-write failure aborts a run.

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod report;
pub mod run;
pub mod stats;

mod error;
pub(crate) mod timer;

pub use config::RunConfig;
pub use coordinator::{run_batch, BatchOutcome};
pub use dispatch::{DispatchError, Measurement};
pub use error::Error;
pub use stats::Summary;
