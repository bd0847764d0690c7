//! Reduces the collected measurements to one [`Summary`].
//!
//! This is a pure reduction: the same multiset of durations always yields the
//! same summary, regardless of the order the coordinator collected them in.
//! Everything is computed off a sorted copy so that floating-point
//! accumulation order cannot vary between runs.

use crate::dispatch::Measurement;
use crate::error::Error;
use statistical::mean;
use std::fmt;
use std::time::Duration;

/// Aggregate statistics for one batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub min: Duration,
    pub mean: Duration,
    pub p95: Duration,
    /// Completed requests per second of cumulative request time,
    /// `count / sum(duration)`.
    pub throughput: f64,
}

/// Folds a non-empty set of measurements into a [`Summary`].
///
/// An empty set, or one whose durations sum to zero, leaves throughput
/// undefined and is rejected with [`Error::EmptyInput`].
pub fn summarize(measurements: &[Measurement]) -> Result<Summary, Error> {
    let mut secs: Vec<f64> = measurements
        .iter()
        .map(|m| m.duration.as_secs_f64())
        .collect();
    if secs.is_empty() {
        return Err(Error::EmptyInput);
    }
    secs.sort_by(f64::total_cmp);

    let total: f64 = secs.iter().sum();
    if total == 0.0 {
        return Err(Error::EmptyInput);
    }

    Ok(Summary {
        min: Duration::from_secs_f64(secs[0]),
        mean: Duration::from_secs_f64(mean(&secs)),
        p95: Duration::from_secs_f64(quantile(&secs, 0.95)),
        throughput: secs.len() as f64 / total,
    })
}

/// Quantile of a sorted, non-empty sample, linearly interpolated between the
/// two nearest ranks. A rank landing exactly on an index returns that element.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={:?}, mean={:?}, p95={:?}, throughput={:.2} req/s",
            self.min, self.mean, self.p95, self.throughput,
        )
    }
}
