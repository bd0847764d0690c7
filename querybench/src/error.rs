use thiserror::Error;

/// Run-level errors. Per-dispatch failures are handled inside the
/// coordinator and never surface as this type; see
/// [`DispatchError`](crate::dispatch::DispatchError).
#[derive(Debug, Error)]
pub enum Error {
    #[error("no usable measurements to aggregate")]
    EmptyInput,

    #[error("failed to persist report: {0}")]
    Report(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
