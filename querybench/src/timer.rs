use std::time::{Duration, Instant};

/// Captures the wall-clock window around a single dispatch. Each dispatch
/// owns its own timer, so no synchronization is needed between concurrent
/// requests.
pub(crate) struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
