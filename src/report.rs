use std::time::Instant;

use serde::Serialize;

/// Final counts for one strategy run, produced exactly once after the run
/// reaches completion. Serializes to the exact result shape consumed by
/// downstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub items: u64,
    pub total_time_taken_seconds: f64,
}

/// Wall-clock span of a strategy run, from first submission to the
/// completion signal.
#[derive(Debug)]
pub struct RunTimer {
    started: Instant,
}

impl RunTimer {
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn finish(&self, items: u64) -> Measurement {
        Measurement {
            items,
            total_time_taken_seconds: self.started.elapsed().as_secs_f64(),
        }
    }
}
