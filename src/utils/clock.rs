// src/utils/clock.rs

use chrono::{DateTime, Utc};

/// Wall-clock seam for the progress-flush throttle. Production code uses
/// [`SystemClock`]; tests inject a manually advanced clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
