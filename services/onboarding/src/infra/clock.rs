use chrono::{DateTime, Utc};

use crate::domain::repository::Clock;

/// Wall-clock time source used outside tests.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
