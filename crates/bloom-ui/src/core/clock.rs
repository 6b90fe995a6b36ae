//! Injectable wall clock for date-dependent tools.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Shared clock returning the current instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Clock backed by the system time.
#[must_use]
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Clock frozen at a fixed instant.
#[must_use]
pub fn fixed_clock(at: DateTime<Utc>) -> Clock {
    Arc::new(move || at)
}
