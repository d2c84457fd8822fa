use std::time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The host wall clock.
///
/// Reads `SystemTime::now()` on every call. The wall clock can be stepped
/// backwards (NTP corrections, manual changes); the generator detects this and
/// waits for the clock to catch up rather than reissuing an older timestamp.
/// A clock set before 1970 reads as zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}
