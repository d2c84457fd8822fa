use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// A wall-clock-anchored time source that never goes backward.
///
/// The Unix time is sampled once at construction; afterwards the clock
/// advances with `Instant`, which is immune to NTP steps and manual clock
/// changes. The trade-off is drift: over long uptimes the reported time can
/// wander from the host wall clock by however much the wall clock was
/// corrected.
///
/// Use it in place of [`SystemClock`] when stalls on clock regression are not
/// acceptable.
///
/// ```
/// use distid::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
///
/// [`SystemClock`]: crate::SystemClock
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    origin_millis: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock at the current wall-clock time.
    pub fn new() -> Self {
        let start = Instant::now();
        let origin_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            });
        Self {
            start,
            origin_millis,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        let elapsed = u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.origin_millis.saturating_add(elapsed)
    }
}
