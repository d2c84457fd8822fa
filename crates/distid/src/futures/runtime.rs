use core::time::Duration;

use crate::SleepProvider;

/// Waits on Tokio's timer. The usual choice inside a Tokio application.
pub struct TokioSleep;

impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}

/// Yields to the Tokio scheduler instead of arming a timer.
///
/// Reacts to the next millisecond sooner than [`TokioSleep`] at the cost of
/// re-polling the generator more often. Prefer it when few tasks compete for
/// the runtime.
pub struct TokioYield;

impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await;
    }
}
