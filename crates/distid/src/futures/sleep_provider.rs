use core::{future::Future, time::Duration};

/// How an async generator waits out a [`Poll::Pending`].
///
/// Keeps [`GeneratorAsyncExt`] independent of the runtime's timer.
///
/// [`Poll::Pending`]: crate::Poll::Pending
/// [`GeneratorAsyncExt`]: crate::GeneratorAsyncExt
pub trait SleepProvider {
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
