use core::{future::Future, time::Duration};

use crate::{DistId, Format, Generator, Poll, Result, SleepProvider, TimeSource};

/// Async generation on top of [`Generator::poll_id`].
///
/// Instead of blocking the thread while a millisecond is exhausted (or the
/// clock catches up after a regression), the returned futures sleep through
/// the [`SleepProvider`] `S`.
///
/// ```
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// use distid::{Format, Generator, GeneratorAsyncExt, GeneratorConfig, NodeRegistry, TokioSleep};
///
/// let config = GeneratorConfig::new(0).with_registry(NodeRegistry::new());
/// let generator = Generator::new(config).unwrap();
///
/// let hex = generator.generate_async::<TokioSleep>(Format::Hex).await.unwrap();
/// assert_eq!(hex.len(), 16);
/// # });
/// ```
pub trait GeneratorAsyncExt {
    /// Async counterpart of [`Generator::next_id`]; does not report the ID to
    /// the sink.
    fn next_id_async<S>(&self) -> impl Future<Output = Result<DistId>>
    where
        S: SleepProvider;

    /// Async counterpart of [`Generator::generate`].
    fn generate_async<S>(&self, format: Format) -> impl Future<Output = Result<String>>
    where
        S: SleepProvider;
}

impl<T> GeneratorAsyncExt for Generator<T>
where
    T: TimeSource,
{
    fn next_id_async<S>(&self) -> impl Future<Output = Result<DistId>>
    where
        S: SleepProvider,
    {
        async {
            loop {
                let dur = match self.poll_id()? {
                    Poll::Ready { id } => return Ok(id),
                    Poll::Pending { yield_for } => Duration::from_millis(yield_for),
                };
                S::sleep_for(dur).await;
            }
        }
    }

    fn generate_async<S>(&self, format: Format) -> impl Future<Output = Result<String>>
    where
        S: SleepProvider,
    {
        async move {
            let id = self.next_id_async::<S>().await?;
            Ok(self.emit(id, format))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeneratorConfig, NodeRegistry, NoopSink, TokioSleep, TokioYield};
    use std::collections::HashSet;

    const TOTAL_IDS: usize = 2048;

    fn generator(node_id: u16) -> Generator {
        let config = GeneratorConfig::new(node_id)
            .with_counter_bits(8)
            .with_sink(NoopSink)
            .with_registry(NodeRegistry::new());
        Generator::new(config).unwrap()
    }

    async fn run_unique_and_increasing<S: SleepProvider>() {
        let generator = generator(1);
        let mut seen = HashSet::with_capacity(TOTAL_IDS);
        let mut last = DistId::default();
        for _ in 0..TOTAL_IDS {
            let id = generator.next_id_async::<S>().await.unwrap();
            assert!(seen.insert(id));
            assert!(last < id);
            last = id;
        }
    }

    #[tokio::test]
    async fn tokio_sleep_ids_are_unique_and_increasing() {
        run_unique_and_increasing::<TokioSleep>().await;
    }

    #[tokio::test]
    async fn tokio_yield_ids_are_unique_and_increasing() {
        run_unique_and_increasing::<TokioYield>().await;
    }

    #[tokio::test]
    async fn generate_async_renders_the_format() {
        let generator = generator(2);
        let hex = generator
            .generate_async::<TokioSleep>(Format::Hex)
            .await
            .unwrap();
        assert_eq!(hex.len(), 16);
        let raw = u64::from_str_radix(&hex, 16).unwrap();
        assert_eq!(generator.layout().node_id_of(DistId::from_raw(raw)), 2);
    }
}
