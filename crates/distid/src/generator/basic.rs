use core::{cell::Cell, fmt, time::Duration};
use std::{sync::Arc, thread};

use tracing::{debug, instrument};

use crate::{
    DistId, Error, Format, GeneratorConfig, Layout, LogSink, NodeRegistry, Poll, Result,
    SequenceClock, SystemClock, Tick, TimeSource,
};

/// A Snowflake-style ID generator bound to one node ID.
///
/// Each ID packs the milliseconds elapsed since the configured epoch, the node
/// ID and a per-millisecond counter (see [`Layout`]). Within one generator IDs
/// are unique and strictly increasing; across generators they are unique as
/// long as every generator owns a distinct node ID, which the
/// [`NodeRegistry`] enforces at construction.
///
/// ## Threading
/// - ✅ `Send`: can be moved to a worker thread
/// - ❌ `Sync`: counter state is unsynchronized, so one generator serves one
///   thread of control. Give each worker its own generator (and node ID), or
///   wrap a shared one in a mutex.
///
/// ## Overflow
/// When a millisecond's counters are used up, generation backs off until the
/// clock ticks. The same happens if the clock is stepped backwards: no ID is
/// issued until the clock is back at the last issued timestamp.
///
/// # Example
/// ```
/// use distid::{Format, Generator, GeneratorConfig, NodeRegistry};
///
/// let config = GeneratorConfig::new(1).with_registry(NodeRegistry::new());
/// let generator = Generator::new(config).unwrap();
///
/// let a = generator.generate(Format::Hex).unwrap();
/// let b = generator.generate(Format::Hex).unwrap();
/// assert_ne!(a, b);
/// assert_eq!(a.len(), 16);
/// ```
pub struct Generator<T = SystemClock>
where
    T: TimeSource,
{
    node_id: u16,
    epoch: Duration,
    epoch_millis: u64,
    layout: Layout,
    sequence: Cell<SequenceClock>,
    time: T,
    sink: Arc<dyn LogSink>,
}

impl Generator<SystemClock> {
    /// Builds a generator reading the host wall clock.
    ///
    /// # Errors
    ///
    /// See [`Generator::with_time`].
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Self::with_time(config, SystemClock)
    }

    /// Clears the global [`NodeRegistry`].
    ///
    /// Existing generators keep their counter state and keep producing IDs;
    /// only future registrations are affected. Calling this while generators
    /// from the global registry are live allows a second generator onto the
    /// same node ID.
    pub fn reset_node_ids() {
        NodeRegistry::global().reset_all();
    }
}

impl<T> Generator<T>
where
    T: TimeSource,
{
    /// Builds a generator reading time from `time`.
    ///
    /// Checks run in this order, and the node ID is only claimed once
    /// everything else has passed, so a failed construction never leaves a
    /// node ID behind:
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCounterBits`] if the counter width is outside 8..=20
    /// - [`Error::EpochAhead`] if the epoch is later than the current time
    /// - [`Error::TimestampOverflow`] if the time since the epoch already
    ///   exceeds the layout's timestamp field
    /// - [`Error::InvalidNodeId`] / [`Error::NodeIdInUse`] from the registry
    pub fn with_time(config: GeneratorConfig, time: T) -> Result<Self> {
        let layout = Layout::new(config.counter_bits())?;

        let epoch = config.epoch();
        let epoch_millis = u64::try_from(epoch.as_millis()).unwrap_or(u64::MAX);
        let now_millis = time.current_millis();
        if epoch_millis > now_millis {
            return Err(Error::EpochAhead {
                epoch_ms: epoch_millis,
                now_ms: now_millis,
            });
        }
        layout.check_timestamp(now_millis - epoch_millis)?;

        let node_id = config.node_id();
        config.registry().register(node_id)?;

        let sink = Arc::clone(config.sink());
        sink.log(&format!(
            "Initialized DistIdGenerator with nodeId: {node_id}"
        ));

        Ok(Self {
            node_id,
            epoch,
            epoch_millis,
            layout,
            sequence: Cell::new(SequenceClock::new(layout)),
            time,
            sink,
        })
    }

    pub const fn node_id(&self) -> u16 {
        self.node_id
    }

    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Generates an ID and renders it in `format`.
    ///
    /// Blocks (yielding the thread) while the current millisecond is
    /// exhausted. Every call reports the raw ID and the format to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOverflow`] once the clock has run past the
    /// layout's timestamp field.
    pub fn generate(&self, format: Format) -> Result<String> {
        self.generate_with(format, thread_backoff)
    }

    /// Like [`Self::generate`], calling `backoff(yield_for)` between attempts
    /// instead of yielding the thread.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn generate_with(&self, format: Format, backoff: impl FnMut(u64)) -> Result<String> {
        let id = self.next_id(backoff)?;
        Ok(self.emit(id, format))
    }

    /// Generates an ID without rendering it.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn generate_id(&self) -> Result<DistId> {
        let id = self.next_id(thread_backoff)?;
        self.emit_raw(id, Format::Number);
        Ok(id)
    }

    /// Generates the next ID, calling `backoff(yield_for)` whenever the
    /// generator is pending.
    ///
    /// Unlike the `generate` family this does not report the ID to the sink.
    ///
    /// # Example
    /// ```
    /// use distid::{DistId, Generator, GeneratorConfig, NodeRegistry};
    ///
    /// let config = GeneratorConfig::new(0).with_registry(NodeRegistry::new());
    /// let generator = Generator::new(config).unwrap();
    ///
    /// let id: DistId = generator.next_id(|_| std::thread::yield_now()).unwrap();
    /// assert_eq!(generator.layout().node_id_of(id), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub fn next_id(&self, mut backoff: impl FnMut(u64)) -> Result<DistId> {
        loop {
            match self.poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => backoff(yield_for),
            }
        }
    }

    /// Makes one attempt at generating an ID.
    ///
    /// Returns [`Poll::Pending`] when the current millisecond is exhausted or
    /// the clock has moved backwards; the overflow or regression is reported
    /// to the sink once per stall.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    #[instrument(level = "trace", skip(self), fields(node_id = self.node_id))]
    pub fn poll_id(&self) -> Result<Poll> {
        let now = self.relative_millis();
        let mut sequence = self.sequence.get();
        let tick = sequence.next(now);
        self.sequence.set(sequence);

        match tick {
            Tick::Issued { timestamp, counter } => {
                let timestamp = self.layout.check_timestamp(timestamp)?;
                Ok(Poll::Ready {
                    id: self.layout.pack(timestamp, self.node_id, counter),
                })
            }
            Tick::Exhausted { first } => {
                if first {
                    debug!(timestamp = sequence.last_timestamp(), "counter exhausted");
                    self.sink
                        .log("Counter overflow, waiting for next millisecond");
                }
                Ok(Poll::Pending { yield_for: 1 })
            }
            Tick::Behind { behind, first } => Ok(self.cold_clock_behind(behind, first)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, behind: u64, first: bool) -> Poll {
        if first {
            debug!(behind, "clock moved backwards");
            self.sink
                .log(&format!("Clock moved backwards by {behind}ms, waiting"));
        }
        Poll::Pending { yield_for: behind }
    }

    fn relative_millis(&self) -> u64 {
        self.time
            .current_millis()
            .saturating_sub(self.epoch_millis)
    }

    pub(crate) fn emit(&self, id: DistId, format: Format) -> String {
        self.emit_raw(id, format);
        id.render(format)
    }

    fn emit_raw(&self, id: DistId, format: Format) {
        self.sink
            .log(&format!("Generated ID: {id} (format: {format})"));
    }
}

impl<T> fmt::Debug for Generator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("node_id", &self.node_id)
            .field("epoch", &self.epoch)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// The default back-off: yield the thread on an exhausted millisecond, and
/// sleep through most of a longer clock regression.
///
/// Sleeps stop one millisecond short of `yield_for`, so a wait never runs past
/// the tick it is waiting for by more than scheduler latency.
pub fn thread_backoff(yield_for: u64) {
    if yield_for > 1 {
        thread::sleep(Duration::from_millis(yield_for - 1));
    } else {
        thread::yield_now();
    }
}
