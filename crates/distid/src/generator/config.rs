use core::{fmt, time::Duration};
use std::sync::Arc;

use crate::{DEFAULT_COUNTER_BITS, DEFAULT_EPOCH, LogSink, NodeRegistry, TracingSink};

/// Construction options for a [`Generator`].
///
/// Only the node ID is required; everything else has a default:
///
/// | option         | default                         |
/// |----------------|---------------------------------|
/// | `epoch`        | [`DEFAULT_EPOCH`] (2020-01-01)  |
/// | `counter_bits` | [`DEFAULT_COUNTER_BITS`] (12)   |
/// | `sink`         | [`TracingSink`]                 |
/// | `registry`     | [`NodeRegistry::global`]        |
///
/// Values are validated when the generator is built, not here.
///
/// ```
/// use core::time::Duration;
/// use distid::{GeneratorConfig, NoopSink};
///
/// let config = GeneratorConfig::new(5)
///     .with_epoch(Duration::from_millis(1_700_000_000_000))
///     .with_counter_bits(16)
///     .with_sink(NoopSink);
/// assert_eq!(config.counter_bits(), 16);
/// ```
///
/// [`Generator`]: crate::Generator
#[derive(Clone)]
pub struct GeneratorConfig {
    node_id: u16,
    epoch: Duration,
    counter_bits: u8,
    sink: Arc<dyn LogSink>,
    registry: NodeRegistry,
}

impl GeneratorConfig {
    pub fn new(node_id: u16) -> Self {
        Self {
            node_id,
            epoch: DEFAULT_EPOCH,
            counter_bits: DEFAULT_COUNTER_BITS,
            sink: Arc::new(TracingSink),
            registry: NodeRegistry::global().clone(),
        }
    }

    /// Sets the zero point, as a [`Duration`] since 1970-01-01 UTC.
    #[must_use]
    pub fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn with_counter_bits(mut self, counter_bits: u8) -> Self {
        self.counter_bits = counter_bits;
        self
    }

    #[must_use]
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Shares an existing sink between several generators.
    #[must_use]
    pub fn with_shared_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Claims the node ID in `registry` instead of the global one.
    #[must_use]
    pub fn with_registry(mut self, registry: NodeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub const fn node_id(&self) -> u16 {
        self.node_id
    }

    pub const fn epoch(&self) -> Duration {
        self.epoch
    }

    pub const fn counter_bits(&self) -> u8 {
        self.counter_bits
    }

    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("node_id", &self.node_id)
            .field("epoch", &self.epoch)
            .field("counter_bits", &self.counter_bits)
            .finish_non_exhaustive()
    }
}
