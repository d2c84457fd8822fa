use crate::DistId;

/// Result of a single, non-blocking generation attempt.
///
/// - [`Poll::Ready`] carries a freshly generated ID.
/// - [`Poll::Pending`] means the generator cannot issue an ID until the clock
///   advances: the current millisecond is exhausted, or the clock reads
///   earlier than the last issued timestamp. Retry after roughly `yield_for`
///   milliseconds.
///
/// ```
/// use distid::{Generator, GeneratorConfig, NodeRegistry, Poll};
///
/// let config = GeneratorConfig::new(0).with_registry(NodeRegistry::new());
/// let generator = Generator::new(config).unwrap();
/// match generator.poll_id().unwrap() {
///     Poll::Ready { id } => println!("ID: {id}"),
///     Poll::Pending { yield_for } => println!("Back off for {yield_for}ms"),
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated.
    Ready {
        /// The generated ID.
        id: DistId,
    },
    /// No ID could be generated yet.
    Pending {
        /// Milliseconds until the clock is expected to allow progress.
        yield_for: u64,
    },
}
