use crate::id::{MAX_COUNTER_BITS, MAX_NODE_ID, MIN_COUNTER_BITS};

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `distid` can produce.
///
/// Construction errors are fatal to the failing call: no generator is built
/// and no node ID is left claimed. Once a [`Generator`] exists, the only
/// runtime failure is [`Error::TimestampOverflow`], raised when the clock has
/// run past what the configured layout can hold.
///
/// [`Generator`]: crate::Generator
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested counter width is outside the supported range.
    #[error("Counter bits must be between {min} and {max} (got {bits})", min = MIN_COUNTER_BITS, max = MAX_COUNTER_BITS)]
    InvalidCounterBits { bits: u8 },

    /// The configured epoch lies in the future of the time source.
    #[error("epoch is ahead of current clock time: epoch={epoch_ms}ms, now={now_ms}ms")]
    EpochAhead { epoch_ms: u64, now_ms: u64 },

    /// The relative timestamp no longer fits in the layout's timestamp field.
    ///
    /// Wider counters leave fewer bits for the timestamp, so this shows up at
    /// construction when a wide counter is paired with an old epoch.
    #[error("timestamp {timestamp}ms exceeds the layout maximum of {max}ms")]
    TimestampOverflow { timestamp: u64, max: u64 },

    /// The node ID is outside the 10-bit node field.
    #[error("Node ID must be between 0 and {max} (got {node_id})", max = MAX_NODE_ID)]
    InvalidNodeId { node_id: u16 },

    /// Another live generator already owns this node ID.
    #[error("Node ID {node_id} is already in use")]
    NodeIdInUse { node_id: u16 },

    /// A format name did not match any known rendering.
    #[error("unknown format {format:?}; expected one of number, hex, base36, base62")]
    UnknownFormat { format: String },
}

impl Error {
    /// Returns `true` for invalid generator configuration (counter width,
    /// epoch, layout capacity).
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCounterBits { .. } | Self::EpochAhead { .. } | Self::TimestampOverflow { .. }
        )
    }

    /// Returns `true` for node ID range and ownership failures.
    pub const fn is_node_id(&self) -> bool {
        matches!(self, Self::InvalidNodeId { .. } | Self::NodeIdInUse { .. })
    }
}
