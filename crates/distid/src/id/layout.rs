use crate::{DistId, Error, Result};

/// Width of the node ID field.
pub const NODE_ID_BITS: u8 = 10;

/// Largest node ID representable in [`NODE_ID_BITS`].
pub const MAX_NODE_ID: u16 = (1 << NODE_ID_BITS) - 1;

/// Narrowest supported counter field.
pub const MIN_COUNTER_BITS: u8 = 8;

/// Widest supported counter field.
pub const MAX_COUNTER_BITS: u8 = 20;

/// Counter width used when none is configured.
pub const DEFAULT_COUNTER_BITS: u8 = 12;

// Even the widest counter must leave room for a timestamp in a u64.
const _: () = assert!((NODE_ID_BITS + MAX_COUNTER_BITS) as u32 + 32 <= u64::BITS);

/// Bit layout of a [`DistId`] for one counter width.
///
/// The counter occupies the low bits, the node ID sits directly above it, and
/// the timestamp takes everything that is left:
///
/// ```text
///  Bit Index:  63                 10+C  10+C-1           C  C-1            0
///              +----------------------+-------------------+----------------+
///  Field:      | timestamp (54 - C)   | node ID (10)      | counter (C)    |
///              +----------------------+-------------------+----------------+
///              |<------------ MSB ------- 64 bits ------- LSB ------------>|
/// ```
///
/// With the default 12-bit counter this leaves 42 bits (~139 years) of
/// millisecond timestamp. A 20-bit counter leaves 34 bits (~198 days), so wide
/// counters need a recent epoch.
///
/// # Example
///
/// ```
/// use distid::Layout;
///
/// let layout = Layout::new(12).unwrap();
/// let id = layout.pack(1000, 2, 1);
/// assert_eq!(layout.timestamp_of(id), 1000);
/// assert_eq!(layout.node_id_of(id), 2);
/// assert_eq!(layout.counter_of(id), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    counter_bits: u8,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            counter_bits: DEFAULT_COUNTER_BITS,
        }
    }
}

impl Layout {
    /// Builds the layout for a counter field of `counter_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCounterBits`] unless `counter_bits` is within
    /// [`MIN_COUNTER_BITS`]`..=`[`MAX_COUNTER_BITS`].
    pub fn new(counter_bits: u8) -> Result<Self> {
        if !(MIN_COUNTER_BITS..=MAX_COUNTER_BITS).contains(&counter_bits) {
            return Err(Error::InvalidCounterBits { bits: counter_bits });
        }
        Ok(Self { counter_bits })
    }

    pub const fn counter_bits(&self) -> u8 {
        self.counter_bits
    }

    /// Number of bits to shift the node ID to its position.
    pub const fn node_shift(&self) -> u32 {
        self.counter_bits as u32
    }

    /// Number of bits to shift the timestamp to its position.
    pub const fn timestamp_shift(&self) -> u32 {
        (NODE_ID_BITS + self.counter_bits) as u32
    }

    pub const fn timestamp_bits(&self) -> u32 {
        u64::BITS - self.timestamp_shift()
    }

    /// Largest relative timestamp (in milliseconds) the layout can hold.
    pub const fn max_timestamp(&self) -> u64 {
        (1 << self.timestamp_bits()) - 1
    }

    /// Largest counter value; one tick holds `max_counter() + 1` IDs.
    pub const fn max_counter(&self) -> u64 {
        (1 << self.counter_bits) - 1
    }

    /// Passes `timestamp` through if it fits the timestamp field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampOverflow`] when it does not.
    pub fn check_timestamp(&self, timestamp: u64) -> Result<u64> {
        let max = self.max_timestamp();
        if timestamp > max {
            return Err(Error::TimestampOverflow { timestamp, max });
        }
        Ok(timestamp)
    }

    /// Packs the three fields into one ID.
    ///
    /// Values wider than their field are truncated to it; callers validate
    /// beforehand.
    pub const fn pack(&self, timestamp: u64, node_id: u16, counter: u64) -> DistId {
        debug_assert!(timestamp <= self.max_timestamp(), "timestamp overflow");
        debug_assert!(node_id <= MAX_NODE_ID, "node_id overflow");
        debug_assert!(counter <= self.max_counter(), "counter overflow");
        let timestamp = (timestamp & self.max_timestamp()) << self.timestamp_shift();
        let node_id = ((node_id & MAX_NODE_ID) as u64) << self.node_shift();
        let counter = counter & self.max_counter();
        DistId::from_raw(timestamp | node_id | counter)
    }

    /// Extracts the timestamp field.
    pub const fn timestamp_of(&self, id: DistId) -> u64 {
        (id.to_raw() >> self.timestamp_shift()) & self.max_timestamp()
    }

    /// Extracts the node ID field.
    pub const fn node_id_of(&self, id: DistId) -> u16 {
        ((id.to_raw() >> self.node_shift()) & MAX_NODE_ID as u64) as u16
    }

    /// Extracts the counter field.
    pub const fn counter_of(&self, id: DistId) -> u64 {
        id.to_raw() & self.max_counter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_width_bounds_are_inclusive() {
        assert!(Layout::new(MIN_COUNTER_BITS).is_ok());
        assert!(Layout::new(MAX_COUNTER_BITS).is_ok());
        assert_eq!(
            Layout::new(7),
            Err(Error::InvalidCounterBits { bits: 7 })
        );
        assert_eq!(
            Layout::new(21),
            Err(Error::InvalidCounterBits { bits: 21 })
        );
    }

    #[test]
    fn default_layout() {
        let layout = Layout::default();
        assert_eq!(layout.counter_bits(), 12);
        assert_eq!(layout.node_shift(), 12);
        assert_eq!(layout.timestamp_shift(), 22);
        assert_eq!(layout.timestamp_bits(), 42);
        assert_eq!(layout.max_counter(), 4095);
    }

    // The timestamp shift tracks the counter width (10 + counter bits) rather
    // than sitting at a fixed bit 23. A fixed shift would overlap the node
    // field for counters wider than 13 bits and leave a gap below it for
    // narrower ones.
    #[test]
    fn timestamp_shift_tracks_counter_width() {
        for bits in MIN_COUNTER_BITS..=MAX_COUNTER_BITS {
            let layout = Layout::new(bits).unwrap();
            assert_eq!(layout.timestamp_shift(), u32::from(bits) + 10);

            let ts = layout.pack(layout.max_timestamp(), 0, 0).to_raw();
            let node = layout.pack(0, MAX_NODE_ID, 0).to_raw();
            let counter = layout.pack(0, 0, layout.max_counter()).to_raw();

            assert_eq!(ts & node, 0, "timestamp overlaps node at {bits} bits");
            assert_eq!(node & counter, 0, "node overlaps counter at {bits} bits");
            assert_eq!(ts | node | counter, u64::MAX, "gap in layout at {bits} bits");
        }
    }

    #[test]
    fn fields_round_trip_through_accessors() {
        let layout = Layout::new(8).unwrap();
        let id = layout.pack(123_456_789, 1023, 255);
        assert_eq!(layout.timestamp_of(id), 123_456_789);
        assert_eq!(layout.node_id_of(id), 1023);
        assert_eq!(layout.counter_of(id), 255);
    }

    #[test]
    fn check_timestamp_rejects_overflow() {
        let layout = Layout::new(20).unwrap();
        let max = layout.max_timestamp();
        assert_eq!(max, (1 << 34) - 1);
        assert_eq!(layout.check_timestamp(max), Ok(max));
        assert_eq!(
            layout.check_timestamp(max + 1),
            Err(Error::TimestampOverflow {
                timestamp: max + 1,
                max
            })
        );
    }

    #[test]
    fn ordering_follows_timestamp_then_counter() {
        let layout = Layout::default();
        let a = layout.pack(10, 5, 4095);
        let b = layout.pack(11, 5, 0);
        let c = layout.pack(11, 5, 1);
        assert!(a < b && b < c);
    }
}
