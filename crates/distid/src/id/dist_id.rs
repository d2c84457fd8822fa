use core::fmt;

use crate::{Format, to_base36, to_base62, to_hex};

/// A packed 64-bit identifier.
///
/// The value is opaque on its own; use the [`Layout`] that produced it to read
/// the timestamp, node and counter fields back out. Ordering follows the raw
/// integer, which for a single generator is also emission order.
///
/// ```
/// use distid::{DistId, Format};
///
/// let id = DistId::from_raw(3_843);
/// assert_eq!(id.to_string(), "3843");
/// assert_eq!(id.render(Format::Hex), "0000000000000f03");
/// assert_eq!(id.render(Format::Base62), "zz");
/// ```
///
/// [`Layout`]: crate::Layout
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DistId {
    raw: u64,
}

impl DistId {
    pub const fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    pub const fn to_raw(&self) -> u64 {
        self.raw
    }

    pub fn to_hex(&self) -> String {
        to_hex(self.raw)
    }

    pub fn to_base36(&self) -> String {
        to_base36(self.raw)
    }

    pub fn to_base62(&self) -> String {
        to_base62(self.raw)
    }

    /// Renders the ID in the requested format.
    pub fn render(&self, format: Format) -> String {
        match format {
            Format::Number => self.raw.to_string(),
            Format::Hex => self.to_hex(),
            Format::Base36 => self.to_base36(),
            Format::Base62 => self.to_base62(),
        }
    }
}

impl fmt::Display for DistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<DistId> for u64 {
    fn from(id: DistId) -> Self {
        id.raw
    }
}

impl From<u64> for DistId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}
