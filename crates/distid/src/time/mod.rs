mod interface;
mod monotonic;
mod system;

pub use interface::*;
pub use monotonic::*;
pub use system::*;

use core::time::Duration;

/// Default epoch: Wednesday, January 1, 2020 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_577_836_800_000);
