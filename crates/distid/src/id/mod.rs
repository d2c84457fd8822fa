mod codec;
mod dist_id;
mod format;
mod layout;

pub use codec::*;
pub use dist_id::*;
pub use format::*;
pub use layout::*;
