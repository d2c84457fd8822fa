mod basic;
mod config;
mod sequence;
mod status;

pub use basic::*;
pub use config::*;
pub use sequence::*;
pub use status::*;
