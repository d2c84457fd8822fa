#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
#[cfg(feature = "async-tokio")]
mod futures;
mod generator;
mod id;
mod registry;
mod sink;
mod time;

pub use crate::error::*;
#[cfg(feature = "async-tokio")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::registry::*;
pub use crate::sink::*;
pub use crate::time::*;
