//! Core data structures

mod protocol;
mod record;

pub use protocol::Protocol;
pub use record::{ConnectionRecord, Secret};
