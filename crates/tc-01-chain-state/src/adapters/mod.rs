//! Adapters implementing the outbound ports.

pub mod serializer;
pub mod storage;
pub mod time;

pub use serializer::BincodeBlockCodec;
pub use storage::{FileBackedKVStore, InMemoryKVStore};
pub use time::{FixedTimeSource, SystemTimeSource};
