//! Block codec adapters.

pub mod bincode;

pub use self::bincode::BincodeBlockCodec;
