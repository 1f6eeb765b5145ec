//! Ports: the chain state API (inbound) and the boundaries it drives
//! (outbound).

pub mod inbound;
pub mod outbound;

pub use inbound::ChainStateApi;
pub use outbound::{BlockCodec, KeyValueStore, TimeSource};
