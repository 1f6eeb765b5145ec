//! Default block codec using bincode.

use crate::domain::{Block, ChainError, Result};
use crate::ports::outbound::BlockCodec;

/// Serializes blocks with bincode. Only the wire fields (`parent_id`,
/// `data`, `timestamp`) are part of the encoding; runtime state is skipped.
#[derive(Debug, Default)]
pub struct BincodeBlockCodec;

impl BlockCodec for BincodeBlockCodec {
    fn marshal(&self, block: &Block) -> Result<Vec<u8>> {
        bincode::serialize(block).map_err(|e| ChainError::Serialization(e.to_string()))
    }

    fn unmarshal(&self, bytes: &[u8]) -> Result<Block> {
        bincode::deserialize(bytes).map_err(|e| ChainError::Deserialization(e.to_string()))
    }
}
