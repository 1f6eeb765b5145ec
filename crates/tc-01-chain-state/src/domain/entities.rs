//! Block entities: generic chain bookkeeping, the payload block, and the
//! persisted record format.

use crate::domain::errors::{ChainError, Result};
use serde::{Deserialize, Serialize};
use shared_types::{BlockId, BlockStatus, Payload};

/// How far ahead of local time a block's timestamp may sit.
pub const MAX_FUTURE_DRIFT_SECS: i64 = 3600;

/// Generic chain bookkeeping embedded by every block type.
///
/// Only `parent_id` travels on the wire; identity, status, and the serialized
/// form are runtime state, re-derived whenever a block is parsed or built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChainBlock {
    /// Identity of the block this one extends; empty only for genesis.
    pub parent_id: BlockId,

    #[serde(skip)]
    id: BlockId,
    #[serde(skip)]
    status: BlockStatus,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl ChainBlock {
    pub fn new(parent_id: BlockId) -> Self {
        ChainBlock {
            parent_id,
            ..Default::default()
        }
    }

    /// Binds the block to its serialized form and derives its identity
    /// from it.
    pub fn initialize(&mut self, bytes: Vec<u8>) {
        self.id = BlockId::from_content(&bytes);
        self.bytes = bytes;
    }

    /// Content-derived identity. Empty until [`ChainBlock::initialize`] has
    /// bound the serialized form.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The serialized form this block's identity was derived from.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn status(&self) -> BlockStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: BlockStatus) {
        self.status = status;
    }
}

/// Behavior every block on the chain exposes to generic callers: identity,
/// parentage, and the terminal transitions.
pub trait ChainedBlock {
    fn id(&self) -> BlockId;
    fn parent_id(&self) -> BlockId;
    fn status(&self) -> BlockStatus;
    fn mark_accepted(&mut self);
    fn mark_rejected(&mut self);
}

/// A block of the timestamp ledger: an opaque fixed-size payload and the
/// instant it was proposed, chained to a parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Chain bookkeeping (parentage, identity, status).
    pub chain: ChainBlock,
    /// The opaque payload recorded by this block.
    pub data: Payload,
    /// Creation instant, integer seconds since the Unix epoch.
    pub timestamp: i64,
}

impl Block {
    /// Constructs an unserialized block. The caller is expected to marshal
    /// it and bind the bytes via [`ChainBlock::initialize`].
    pub fn new(parent_id: BlockId, data: Payload, timestamp: i64) -> Self {
        Block {
            chain: ChainBlock::new(parent_id),
            data,
            timestamp,
        }
    }

    /// Timestamp-ordering validation against the resolved parent.
    ///
    /// A block is well-ordered iff
    /// `parent.timestamp < self.timestamp <= now + 1 hour`.
    pub fn check_ordering(&self, parent: &Block, now: i64) -> Result<()> {
        if self.timestamp <= parent.timestamp {
            return Err(ChainError::TimestampTooEarly {
                timestamp: self.timestamp,
                parent_timestamp: parent.timestamp,
            });
        }
        if self.timestamp > now + MAX_FUTURE_DRIFT_SECS {
            return Err(ChainError::TimestampTooLate {
                timestamp: self.timestamp,
                now,
            });
        }
        Ok(())
    }
}

impl ChainedBlock for Block {
    fn id(&self) -> BlockId {
        self.chain.id()
    }

    fn parent_id(&self) -> BlockId {
        self.chain.parent_id
    }

    fn status(&self) -> BlockStatus {
        self.chain.status()
    }

    fn mark_accepted(&mut self) {
        self.chain.set_status(BlockStatus::Accepted);
    }

    fn mark_rejected(&mut self) {
        self.chain.set_status(BlockStatus::Rejected);
    }
}

/// Persisted block record: the serialized block, its status at write time,
/// and an integrity checksum computed over the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBlock {
    pub bytes: Vec<u8>,
    pub status: BlockStatus,
    /// CRC32 of `bytes`, verified on every read.
    pub checksum: u32,
}

impl StoredBlock {
    pub fn new(bytes: Vec<u8>, status: BlockStatus) -> Self {
        let checksum = crc32fast::hash(&bytes);
        StoredBlock {
            bytes,
            status,
            checksum,
        }
    }

    /// Whether the checksum still matches the bytes.
    pub fn verify_checksum(&self) -> bool {
        crc32fast::hash(&self.bytes) == self.checksum
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ChainError::Serialization(e.to_string()))
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        bincode::deserialize(raw).map_err(|e| ChainError::Deserialization(e.to_string()))
    }
}
