//! Error types for the chain state subsystem.

use shared_types::BlockId;
use thiserror::Error;

/// Result type alias for chain state operations.
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors that can occur while driving the chain state machine.
///
/// Validation errors are deterministic and reported to the caller as-is;
/// persistence and codec errors abort the in-progress operation without
/// committing partial state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Genesis payload longer than the fixed block data size.
    #[error("invalid genesis data: {len} bytes exceeds the {max}-byte payload")]
    InvalidGenesisData { len: usize, max: usize },

    /// The block's parent could not be retrieved from the chain.
    #[error("could not retrieve parent block {parent_id}")]
    ParentLookup { parent_id: BlockId },

    /// Block timestamp does not advance past its parent's.
    #[error("block timestamp {timestamp} is not after parent timestamp {parent_timestamp}")]
    TimestampTooEarly {
        timestamp: i64,
        parent_timestamp: i64,
    },

    /// Block timestamp is more than an hour ahead of local time.
    #[error("block timestamp {timestamp} is more than an hour ahead of local time {now}")]
    TimestampTooLate { timestamp: i64, now: i64 },

    /// No pending payloads to build a block from.
    #[error("no pending payloads: there is no block to build")]
    EmptyMempool,

    /// Mempool is at capacity; the proposal was rejected.
    #[error("mempool is full: {capacity} payloads already pending")]
    MempoolFull { capacity: usize },

    /// Block could not be serialized.
    #[error("block serialization failed: {0}")]
    Serialization(String),

    /// Bytes could not be deserialized into a block.
    #[error("block deserialization failed: {0}")]
    Deserialization(String),

    /// The persistence boundary failed; the block must not be treated as
    /// durable.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A stored record failed its integrity check.
    #[error("stored block {id} is corrupt: checksum mismatch")]
    Corruption { id: BlockId },

    /// No block with this identity exists.
    #[error("block not found: {id}")]
    NotFound { id: BlockId },
}
