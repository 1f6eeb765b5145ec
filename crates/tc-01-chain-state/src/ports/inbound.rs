//! # Inbound Port - ChainStateApi
//!
//! Primary driving port of the chain state subsystem. The consensus engine
//! uses the block lifecycle half (`build_block`, `parse_block`,
//! `verify_block`, `accept_block`, `reject_block`); the API gateway uses the
//! submission and read half (`propose_block`, `get_block`, `last_accepted`).

use crate::domain::{Block, Result};
use shared_types::{BlockId, Payload};

/// Primary API for the chain state subsystem.
pub trait ChainStateApi: Send + Sync {
    /// Bootstraps the chain from a genesis payload on first run, or resumes
    /// persisted state. Idempotent: repeated calls are no-ops.
    ///
    /// # Errors
    /// - `InvalidGenesisData`: payload longer than the fixed block data size
    /// - `Persistence`: the bootstrap could not be committed
    fn initialize(&self, genesis_data: &[u8]) -> Result<()>;

    /// Queues a payload for inclusion in a future block and signals the
    /// consensus engine that a block is buildable.
    ///
    /// # Errors
    /// - `MempoolFull`: the pool is at capacity
    fn propose_block(&self, data: Payload) -> Result<()>;

    /// Pops the oldest pending payload into a new block extending the
    /// preferred tip, timestamped now. Re-signals the engine if payloads
    /// remain. Does not mutate the preferred or last-accepted tips.
    ///
    /// # Errors
    /// - `EmptyMempool`: nothing is pending
    /// - `Serialization`: the new block could not be marshaled
    fn build_block(&self) -> Result<Block>;

    /// Deserializes a block received from the network or read from storage,
    /// binding its identity to the supplied bytes.
    ///
    /// # Errors
    /// - `Deserialization`: malformed input
    fn parse_block(&self, bytes: &[u8]) -> Result<Block>;

    /// Constructs a block without validating or persisting it.
    fn new_block(&self, parent_id: BlockId, data: Payload, timestamp: i64) -> Result<Block>;

    /// Validates a block and durably persists it.
    ///
    /// Idempotent on decided blocks: verifying an accepted or rejected block
    /// is a no-op success. On validation failure the block is marked
    /// rejected; on persistence failure its status is left unchanged.
    ///
    /// # Errors
    /// - `ParentLookup`: the parent cannot be retrieved
    /// - `TimestampTooEarly` / `TimestampTooLate`: ordering violations
    /// - `Persistence`: the durable write did not complete
    fn verify_block(&self, block: &mut Block) -> Result<()>;

    /// Finalizes a block: marks it accepted and moves both the preferred and
    /// last-accepted tips to it. Called by the consensus engine once its
    /// decision is final.
    fn accept_block(&self, block: &mut Block) -> Result<()>;

    /// Discards a block the consensus engine decided against.
    fn reject_block(&self, block: &mut Block) -> Result<()>;

    /// Fetches a block by identity, restoring its persisted status.
    ///
    /// # Errors
    /// - `NotFound`: no such block
    /// - `Corruption`: the stored record failed its integrity check
    fn get_block(&self, id: &BlockId) -> Result<Block>;

    /// Identity of the most recently finalized block.
    fn last_accepted(&self) -> BlockId;

    /// Identity of the tip the chain currently proposes to extend.
    fn preferred(&self) -> BlockId;

    /// Number of payloads waiting in the mempool.
    fn pending_payloads(&self) -> usize;
}
