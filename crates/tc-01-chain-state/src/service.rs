//! Chain state service: genesis bootstrap, block lifecycle, and mempool
//! drain, implementing the [`ChainStateApi`] inbound port.

use crate::domain::{Block, ChainError, ChainedBlock, Mempool, Result, StoredBlock};
use crate::ports::inbound::ChainStateApi;
use crate::ports::outbound::{BlockCodec, KeyValueStore, TimeSource};
use parking_lot::{Mutex, RwLock};
use shared_bus::EngineNotifier;
use shared_types::{payload_from_slice, BlockId, BlockStatus, Payload, DATA_LEN};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage keys for chain metadata.
const KEY_INITIALIZED: &[u8] = b"meta/initialized";
const KEY_LAST_ACCEPTED: &[u8] = b"meta/last_accepted";
const KEY_PREFERRED: &[u8] = b"meta/preferred";

fn block_key(id: &BlockId) -> Vec<u8> {
    let mut key = Vec::with_capacity(6 + 32);
    key.extend_from_slice(b"block/");
    key.extend_from_slice(id.as_bytes());
    key
}

/// Mutable chain-state fields, owned exclusively by the service.
#[derive(Debug, Clone, Copy, Default)]
struct ChainState {
    last_accepted: BlockId,
    preferred: BlockId,
    initialized: bool,
}

/// The chain state manager.
///
/// Owns the mempool and the preferred/last-accepted tips, and drives the
/// persistence, codec, and clock boundaries. The service is synchronous; the
/// persistence commit is its only potentially slow call.
pub struct ChainStateService {
    store: Mutex<Box<dyn KeyValueStore>>,
    codec: Box<dyn BlockCodec>,
    clock: Arc<dyn TimeSource>,
    state: RwLock<ChainState>,
    mempool: Mutex<Mempool>,
    notifier: EngineNotifier,
}

impl ChainStateService {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        codec: Box<dyn BlockCodec>,
        clock: Arc<dyn TimeSource>,
        notifier: EngineNotifier,
    ) -> Self {
        ChainStateService {
            store: Mutex::new(store),
            codec,
            clock,
            state: RwLock::new(ChainState::default()),
            mempool: Mutex::new(Mempool::new()),
            notifier,
        }
    }

    /// Replaces the default mempool bound.
    pub fn with_mempool_capacity(self, capacity: usize) -> Self {
        ChainStateService {
            mempool: Mutex::new(Mempool::with_capacity(capacity)),
            ..self
        }
    }

    /// Constructs a block and binds it to its serialized form.
    fn make_block(&self, parent_id: BlockId, data: Payload, timestamp: i64) -> Result<Block> {
        let mut block = Block::new(parent_id, data, timestamp);
        let bytes = self.codec.marshal(&block)?;
        block.chain.initialize(bytes);
        Ok(block)
    }

    /// Loads a block from a store the caller already holds locked.
    fn get_block_from(&self, store: &dyn KeyValueStore, id: &BlockId) -> Result<Block> {
        let raw = store
            .get(&block_key(id))?
            .ok_or(ChainError::NotFound { id: *id })?;
        let record = StoredBlock::from_bytes(&raw)?;
        if !record.verify_checksum() {
            return Err(ChainError::Corruption { id: *id });
        }
        let mut block = self.codec.unmarshal(&record.bytes)?;
        block.chain.initialize(record.bytes);
        block.chain.set_status(record.status);
        Ok(block)
    }

    fn read_state_id(store: &dyn KeyValueStore, key: &[u8]) -> Result<BlockId> {
        let raw = store.get(key)?.ok_or_else(|| {
            ChainError::Persistence(format!(
                "chain marked initialized but {} is missing",
                String::from_utf8_lossy(key)
            ))
        })?;
        let bytes: [u8; 32] = raw.as_slice().try_into().map_err(|_| {
            ChainError::Persistence(format!(
                "malformed {} entry: {} bytes",
                String::from_utf8_lossy(key),
                raw.len()
            ))
        })?;
        Ok(BlockId(bytes))
    }
}

impl ChainStateApi for ChainStateService {
    fn initialize(&self, genesis_data: &[u8]) -> Result<()> {
        if self.state.read().initialized {
            debug!("chain state already initialized, skipping bootstrap");
            return Ok(());
        }

        let mut store = self.store.lock();

        // A restarted node resumes from persisted state instead of
        // bootstrapping again.
        if store.get(KEY_INITIALIZED)?.is_some() {
            let last_accepted = Self::read_state_id(&**store, KEY_LAST_ACCEPTED)?;
            let preferred = Self::read_state_id(&**store, KEY_PREFERRED)?;
            *self.state.write() = ChainState {
                last_accepted,
                preferred,
                initialized: true,
            };
            info!(%last_accepted, "resumed chain state from storage");
            return Ok(());
        }

        if genesis_data.len() > DATA_LEN {
            return Err(ChainError::InvalidGenesisData {
                len: genesis_data.len(),
                max: DATA_LEN,
            });
        }

        // The genesis block has no parent to validate against, so it is
        // persisted directly and marked accepted instead of going through
        // verification.
        let mut genesis = self.make_block(BlockId::EMPTY, payload_from_slice(genesis_data), 0)?;
        genesis.mark_accepted();
        let genesis_id = genesis.id();

        let record = StoredBlock::new(genesis.chain.bytes().to_vec(), BlockStatus::Accepted);
        store.put(&block_key(&genesis_id), &record.to_bytes()?)?;
        store.put(KEY_LAST_ACCEPTED, genesis_id.as_bytes())?;
        store.put(KEY_PREFERRED, genesis_id.as_bytes())?;
        store.put(KEY_INITIALIZED, &[1])?;
        store.commit()?;

        *self.state.write() = ChainState {
            last_accepted: genesis_id,
            preferred: genesis_id,
            initialized: true,
        };
        info!(genesis = %genesis_id, "chain bootstrapped from genesis payload");
        Ok(())
    }

    fn propose_block(&self, data: Payload) -> Result<()> {
        self.mempool.lock().push(data)?;
        // Signaled only after the append is visible to builders.
        self.notifier.notify_block_ready();
        Ok(())
    }

    fn build_block(&self) -> Result<Block> {
        let (data, more_pending) = {
            let mut mempool = self.mempool.lock();
            let data = mempool.pop_front().ok_or(ChainError::EmptyMempool)?;
            (data, !mempool.is_empty())
        };

        let parent_id = self.state.read().preferred;
        let block = self.make_block(parent_id, data, self.clock.now())?;

        // The engine drains the mempool one block per call; tell it there is
        // more to build.
        if more_pending {
            self.notifier.notify_block_ready();
        }

        debug!(id = %block.id(), parent = %parent_id, "built block from mempool");
        Ok(block)
    }

    fn parse_block(&self, bytes: &[u8]) -> Result<Block> {
        let mut block = self.codec.unmarshal(bytes)?;
        block.chain.initialize(bytes.to_vec());
        Ok(block)
    }

    fn new_block(&self, parent_id: BlockId, data: Payload, timestamp: i64) -> Result<Block> {
        self.make_block(parent_id, data, timestamp)
    }

    fn verify_block(&self, block: &mut Block) -> Result<()> {
        // Decided blocks never re-validate or re-persist.
        if block.status().is_decided() {
            debug!(id = %block.id(), status = ?block.status(), "verify on a decided block is a no-op");
            return Ok(());
        }

        let mut store = self.store.lock();

        let parent_id = block.parent_id();
        let parent = self.get_block_from(&**store, &parent_id).map_err(|err| {
            warn!(id = %block.id(), %parent_id, %err, "parent lookup failed");
            ChainError::ParentLookup { parent_id }
        })?;

        if let Err(err) = block.check_ordering(&parent, self.clock.now()) {
            block.mark_rejected();
            return Err(err);
        }

        // Persist and flush before reporting success; a failure here leaves
        // the status unchanged so the caller cannot mistake the block for
        // durable.
        let record = StoredBlock::new(block.chain.bytes().to_vec(), BlockStatus::Verified);
        store.put(&block_key(&block.id()), &record.to_bytes()?)?;
        store.commit()?;

        block.chain.set_status(BlockStatus::Verified);
        debug!(id = %block.id(), "block verified and persisted");
        Ok(())
    }

    fn accept_block(&self, block: &mut Block) -> Result<()> {
        let id = block.id();

        let mut store = self.store.lock();
        let record = StoredBlock::new(block.chain.bytes().to_vec(), BlockStatus::Accepted);
        store.put(&block_key(&id), &record.to_bytes()?)?;
        store.put(KEY_LAST_ACCEPTED, id.as_bytes())?;
        store.put(KEY_PREFERRED, id.as_bytes())?;
        store.commit()?;

        block.mark_accepted();
        let mut state = self.state.write();
        state.last_accepted = id;
        state.preferred = id;
        info!(%id, timestamp = block.timestamp, "block accepted");
        Ok(())
    }

    fn reject_block(&self, block: &mut Block) -> Result<()> {
        block.mark_rejected();
        debug!(id = %block.id(), "block rejected and discarded");
        Ok(())
    }

    fn get_block(&self, id: &BlockId) -> Result<Block> {
        let store = self.store.lock();
        self.get_block_from(&**store, id)
    }

    fn last_accepted(&self) -> BlockId {
        self.state.read().last_accepted
    }

    fn preferred(&self) -> BlockId {
        self.state.read().preferred
    }

    fn pending_payloads(&self) -> usize {
        self.mempool.lock().len()
    }
}
