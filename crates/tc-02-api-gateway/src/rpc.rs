//! Typed RPC handlers and their argument/reply shapes.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use shared_types::{encoding, BlockId, Payload, DATA_LEN};
use std::sync::Arc;
use tc_01_chain_state::{ChainError, ChainStateApi, ChainedBlock};
use tracing::debug;

/// Arguments to `tempo_proposeBlock`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposeBlockArgs {
    /// Payload for the new block: checksummed base-58 of exactly 32 bytes.
    pub data: String,
}

/// Reply from `tempo_proposeBlock`.
#[derive(Debug, Clone, Serialize)]
pub struct ProposeBlockReply {
    pub success: bool,
}

/// Arguments to `tempo_getBlock`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetBlockArgs {
    /// Id of the block to fetch. Absent or empty returns the most recently
    /// accepted block.
    #[serde(default)]
    pub id: Option<String>,
}

/// Reply from `tempo_getBlock`.
#[derive(Debug, Clone, Serialize)]
pub struct GetBlockReply {
    pub id: String,
    #[serde(rename = "parentID")]
    pub parent_id: String,
    pub timestamp: i64,
    /// The block payload as checksummed base-58.
    pub data: String,
}

/// RPC methods, bound to the chain state port.
pub struct RpcHandlers {
    chain: Arc<dyn ChainStateApi>,
}

impl RpcHandlers {
    pub fn new(chain: Arc<dyn ChainStateApi>) -> Self {
        RpcHandlers { chain }
    }

    /// Submits a payload for inclusion in a future block.
    pub fn propose_block(&self, args: ProposeBlockArgs) -> Result<ProposeBlockReply, ApiError> {
        let raw = encoding::decode(&args.data)
            .map_err(|_| ApiError::BadPayloadEncoding { expected: DATA_LEN })?;
        if raw.len() != DATA_LEN {
            return Err(ApiError::BadPayloadEncoding { expected: DATA_LEN });
        }
        let mut data: Payload = [0u8; DATA_LEN];
        data.copy_from_slice(&raw);

        self.chain.propose_block(data)?;
        debug!("payload queued via RPC");
        Ok(ProposeBlockReply { success: true })
    }

    /// Fetches a block; an absent or empty id means the last accepted block.
    pub fn get_block(&self, args: GetBlockArgs) -> Result<GetBlockReply, ApiError> {
        let id = match args.id.as_deref() {
            None | Some("") => self.chain.last_accepted(),
            Some(s) => s
                .parse::<BlockId>()
                .map_err(|e| ApiError::BadBlockId(e.to_string()))?,
        };

        let block = self.chain.get_block(&id).map_err(|err| match err {
            ChainError::NotFound { .. } => ApiError::NotFound,
            other => ApiError::Chain(other),
        })?;

        Ok(GetBlockReply {
            id: block.id().to_string(),
            parent_id: block.parent_id().to_string(),
            timestamp: block.timestamp,
            data: encoding::encode(&block.data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::engine_channel;
    use tc_01_chain_state::adapters::{BincodeBlockCodec, InMemoryKVStore, SystemTimeSource};
    use tc_01_chain_state::ChainStateService;

    fn handlers() -> RpcHandlers {
        let (notifier, _mailbox) = engine_channel();
        let service = Arc::new(ChainStateService::new(
            Box::new(InMemoryKVStore::new()),
            Box::new(BincodeBlockCodec),
            Arc::new(SystemTimeSource),
            notifier,
        ));
        service.initialize(&[0u8; DATA_LEN]).unwrap();
        let chain: Arc<dyn ChainStateApi> = service;
        RpcHandlers::new(chain)
    }

    fn valid_data() -> String {
        encoding::encode(&[0x11u8; DATA_LEN])
    }

    #[test]
    fn propose_accepts_a_well_formed_payload() {
        let handlers = handlers();
        let reply = handlers
            .propose_block(ProposeBlockArgs { data: valid_data() })
            .unwrap();
        assert!(reply.success);
    }

    #[test]
    fn propose_rejects_wrong_sized_payloads() {
        let handlers = handlers();
        let short = encoding::encode(&[1, 2, 3]);
        assert!(matches!(
            handlers.propose_block(ProposeBlockArgs { data: short }),
            Err(ApiError::BadPayloadEncoding { expected: 32 })
        ));
    }

    #[test]
    fn propose_rejects_garbage_encoding() {
        let handlers = handlers();
        assert!(matches!(
            handlers.propose_block(ProposeBlockArgs {
                data: "not base58 0OIl".into()
            }),
            Err(ApiError::BadPayloadEncoding { .. })
        ));
    }

    #[test]
    fn get_block_defaults_to_the_last_accepted_block() {
        let handlers = handlers();
        let reply = handlers.get_block(GetBlockArgs::default()).unwrap();
        assert_eq!(reply.timestamp, 0);
        assert_eq!(
            encoding::decode(&reply.data).unwrap(),
            vec![0u8; DATA_LEN]
        );

        // An explicit empty string behaves the same way.
        let by_empty = handlers
            .get_block(GetBlockArgs {
                id: Some(String::new()),
            })
            .unwrap();
        assert_eq!(by_empty.id, reply.id);
    }

    #[test]
    fn get_block_resolves_an_explicit_id() {
        let handlers = handlers();
        let genesis = handlers.get_block(GetBlockArgs::default()).unwrap();
        let again = handlers
            .get_block(GetBlockArgs {
                id: Some(genesis.id.clone()),
            })
            .unwrap();
        assert_eq!(again.id, genesis.id);
        assert_eq!(again.parent_id, BlockId::EMPTY.to_string());
    }

    #[test]
    fn get_block_rejects_a_malformed_id() {
        let handlers = handlers();
        assert!(matches!(
            handlers.get_block(GetBlockArgs {
                id: Some("!!!".into())
            }),
            Err(ApiError::BadBlockId(_))
        ));
    }

    #[test]
    fn get_block_reports_unknown_ids() {
        let handlers = handlers();
        let unknown = BlockId::from_content(b"unknown").to_string();
        assert!(matches!(
            handlers.get_block(GetBlockArgs { id: Some(unknown) }),
            Err(ApiError::NotFound)
        ));
    }
}
