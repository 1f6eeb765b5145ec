//! # Core Domain Entities
//!
//! Block identity, payload, and lifecycle status. These are the types every
//! subsystem agrees on; block behavior itself lives in the chain state crate.

use crate::encoding::{self, EncodingError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Size of a block payload in bytes. Every block carries exactly this much
/// opaque data; shorter genesis payloads are zero-padded up to it.
pub const DATA_LEN: usize = 32;

/// The opaque fixed-size payload carried by a block.
pub type Payload = [u8; DATA_LEN];

/// Copies `bytes` into the front of a fresh payload, zero-padding or
/// truncating to [`DATA_LEN`].
pub fn payload_from_slice(bytes: &[u8]) -> Payload {
    let mut data = [0u8; DATA_LEN];
    let len = bytes.len().min(DATA_LEN);
    data[..len].copy_from_slice(&bytes[..len]);
    data
}

/// Identity of a block, derived as the SHA-256 digest of its serialized
/// bytes.
///
/// The all-zero id ([`BlockId::EMPTY`]) is reserved for the genesis block's
/// parent and never collides with a real digest in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct BlockId(pub [u8; 32]);

impl BlockId {
    /// The empty id, used as the genesis block's parent.
    pub const EMPTY: BlockId = BlockId([0u8; 32]);

    /// Derives the id of the given serialized content.
    pub fn from_content(bytes: &[u8]) -> Self {
        BlockId(Sha256::digest(bytes).into())
    }

    /// Raw 32-byte representation.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the reserved empty id.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encoding::encode(&self.0))
    }
}

impl FromStr for BlockId {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = encoding::decode(s)?;
        let bytes: [u8; 32] = raw.try_into().map_err(|raw: Vec<u8>| {
            EncodingError::WrongLength {
                expected: 32,
                actual: raw.len(),
            }
        })?;
        Ok(BlockId(bytes))
    }
}

/// Lifecycle status of a block as it moves through the chain state machine.
///
/// `Accepted` and `Rejected` are terminal: a decided block never re-enters
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlockStatus {
    /// Constructed but not yet validated.
    #[default]
    Unverified,
    /// Validated and durably stored, awaiting a consensus decision.
    Verified,
    /// Finalized as part of the canonical chain.
    Accepted,
    /// Discarded by validation or by consensus.
    Rejected,
}

impl BlockStatus {
    /// Whether the status is terminal.
    pub fn is_decided(&self) -> bool {
        matches!(self, BlockStatus::Accepted | BlockStatus::Rejected)
    }
}
