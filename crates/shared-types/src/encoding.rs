//! # Checksummed Base-58 Encoding
//!
//! External string form for block ids and payloads: the data bytes followed
//! by the last four bytes of their SHA-256 digest, base-58 encoded. The
//! checksum lets the API reject typos and truncated input before any chain
//! state is touched.

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Number of checksum bytes appended to the data before encoding.
const CHECKSUM_LEN: usize = 4;

/// Errors produced while decoding a checksummed base-58 string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Input contains a character outside the base-58 alphabet.
    #[error("invalid base-58 character in input")]
    InvalidCharacter,

    /// Decoded input is shorter than the checksum itself.
    #[error("input too short: {len} bytes, need at least {min}", min = CHECKSUM_LEN)]
    TooShort { len: usize },

    /// Checksum does not match the data.
    #[error("checksum mismatch")]
    BadChecksum,

    /// Decoded data is not the expected size.
    #[error("wrong data length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Encodes `bytes` with a trailing 4-byte SHA-256 checksum.
pub fn encode(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut buf = Vec::with_capacity(bytes.len() + CHECKSUM_LEN);
    buf.extend_from_slice(bytes);
    buf.extend_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    bs58::encode(buf).into_string()
}

/// Decodes a checksummed base-58 string back into its data bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, EncodingError> {
    let raw = bs58::decode(s)
        .into_vec()
        .map_err(|_| EncodingError::InvalidCharacter)?;
    if raw.len() < CHECKSUM_LEN {
        return Err(EncodingError::TooShort { len: raw.len() });
    }
    let (data, checksum) = raw.split_at(raw.len() - CHECKSUM_LEN);
    let digest = Sha256::digest(data);
    if digest[digest.len() - CHECKSUM_LEN..] != *checksum {
        return Err(EncodingError::BadChecksum);
    }
    Ok(data.to_vec())
}
