//! Gateway error type with JSON-RPC 2.0 error codes.

use tc_01_chain_state::ChainError;
use thiserror::Error;

/// Standard JSON-RPC 2.0 error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Errors reported to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload is not checksummed base-58 decoding to the exact block size.
    #[error("invalid block data: expected checksummed base-58 of exactly {expected} bytes")]
    BadPayloadEncoding { expected: usize },

    /// Block id string could not be parsed.
    #[error("problem parsing block id: {0}")]
    BadBlockId(String),

    /// No block with the requested id exists.
    #[error("block not found")]
    NotFound,

    /// Unknown JSON-RPC method.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// Structurally invalid request or parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Failure inside the chain state subsystem.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl ApiError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            ApiError::BadPayloadEncoding { .. } | ApiError::BadBlockId(_) => INVALID_PARAMS,
            ApiError::NotFound => INVALID_PARAMS,
            ApiError::MethodNotFound(_) => METHOD_NOT_FOUND,
            ApiError::InvalidRequest(_) => INVALID_REQUEST,
            ApiError::Chain(ChainError::MempoolFull { .. }) => INVALID_REQUEST,
            ApiError::Chain(_) => INTERNAL_ERROR,
        }
    }
}
