//! # API Gateway Subsystem
//!
//! Thin JSON-RPC 2.0 surface over the chain state subsystem:
//!
//! - `tempo_proposeBlock` — submit a payload (checksummed base-58, exactly
//!   32 bytes) for inclusion in a future block.
//! - `tempo_getBlock` — read a block by id; an absent or empty id returns
//!   the most recently accepted block.
//!
//! The gateway translates requests into calls on the [`ChainStateApi`]
//! inbound port and never touches chain internals itself.
//!
//! [`ChainStateApi`]: tc_01_chain_state::ChainStateApi

pub mod error;
pub mod rpc;
pub mod service;

pub use error::ApiError;
pub use rpc::{GetBlockArgs, GetBlockReply, ProposeBlockArgs, ProposeBlockReply, RpcHandlers};
pub use service::ApiGatewayService;
