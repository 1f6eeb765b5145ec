//! # Chain State Subsystem
//!
//! The state machine between "a client wants to record data" and "a block is
//! durably accepted": timestamp-ordering validation, genesis bootstrap,
//! pending-payload queuing, and block construction for the consensus engine.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  adapters/ - in-memory and file-backed stores, bincode codec,  │
//! │              system and fixed time sources                     │
//! └────────────────────────────────────────────────────────────────┘
//!                         ↑ implements ↑
//! ┌────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - ChainStateApi trait                       │
//! │  ports/outbound.rs - KeyValueStore, BlockCodec, TimeSource     │
//! └────────────────────────────────────────────────────────────────┘
//!                         ↑ uses ↑
//! ┌────────────────────────────────────────────────────────────────┐
//! │  domain/entities.rs - ChainBlock, Block, StoredBlock           │
//! │  domain/mempool.rs  - FIFO payload queue                       │
//! │  domain/errors.rs   - ChainError taxonomy                      │
//! │  service.rs         - ChainStateService                        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Block Lifecycle
//!
//! ```text
//! [Unverified] ──verify──→ [Verified] ──accept──→ [Accepted]
//!       │                                             (terminal)
//!       └────── validation failure / reject ──→ [Rejected]
//!                                                  (terminal)
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{Block, ChainBlock, ChainError, ChainedBlock, Mempool, Result, StoredBlock};
pub use ports::{BlockCodec, ChainStateApi, KeyValueStore, TimeSource};
pub use service::ChainStateService;
