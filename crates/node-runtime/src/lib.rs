//! # Tempo-Chain Node Runtime
//!
//! Orchestrates the subsystems of a single node:
//!
//! 1. Load configuration from the environment.
//! 2. Open the block store (file-backed when a data directory is
//!    configured, in-memory otherwise).
//! 3. Bootstrap or resume the chain state.
//! 4. Start the development consensus driver draining readiness signals.
//! 5. Serve the JSON-RPC API until shutdown.
//!
//! ## Startup Sequence
//!
//! ```text
//! config ──→ store/codec/clock ──→ ChainStateService.initialize
//!                                         │
//!               ┌─────────────────────────┴──────────────┐
//!               ↓                                        ↓
//!        DevEngine (readiness mailbox)        ApiGatewayService (HTTP)
//! ```

pub mod config;
pub mod engine;

pub use config::NodeConfig;
pub use engine::DevEngine;
