//! # Shared Bus - Chain-to-Engine Signaling
//!
//! Carries the readiness signal from the chain state subsystem to the
//! consensus engine: "at least one block can be built".
//!
//! ## Delivery Semantics
//!
//! - **At-least-once**: every notification while the mailbox is empty is
//!   delivered.
//! - **Coalescing**: notifications raised while a signal is already pending
//!   are absorbed into it. One delivered signal therefore stands for *one or
//!   more* pending payloads, and the engine is expected to drain the mempool
//!   with repeated build calls rather than assume one signal per block.
//! - **Non-blocking**: the producer side never waits; a closed mailbox drops
//!   the signal with a warning.

pub mod channel;
pub mod events;

pub use channel::{engine_channel, EngineMailbox, EngineNotifier};
pub use events::ChainEvent;

/// Capacity of the engine mailbox. A single slot is what makes notification
/// delivery coalesce.
pub const ENGINE_CHANNEL_CAPACITY: usize = 1;
