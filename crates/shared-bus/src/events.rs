//! Events delivered to the consensus engine.

/// A signal from the chain state subsystem to the consensus engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainEvent {
    /// At least one pending payload is available; a block can be built.
    BlockReady,
}
