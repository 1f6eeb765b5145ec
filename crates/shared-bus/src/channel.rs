//! The engine notification channel.

use crate::events::ChainEvent;
use crate::ENGINE_CHANNEL_CAPACITY;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Creates a connected notifier/mailbox pair.
pub fn engine_channel() -> (EngineNotifier, EngineMailbox) {
    let (sender, receiver) = mpsc::channel(ENGINE_CHANNEL_CAPACITY);
    (EngineNotifier { sender }, EngineMailbox { receiver })
}

/// Producer side of the readiness channel, held by the chain state service.
///
/// Cloneable so every proposal path can signal the engine.
#[derive(Debug, Clone)]
pub struct EngineNotifier {
    sender: mpsc::Sender<ChainEvent>,
}

impl EngineNotifier {
    /// Signals that a block is ready to be built.
    ///
    /// Never blocks. A signal already sitting in the mailbox absorbs this
    /// one; a closed mailbox drops it.
    pub fn notify_block_ready(&self) {
        match self.sender.try_send(ChainEvent::BlockReady) {
            Ok(()) => debug!("block-ready signal raised"),
            Err(TrySendError::Full(_)) => {
                debug!("block-ready signal already pending, coalesced")
            }
            Err(TrySendError::Closed(_)) => {
                warn!("engine mailbox closed, block-ready signal dropped")
            }
        }
    }
}

/// Consumer side of the readiness channel, held by the consensus engine.
#[derive(Debug)]
pub struct EngineMailbox {
    receiver: mpsc::Receiver<ChainEvent>,
}

impl EngineMailbox {
    /// Waits for the next signal. Returns `None` once every notifier has
    /// been dropped.
    pub async fn recv(&mut self) -> Option<ChainEvent> {
        self.receiver.recv().await
    }

    /// Takes a pending signal without waiting.
    pub fn try_recv(&mut self) -> Option<ChainEvent> {
        self.receiver.try_recv().ok()
    }
}
