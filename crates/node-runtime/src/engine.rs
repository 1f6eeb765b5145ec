//! Development consensus driver.
//!
//! Stands in for an external BFT engine in single-node operation: whenever
//! the chain state signals readiness, it drains the mempool with repeated
//! build calls and finalizes each block through verify and accept. A real
//! deployment would replace this with the network consensus engine calling
//! the same [`ChainStateApi`] port.

use shared_bus::{ChainEvent, EngineMailbox};
use std::sync::Arc;
use tc_01_chain_state::{ChainError, ChainStateApi, ChainedBlock};
use tokio::sync::watch;
use tracing::{info, warn};

/// Single-node consensus driver.
pub struct DevEngine {
    chain: Arc<dyn ChainStateApi>,
    mailbox: EngineMailbox,
    shutdown: watch::Receiver<bool>,
}

impl DevEngine {
    pub fn new(
        chain: Arc<dyn ChainStateApi>,
        mailbox: EngineMailbox,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        DevEngine {
            chain,
            mailbox,
            shutdown,
        }
    }

    /// Runs until shutdown is signaled or every notifier is dropped.
    pub async fn run(mut self) {
        info!("consensus driver started");
        loop {
            tokio::select! {
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        info!("consensus driver stopped");
                        return;
                    }
                }
                event = self.mailbox.recv() => {
                    match event {
                        Some(ChainEvent::BlockReady) => self.drain_mempool(),
                        None => {
                            info!("readiness channel closed, consensus driver stopped");
                            return;
                        }
                    }
                }
            }
        }
    }

    /// One readiness signal may stand for many pending payloads: keep
    /// building until the mempool reports empty.
    fn drain_mempool(&self) {
        loop {
            let mut block = match self.chain.build_block() {
                Ok(block) => block,
                Err(ChainError::EmptyMempool) => return,
                Err(err) => {
                    warn!(%err, "block build failed");
                    return;
                }
            };

            if let Err(err) = self.chain.verify_block(&mut block) {
                warn!(id = %block.id(), %err, "block failed verification, discarded");
                continue;
            }

            match self.chain.accept_block(&mut block) {
                Ok(()) => info!(id = %block.id(), "block finalized"),
                Err(err) => warn!(id = %block.id(), %err, "block acceptance failed"),
            }
        }
    }
}
