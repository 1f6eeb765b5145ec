//! Tempo-Chain node entry point.

use anyhow::{Context, Result};
use node_runtime::{DevEngine, NodeConfig};
use shared_bus::engine_channel;
use std::sync::Arc;
use tc_01_chain_state::adapters::{
    BincodeBlockCodec, FileBackedKVStore, InMemoryKVStore, SystemTimeSource,
};
use tc_01_chain_state::{ChainStateApi, ChainStateService, KeyValueStore};
use tc_02_api_gateway::ApiGatewayService;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NodeConfig::from_env().context("loading configuration")?;
    info!("starting Tempo-Chain node");
    info!(
        http_addr = %config.http_addr,
        mempool_capacity = config.mempool_capacity,
        data_dir = ?config.data_dir,
        "configuration loaded"
    );

    let store: Box<dyn KeyValueStore> = match &config.data_dir {
        Some(dir) => Box::new(FileBackedKVStore::open(dir.join("chain.db"))),
        None => Box::new(InMemoryKVStore::new()),
    };

    let (notifier, mailbox) = engine_channel();
    let service = Arc::new(
        ChainStateService::new(
            store,
            Box::new(BincodeBlockCodec),
            Arc::new(SystemTimeSource),
            notifier,
        )
        .with_mempool_capacity(config.mempool_capacity),
    );

    let chain: Arc<dyn ChainStateApi> = service.clone();
    chain
        .initialize(&config.genesis_data)
        .context("initializing chain state")?;
    info!(last_accepted = %chain.last_accepted(), "chain state ready");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let engine = DevEngine::new(service.clone(), mailbox, shutdown_rx);
    let engine_handle = tokio::spawn(engine.run());

    let mut api = ApiGatewayService::new(config.http_addr, service);
    tokio::select! {
        result = api.start() => {
            if let Err(err) = result {
                error!(%err, "API gateway failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    api.shutdown();
    let _ = shutdown_tx.send(true);
    let _ = engine_handle.await;
    info!("node stopped");
    Ok(())
}
