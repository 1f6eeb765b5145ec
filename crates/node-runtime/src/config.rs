//! Node configuration sourced from environment variables.

use anyhow::{Context, Result};
use shared_types::encoding;
use std::net::SocketAddr;
use std::path::PathBuf;
use tc_01_chain_state::domain::DEFAULT_MEMPOOL_CAPACITY;

/// Environment variables the node reads at startup.
const ENV_DATA_DIR: &str = "TEMPO_DATA_DIR";
const ENV_HTTP_ADDR: &str = "TEMPO_HTTP_ADDR";
const ENV_GENESIS_DATA: &str = "TEMPO_GENESIS_DATA";
const ENV_MEMPOOL_CAPACITY: &str = "TEMPO_MEMPOOL_CAPACITY";

/// Default JSON-RPC listen address.
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:9650";

/// Runtime configuration for a node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Directory for the block store; `None` runs fully in memory.
    pub data_dir: Option<PathBuf>,
    /// JSON-RPC listen address.
    pub http_addr: SocketAddr,
    /// Genesis payload (at most 32 bytes).
    pub genesis_data: Vec<u8>,
    /// Bound on pending payloads.
    pub mempool_capacity: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            data_dir: None,
            http_addr: DEFAULT_HTTP_ADDR.parse().expect("default address parses"),
            genesis_data: vec![0u8; 32],
            mempool_capacity: DEFAULT_MEMPOOL_CAPACITY,
        }
    }
}

impl NodeConfig {
    /// Builds a configuration from the environment, falling back to
    /// defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let mut config = NodeConfig::default();

        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(addr) = std::env::var(ENV_HTTP_ADDR) {
            config.http_addr = parse_http_addr(&addr)?;
        }
        if let Ok(data) = std::env::var(ENV_GENESIS_DATA) {
            config.genesis_data = parse_genesis_data(&data)?;
        }
        if let Ok(capacity) = std::env::var(ENV_MEMPOOL_CAPACITY) {
            config.mempool_capacity = capacity
                .parse()
                .with_context(|| format!("invalid {ENV_MEMPOOL_CAPACITY}: {capacity}"))?;
        }

        Ok(config)
    }
}

fn parse_http_addr(addr: &str) -> Result<SocketAddr> {
    addr.parse()
        .with_context(|| format!("invalid {ENV_HTTP_ADDR}: {addr}"))
}

/// Genesis payloads arrive in the same checksummed base-58 form the API
/// uses, but may be shorter than a full payload (they are zero-padded).
fn parse_genesis_data(data: &str) -> Result<Vec<u8>> {
    let raw =
        encoding::decode(data).with_context(|| format!("invalid {ENV_GENESIS_DATA}: {data}"))?;
    anyhow::ensure!(
        raw.len() <= 32,
        "{ENV_GENESIS_DATA} decodes to {} bytes, maximum is 32",
        raw.len()
    );
    Ok(raw)
}
