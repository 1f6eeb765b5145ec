//! Domain layer: block entities, the mempool, and the error taxonomy.

pub mod entities;
pub mod errors;
pub mod mempool;

pub use entities::{Block, ChainBlock, ChainedBlock, StoredBlock, MAX_FUTURE_DRIFT_SECS};
pub use errors::{ChainError, Result};
pub use mempool::{Mempool, DEFAULT_MEMPOOL_CAPACITY};
