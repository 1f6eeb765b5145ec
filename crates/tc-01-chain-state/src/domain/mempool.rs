//! FIFO queue of pending payloads awaiting inclusion in a block.

use crate::domain::errors::{ChainError, Result};
use shared_types::Payload;
use std::collections::VecDeque;

/// Default bound on pending payloads. A full pool rejects further proposals
/// rather than grow without limit.
pub const DEFAULT_MEMPOOL_CAPACITY: usize = 1024;

/// Ordered queue of payloads. Strict FIFO, no deduplication.
#[derive(Debug)]
pub struct Mempool {
    queue: VecDeque<Payload>,
    capacity: usize,
}

impl Mempool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMPOOL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Mempool {
            queue: VecDeque::new(),
            capacity,
        }
    }

    /// Appends a payload to the tail.
    pub fn push(&mut self, data: Payload) -> Result<()> {
        if self.queue.len() >= self.capacity {
            return Err(ChainError::MempoolFull {
                capacity: self.capacity,
            });
        }
        self.queue.push_back(data);
        Ok(())
    }

    /// Removes and returns the oldest payload.
    pub fn pop_front(&mut self) -> Option<Payload> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Mempool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(tag: u8) -> Payload {
        [tag; 32]
    }

    #[test]
    fn preserves_fifo_order() {
        let mut pool = Mempool::new();
        pool.push(payload(1)).unwrap();
        pool.push(payload(2)).unwrap();
        pool.push(payload(3)).unwrap();

        assert_eq!(pool.pop_front(), Some(payload(1)));
        assert_eq!(pool.pop_front(), Some(payload(2)));
        assert_eq!(pool.pop_front(), Some(payload(3)));
        assert_eq!(pool.pop_front(), None);
    }

    #[test]
    fn accepts_duplicate_payloads() {
        let mut pool = Mempool::new();
        pool.push(payload(7)).unwrap();
        pool.push(payload(7)).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn rejects_push_at_capacity() {
        let mut pool = Mempool::with_capacity(2);
        pool.push(payload(1)).unwrap();
        pool.push(payload(2)).unwrap();

        assert_eq!(
            pool.push(payload(3)),
            Err(ChainError::MempoolFull { capacity: 2 })
        );

        // Popping frees a slot.
        pool.pop_front();
        assert!(pool.push(payload(3)).is_ok());
    }

    #[test]
    fn empty_pool_reports_empty() {
        let mut pool = Mempool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.pop_front(), None);
    }
}
