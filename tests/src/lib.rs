//! # Tempo-Chain Test Suite
//!
//! Unified test crate for cross-subsystem flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem flows
//!     └── flows.rs      # propose → signal → build → verify → accept
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p tc-tests
//!
//! # By module
//! cargo test -p tc-tests integration::
//! ```

pub mod integration;
