//! # Shared Types Crate
//!
//! Domain types shared across the Tempo-Chain subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identity, payload, and lifecycle types used
//!   by more than one subsystem are defined here.
//! - **Content-derived identity**: a [`BlockId`] is the SHA-256 digest of a
//!   block's serialized bytes; it is never assigned, only computed.
//! - **One external encoding**: block ids and payloads cross the API boundary
//!   as checksummed base-58 strings (the [`encoding`] module).

pub mod encoding;
pub mod entities;

pub use encoding::EncodingError;
pub use entities::*;
