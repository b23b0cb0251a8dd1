//! Execution layer for rebalance deposits.
//!
//! The domain crate decides what to swap; this crate talks to the outside
//! world and keeps the sequence honest:
//! - Trait boundaries for the pool reader, swap venue and position minter
//! - A workflow that serializes read-price, plan, swap, re-read, deposit
//! - In-memory collaborators for rehearsals and tests

/// Prelude module for convenient imports.
pub mod prelude;

/// Failure taxonomy for the sequence.
pub mod errors;
/// Position minter boundary.
pub mod minter;
/// Pool state boundary.
pub mod pool;
/// In-memory collaborators.
pub mod sim;
/// Swap venue boundary.
pub mod swap;
/// Rebalance-and-deposit sequencing.
pub mod workflow;
