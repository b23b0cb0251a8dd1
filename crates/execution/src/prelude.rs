//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types from the crate.

pub use crate::errors::ExecutionError;
pub use crate::minter::{MintReceipt, MintRequest, PositionMinter};
pub use crate::pool::{PoolState, PoolStateReader};
pub use crate::sim::{FixedPoolReader, IdealSwapVenue, LedgerMinter};
pub use crate::swap::{SwapReceipt, SwapRequest, SwapVenue};
pub use crate::workflow::{RebalanceOutcome, RebalanceWorkflow, WorkflowConfig};
