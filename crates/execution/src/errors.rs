use clmm_rebalance_domain::RebalanceError;
use thiserror::Error;

/// Failures of the swap-then-deposit sequence.
///
/// Nothing here is retried internally; each variant aborts the sequence and
/// reports which collaborator failed.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("rebalance planning failed: {0}")]
    Plan(#[from] RebalanceError),

    #[error("pool state read failed: {0}")]
    Reader(anyhow::Error),

    #[error("swap submission failed: {0}")]
    Venue(anyhow::Error),

    #[error("position mint failed: {0}")]
    Minter(anyhow::Error),
}
