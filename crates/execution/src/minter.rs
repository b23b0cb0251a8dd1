use anyhow::Result;
use async_trait::async_trait;
use clmm_rebalance_domain::{TickRange, TokenAmount};
use serde::{Deserialize, Serialize};

/// Parameters for creating a range position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    pub token_x: String,
    pub token_y: String,
    /// Fee tier in basis points.
    pub fee_bps: u32,
    pub range: TickRange,
    /// Amounts offered for deposit.
    pub desired_x: TokenAmount,
    pub desired_y: TokenAmount,
    /// Deposit floors; the minter must fail below them.
    pub min_x: TokenAmount,
    pub min_y: TokenAmount,
    pub recipient: String,
    /// Unix deadline in seconds.
    pub deadline_unix: u64,
}

/// Identifier and consumed amounts of a freshly minted position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MintReceipt {
    pub position_id: u64,
    pub used_x: TokenAmount,
    pub used_y: TokenAmount,
}

/// Creates range positions from two final token amounts.
#[async_trait]
pub trait PositionMinter: Send + Sync {
    async fn mint(&self, request: MintRequest) -> Result<MintReceipt>;
}
