use anyhow::Result;
use async_trait::async_trait;
use clmm_rebalance_domain::{SqrtPriceX96, TokenAmount};
use serde::{Deserialize, Serialize};

/// Parameters for an exact-input swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Token being sold.
    pub token_in: String,
    /// Token being bought.
    pub token_out: String,
    /// Fee tier in basis points.
    pub fee_bps: u32,
    /// Recipient of the output token.
    pub recipient: String,
    /// Unix deadline in seconds.
    pub deadline_unix: u64,
    /// Exact amount of `token_in` to sell.
    pub amount_in: TokenAmount,
    /// Fill floor; the venue must fail below it.
    pub min_amount_out: TokenAmount,
    /// Optional price bound for the fill.
    pub sqrt_price_limit: Option<SqrtPriceX96>,
}

/// Amounts actually moved by a swap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
}

/// Executes market swaps. Routing and slippage protection are the venue's
/// concern; callers only state the floor they will accept.
#[async_trait]
pub trait SwapVenue: Send + Sync {
    async fn exact_input(&self, request: SwapRequest) -> Result<SwapReceipt>;
}
