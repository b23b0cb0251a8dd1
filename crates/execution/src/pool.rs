use anyhow::Result;
use async_trait::async_trait;
use clmm_rebalance_domain::{SqrtPriceX96, Token};
use serde::{Deserialize, Serialize};

/// State of a pool as observed by a single read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolState {
    /// Pool identifier as the venue knows it.
    pub pool: String,
    /// First token in the pool's canonical ordering.
    pub token_x: Token,
    /// Second token in the pool's canonical ordering.
    pub token_y: Token,
    /// Pool fee in basis points.
    pub fee_bps: u32,
    /// Current sqrt price.
    pub sqrt_price_x96: SqrtPriceX96,
    /// Current tick.
    pub tick: i32,
}

/// Reads the current price and token ordering of a pool.
#[async_trait]
pub trait PoolStateReader: Send + Sync {
    async fn pool_state(&self, pool: &str) -> Result<PoolState>;
}
