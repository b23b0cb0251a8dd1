//! In-memory collaborators for rehearsals and tests.
//!
//! These fill instantly at the snapshot's spot price, which makes them
//! useful for exercising the workflow end to end without a live venue; they
//! are not models of real execution quality.

use crate::minter::{MintReceipt, MintRequest, PositionMinter};
use crate::pool::{PoolState, PoolStateReader};
use crate::swap::{SwapReceipt, SwapRequest, SwapVenue};
use anyhow::{Result, bail};
use async_trait::async_trait;
use clmm_rebalance_domain::TokenAmount;
use clmm_rebalance_domain::math::{Q96, mul_div};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Reader that replays a fixed snapshot.
#[derive(Debug, Clone)]
pub struct FixedPoolReader {
    state: PoolState,
}

impl FixedPoolReader {
    pub fn new(state: PoolState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PoolStateReader for FixedPoolReader {
    async fn pool_state(&self, _pool: &str) -> Result<PoolState> {
        Ok(self.state.clone())
    }
}

/// Venue that fills the whole input at the snapshot's spot price, feeless.
#[derive(Debug, Clone)]
pub struct IdealSwapVenue {
    state: PoolState,
}

impl IdealSwapVenue {
    pub fn new(state: PoolState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl SwapVenue for IdealSwapVenue {
    async fn exact_input(&self, request: SwapRequest) -> Result<SwapReceipt> {
        let sp = self.state.sqrt_price_x96.as_u256();
        let amount = request.amount_in.as_u256();
        let amount_out = if request.token_in == self.state.token_x.address {
            mul_div(mul_div(amount, sp, Q96)?, sp, Q96)?
        } else if request.token_in == self.state.token_y.address {
            mul_div(mul_div(amount, Q96, sp)?, Q96, sp)?
        } else {
            bail!("unknown input token {}", request.token_in);
        };
        if amount_out < request.min_amount_out.as_u256() {
            bail!(
                "fill {} below requested floor {}",
                amount_out,
                request.min_amount_out
            );
        }
        Ok(SwapReceipt {
            amount_in: request.amount_in,
            amount_out: TokenAmount(amount_out),
        })
    }
}

/// Minter that accepts every request, assigns sequential ids, and remembers
/// what it was asked to mint. Clones share one ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerMinter {
    next_id: Arc<AtomicU64>,
    mints: Arc<Mutex<Vec<MintRequest>>>,
}

impl LedgerMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests accepted so far, oldest first.
    pub fn mints(&self) -> Vec<MintRequest> {
        self.mints.lock().expect("minter ledger poisoned").clone()
    }
}

#[async_trait]
impl PositionMinter for LedgerMinter {
    async fn mint(&self, request: MintRequest) -> Result<MintReceipt> {
        let position_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let receipt = MintReceipt {
            position_id,
            used_x: request.desired_x,
            used_y: request.desired_y,
        };
        self.mints
            .lock()
            .expect("minter ledger poisoned")
            .push(request);
        Ok(receipt)
    }
}
