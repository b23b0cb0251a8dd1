//! Serializes one rebalance-and-deposit round against live collaborators.
//!
//! A plan only binds at the price it was computed against, so the sequence is
//! strict: read state, plan, swap, re-read state, deposit. Price drift
//! between the swap and the deposit is tolerated as dust on the deposit side;
//! drift is logged, never corrected mid-flight.

use crate::errors::ExecutionError;
use crate::minter::{MintReceipt, MintRequest, PositionMinter};
use crate::pool::{PoolState, PoolStateReader};
use crate::swap::{SwapReceipt, SwapRequest, SwapVenue};
use clmm_rebalance_domain::math::{Q96, mul_div};
use clmm_rebalance_domain::{
    RebalanceError, RebalancePlan, SqrtPriceX96, SwapDirection, TickRange, TokenAmount, plan,
};
use primitive_types::U256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Tunables for one rebalance round.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Tolerated shortfall on swap fills and deposit minimums, in basis
    /// points.
    pub max_slippage_bps: u16,
    /// Seconds from submission until venue requests expire.
    pub deadline_secs: u64,
    /// Stop after planning and report the plan without side effects.
    pub dry_run: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_slippage_bps: 50, // 0.5%
            deadline_secs: 300,
            dry_run: false,
        }
    }
}

/// What one round produced. `swap` and `mint` are `None` when the round was
/// a dry run or the plan needed no swap.
#[derive(Debug, Clone)]
pub struct RebalanceOutcome {
    pub plan: RebalancePlan,
    pub swap: Option<SwapReceipt>,
    pub mint: Option<MintReceipt>,
    /// Balances handed to the minter after the swap settled.
    pub deposited_x: TokenAmount,
    pub deposited_y: TokenAmount,
}

/// Drives read-price, plan, swap, re-read, deposit for a single position.
pub struct RebalanceWorkflow<R, V, M> {
    reader: R,
    venue: V,
    minter: M,
    config: WorkflowConfig,
}

impl<R, V, M> RebalanceWorkflow<R, V, M>
where
    R: PoolStateReader,
    V: SwapVenue,
    M: PositionMinter,
{
    pub fn new(reader: R, venue: V, minter: M, config: WorkflowConfig) -> Self {
        Self {
            reader,
            venue,
            minter,
            config,
        }
    }

    /// Runs one round and returns everything it produced.
    pub async fn execute(
        &self,
        pool: &str,
        range: TickRange,
        amount_x: TokenAmount,
        amount_y: TokenAmount,
        recipient: &str,
    ) -> Result<RebalanceOutcome, ExecutionError> {
        let state = self
            .reader
            .pool_state(pool)
            .await
            .map_err(ExecutionError::Reader)?;
        let swap_plan = plan(state.sqrt_price_x96, range, amount_x, amount_y)?;
        info!(
            pool = %state.pool,
            tick = state.tick,
            base_amount = %swap_plan.base_amount,
            direction = ?swap_plan.direction,
            dry_run = self.config.dry_run,
            "computed rebalance plan"
        );

        if self.config.dry_run {
            return Ok(RebalanceOutcome {
                plan: swap_plan,
                swap: None,
                mint: None,
                deposited_x: amount_x,
                deposited_y: amount_y,
            });
        }

        let mut held_x = amount_x.as_u256();
        let mut held_y = amount_y.as_u256();

        let swap = if swap_plan.is_no_op() {
            debug!("holdings already balanced, skipping swap");
            None
        } else {
            let (token_in, token_out) = match swap_plan.direction {
                SwapDirection::XForY => (&state.token_x, &state.token_y),
                SwapDirection::YForX => (&state.token_y, &state.token_x),
            };
            let min_amount_out = self.min_amount_out(&swap_plan, state.sqrt_price_x96)?;
            let receipt = self
                .venue
                .exact_input(SwapRequest {
                    token_in: token_in.address.clone(),
                    token_out: token_out.address.clone(),
                    fee_bps: state.fee_bps,
                    recipient: recipient.to_string(),
                    deadline_unix: self.deadline(),
                    amount_in: swap_plan.base_amount,
                    min_amount_out,
                    sqrt_price_limit: None,
                })
                .await
                .map_err(ExecutionError::Venue)?;
            info!(
                amount_in = %receipt.amount_in,
                amount_out = %receipt.amount_out,
                "swap filled"
            );
            match swap_plan.direction {
                SwapDirection::XForY => {
                    held_x = held_x.checked_sub(receipt.amount_in.as_u256()).unwrap_or_default();
                    held_y = held_y + receipt.amount_out.as_u256();
                }
                SwapDirection::YForX => {
                    held_y = held_y.checked_sub(receipt.amount_in.as_u256()).unwrap_or_default();
                    held_x = held_x + receipt.amount_out.as_u256();
                }
            }
            Some(receipt)
        };

        // The deposit prices at whatever the pool says now, not at the price
        // the plan was computed against.
        let fresh = self
            .reader
            .pool_state(pool)
            .await
            .map_err(ExecutionError::Reader)?;
        if fresh.tick != state.tick {
            warn!(
                planned_tick = state.tick,
                deposit_tick = fresh.tick,
                "price moved between plan and deposit; expect deposit-side dust"
            );
        }

        let deposited_x = TokenAmount(held_x);
        let deposited_y = TokenAmount(held_y);
        let mint = self
            .minter
            .mint(MintRequest {
                token_x: state.token_x.address.clone(),
                token_y: state.token_y.address.clone(),
                fee_bps: state.fee_bps,
                range,
                desired_x: deposited_x,
                desired_y: deposited_y,
                min_x: TokenAmount(self.with_slippage(held_x)?),
                min_y: TokenAmount(self.with_slippage(held_y)?),
                recipient: recipient.to_string(),
                deadline_unix: self.deadline(),
            })
            .await
            .map_err(ExecutionError::Minter)?;
        info!(
            position_id = mint.position_id,
            used_x = %mint.used_x,
            used_y = %mint.used_y,
            "position minted"
        );

        Ok(RebalanceOutcome {
            plan: swap_plan,
            swap,
            mint: Some(mint),
            deposited_x,
            deposited_y,
        })
    }

    /// Fill floor for the swap: the spot-price value of the input, shaved by
    /// the configured slippage tolerance.
    fn min_amount_out(
        &self,
        swap_plan: &RebalancePlan,
        sqrt_price: SqrtPriceX96,
    ) -> Result<TokenAmount, RebalanceError> {
        let sp = sqrt_price.as_u256();
        let amount = swap_plan.base_amount.as_u256();
        let expected = match swap_plan.direction {
            SwapDirection::XForY => mul_div(mul_div(amount, sp, Q96)?, sp, Q96)?,
            SwapDirection::YForX => mul_div(mul_div(amount, Q96, sp)?, Q96, sp)?,
        };
        Ok(TokenAmount(self.with_slippage(expected)?))
    }

    fn with_slippage(&self, amount: U256) -> Result<U256, RebalanceError> {
        let keep = u64::from(10_000 - self.config.max_slippage_bps.min(10_000));
        mul_div(amount, U256::from(keep), U256::from(10_000u64))
    }

    fn deadline(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        now + self.config.deadline_secs
    }
}
