//! Decides which token to sell, and how much, before a range deposit.
//!
//! Given the pool's current sqrt price, a target tick range and the two
//! available balances, [`plan`] compares the value split the range wants
//! against the split the balances imply and emits the corrective swap. The
//! computation is pure and synchronous; it reads no state and is safe to call
//! from any number of threads.

use crate::errors::RebalanceError;
use crate::math::full_math::{Q96, mul_div_wide, narrow};
use crate::math::share::ideal_value_share;
use crate::math::tick::sqrt_price_at_tick;
use crate::token::TokenAmount;
use crate::value_objects::rebalance_plan::{RebalancePlan, SwapDirection};
use crate::value_objects::sqrt_price::SqrtPriceX96;
use crate::value_objects::tick_range::TickRange;
use primitive_types::U512;

/// Computes the swap that moves `(amount_x, amount_y)` toward the value split
/// `range` requires at `sqrt_price`.
///
/// Both balances are compared on the token-Y value axis: the X balance is
/// priced through `sqrt_price` squared, the Y balance counts as-is. Every
/// division rounds so the returned amount is a slight underestimate of the
/// exact rebalancing amount, and the result is clamped to the balance of the
/// token being sold. Underestimating leaves harmless dust; overestimating
/// could starve the deposit of one side entirely, so that direction is never
/// rounded toward.
pub fn plan(
    sqrt_price: SqrtPriceX96,
    range: TickRange,
    amount_x: TokenAmount,
    amount_y: TokenAmount,
) -> Result<RebalancePlan, RebalanceError> {
    sqrt_price.validate()?;
    let lower = sqrt_price_at_tick(range.lower())?;
    let upper = sqrt_price_at_tick(range.upper())?;
    let share = ideal_value_share(sqrt_price, lower, upper);

    // A share pinned to one side wants the entire opposite balance sold;
    // answering directly keeps these plans exact instead of losing a unit or
    // two to the value round trip.
    if share.y_q96.is_zero() {
        return Ok(if amount_y.is_zero() {
            RebalancePlan::no_op()
        } else {
            RebalancePlan::new(amount_y, SwapDirection::YForX)
        });
    }
    if share.x_q96.is_zero() {
        return Ok(if amount_x.is_zero() {
            RebalancePlan::no_op()
        } else {
            RebalancePlan::new(amount_x, SwapDirection::XForY)
        });
    }

    let sp = sqrt_price.as_u256();
    // value_x = amount_x * sp^2 / 2^192, kept wide: the product of a 256-bit
    // balance and a price above 1 can exceed 256 bits.
    let value_x = {
        let scaled = mul_div_wide(U512::from(amount_x.as_u256()), sp, Q96)?;
        mul_div_wide(scaled, sp, Q96)?
    };
    let value_y = U512::from(amount_y.as_u256());
    let total = value_x
        .checked_add(value_y)
        .ok_or(RebalanceError::ArithmeticOverflow("total value"))?;
    if total.is_zero() {
        return Ok(RebalancePlan::no_op());
    }

    // Target X value bracketed between its floor and ceiling so each branch
    // can round against the swap amount.
    let target_numerator = total
        .checked_mul(U512::from(share.x_q96))
        .ok_or(RebalanceError::ArithmeticOverflow("target value"))?;
    let q96 = U512::from(Q96);
    let target_floor = target_numerator / q96;
    let target_ceil = if (target_numerator % q96).is_zero() {
        target_floor
    } else {
        target_floor + U512::one()
    };

    if value_x > target_ceil {
        // X in excess: sell the surplus, converted back into X units.
        let excess = value_x - target_ceil;
        let unscaled = mul_div_wide(mul_div_wide(excess, Q96, sp)?, Q96, sp)?;
        let base = unscaled.min(U512::from(amount_x.as_u256()));
        Ok(RebalancePlan::new(
            TokenAmount(narrow(base, "swap amount")?),
            SwapDirection::XForY,
        ))
    } else if value_x < target_floor {
        // Y in excess; the deficit is already denominated in Y units.
        let deficit = target_floor - value_x;
        let base = deficit.min(U512::from(amount_y.as_u256()));
        Ok(RebalancePlan::new(
            TokenAmount(narrow(base, "swap amount")?),
            SwapDirection::YForX,
        ))
    } else {
        Ok(RebalancePlan::no_op())
    }
}
