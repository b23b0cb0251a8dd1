use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};

/// Which token is sold in the corrective swap.
///
/// Token X is the pool's first (lower-sorted) token, Y the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token X for token Y.
    XForY,
    /// Sell token Y for token X.
    YForX,
}

/// The swap instruction that brings two holdings into the ratio a tick range
/// requires before deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalancePlan {
    /// Quantity of the source token to sell, in its smallest unit.
    pub base_amount: TokenAmount,
    pub direction: SwapDirection,
}

impl RebalancePlan {
    pub fn new(base_amount: TokenAmount, direction: SwapDirection) -> Self {
        Self {
            base_amount,
            direction,
        }
    }

    /// The "holdings already match" plan. Direction is reported as `YForX`
    /// by convention; callers must treat a zero amount as no swap at all.
    pub fn no_op() -> Self {
        Self {
            base_amount: TokenAmount::zero(),
            direction: SwapDirection::YForX,
        }
    }

    pub fn is_no_op(&self) -> bool {
        self.base_amount.is_zero()
    }
}
