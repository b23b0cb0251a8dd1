use crate::errors::RebalanceError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest sqrt price on the curve, `sqrt_price_at_tick(MIN_TICK)`.
pub const MIN_SQRT_RATIO: U256 = U256([4295128739, 0, 0, 0]);

/// Highest sqrt price on the curve, `sqrt_price_at_tick(MAX_TICK)`.
pub const MAX_SQRT_RATIO: U256 = U256([
    0x5D95_1D52_6398_8D26,
    0xEFD1_FC6A_5064_8849,
    0xFFFD_8963,
    0,
]);

/// Square root of a token-Y-per-token-X exchange rate in Q64.96 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SqrtPriceX96(pub U256);

impl SqrtPriceX96 {
    pub fn new(raw: impl Into<U256>) -> Self {
        Self(raw.into())
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Checks the value lies inside the window spanned by the tick domain.
    pub fn validate(&self) -> Result<(), RebalanceError> {
        if self.0 < MIN_SQRT_RATIO || self.0 > MAX_SQRT_RATIO {
            return Err(RebalanceError::SqrtPriceOutOfBounds(self.0));
        }
        Ok(())
    }
}

impl From<U256> for SqrtPriceX96 {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SqrtPriceX96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
