use primitive_types::U256;
use thiserror::Error;

/// Errors produced by tick conversion and rebalance planning.
///
/// Every variant is terminal for the call that produced it: the planner is a
/// deterministic pure function, so retrying with the same inputs yields the
/// same error. Callers decide whether to abort the surrounding
/// swap-and-deposit sequence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceError {
    /// Tick index outside the representable curve domain.
    #[error("tick {tick} is outside the supported tick range")]
    TickOutOfRange { tick: i32 },

    /// Lower tick bound is not strictly below the upper bound.
    #[error("invalid tick range: lower {lower} must be strictly below upper {upper}")]
    InvalidRange { lower: i32, upper: i32 },

    /// A token amount that cannot be negative was negative.
    #[error("token amount {amount} is negative")]
    InvalidAmount { amount: i128 },

    /// Sqrt price outside the window spanned by the tick domain.
    #[error("sqrt price {0} is outside the representable curve")]
    SqrtPriceOutOfBounds(U256),

    /// An intermediate product exceeded the 512-bit working width.
    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),
}
