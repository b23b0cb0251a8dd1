pub mod rebalance_plan;
pub mod sqrt_price;
pub mod tick_range;

pub use rebalance_plan::{RebalancePlan, SwapDirection};
pub use sqrt_price::{MAX_SQRT_RATIO, MIN_SQRT_RATIO, SqrtPriceX96};
pub use tick_range::TickRange;
