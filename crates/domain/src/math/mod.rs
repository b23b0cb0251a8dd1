pub mod full_math;
pub mod share;
pub mod tick;

pub use full_math::{Q96, mul_div, mul_div_rounding_up};
pub use share::{ValueShare, ideal_value_share};
pub use tick::{MAX_TICK, MIN_TICK, sqrt_price_at_tick};
