use crate::math::full_math::Q96;
use crate::value_objects::sqrt_price::SqrtPriceX96;
use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};

/// How a range position's value splits between its two tokens, as Q96
/// fractions. `x_q96 + y_q96 == Q96` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueShare {
    pub x_q96: U256,
    pub y_q96: U256,
}

impl ValueShare {
    pub fn all_x() -> Self {
        Self {
            x_q96: Q96,
            y_q96: U256::zero(),
        }
    }

    pub fn all_y() -> Self {
        Self {
            x_q96: U256::zero(),
            y_q96: Q96,
        }
    }
}

/// Fraction of position value each token should hold for a range at the
/// current price.
///
/// For liquidity L between sqrt prices sa < sb at current sqrt price sp:
///   amount_x = L * (sb - sp) / (sp * sb)   (value in X units)
///   amount_y = L * (sp - sa)               (value in Y units)
/// Pricing the X leg into Y units (multiply by sp^2) gives the weights
///   value_x : value_y = (sb - sp) * sp : sb * (sp - sa)
/// which L cancels out of entirely.
pub fn ideal_value_share(
    current: SqrtPriceX96,
    bound_a: SqrtPriceX96,
    bound_b: SqrtPriceX96,
) -> ValueShare {
    let (lower, upper) = if bound_a < bound_b {
        (bound_a.as_u256(), bound_b.as_u256())
    } else {
        (bound_b.as_u256(), bound_a.as_u256())
    };
    let sp = current.as_u256();

    // Below the range the position deposits as pure X; above, pure Y.
    if sp <= lower {
        return ValueShare::all_x();
    }
    if sp >= upper {
        return ValueShare::all_y();
    }

    // Both weights fit well inside 512 bits: each factor is under 2^160.
    let weight_x: U512 = (upper - sp).full_mul(sp);
    let weight_y: U512 = upper.full_mul(sp - lower);
    let denominator = weight_x + weight_y;

    let x_q96 = weight_x * U512::from(Q96) / denominator;
    // Infallible: x_q96 <= Q96 by construction.
    let x_q96 = U256::try_from(x_q96).unwrap_or(Q96);
    ValueShare {
        x_q96,
        y_q96: Q96 - x_q96,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick::sqrt_price_at_tick;

    fn share_at(current_tick: i32, lower_tick: i32, upper_tick: i32) -> ValueShare {
        ideal_value_share(
            sqrt_price_at_tick(current_tick).unwrap(),
            sqrt_price_at_tick(lower_tick).unwrap(),
            sqrt_price_at_tick(upper_tick).unwrap(),
        )
    }

    #[test]
    fn collapses_below_and_above_range() {
        assert_eq!(share_at(-2000, -1000, 1000), ValueShare::all_x());
        assert_eq!(share_at(-1000, -1000, 1000), ValueShare::all_x());
        assert_eq!(share_at(2000, -1000, 1000), ValueShare::all_y());
        assert_eq!(share_at(1000, -1000, 1000), ValueShare::all_y());
    }

    #[test]
    fn shares_always_sum_to_one() {
        for (current, lower, upper) in [
            (0, -1000, 1000),
            (250, -500, 2000),
            (-100_000, -200_000, -50_000),
            (695, 690, 700),
            (886_000, -887_272, 887_272),
        ] {
            let share = share_at(current, lower, upper);
            assert_eq!(share.x_q96 + share.y_q96, Q96, "leaky shares in range test");
        }
    }

    #[test]
    fn symmetric_range_splits_evenly() {
        // A range geometrically centered on the current price wants half the
        // value on each side: (sb - sp) * sp == sb * (sp - sa) when sa*sb = sp^2.
        let share = share_at(0, -1000, 1000);
        let half = Q96 / 2u64;
        let diff = if share.x_q96 > half {
            share.x_q96 - half
        } else {
            half - share.x_q96
        };
        // The rounded tick-grid bounds perturb the weights by a few dozen
        // ulps at most.
        assert!(diff <= U256::from(64u64), "symmetric range should split ~50/50");
    }

    #[test]
    fn share_of_x_shrinks_as_price_climbs_through_range() {
        let mut prev = share_at(-900, -1000, 1000).x_q96;
        for tick in [-500, -100, 0, 100, 500, 900] {
            let x = share_at(tick, -1000, 1000).x_q96;
            assert!(x < prev, "X share should fall as price rises, tick {tick}");
            prev = x;
        }
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let a = sqrt_price_at_tick(-1000).unwrap();
        let b = sqrt_price_at_tick(1000).unwrap();
        let sp = sqrt_price_at_tick(10).unwrap();
        assert_eq!(ideal_value_share(sp, a, b), ideal_value_share(sp, b, a));
    }
}
