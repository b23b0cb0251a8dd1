use crate::errors::RebalanceError;
use crate::value_objects::sqrt_price::SqrtPriceX96;
use primitive_types::{U256, U512};

/// Lowest tick index representable on the curve.
pub const MIN_TICK: i32 = -887_272;
/// Highest tick index representable on the curve.
pub const MAX_TICK: i32 = 887_272;

/// `sqrt(1.0001^-2^i)` in Q128.128, one entry per bit of the tick magnitude.
const SQRT_RATIO_MULTIPLIERS: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// Returns `sqrt(1.0001^tick) * 2^96`.
///
/// Strictly increasing over the tick domain. The multiply ladder, the
/// reciprocal for positive ticks, and the round-up shift from Q128 down to
/// Q96 reproduce the reference curve bit for bit, so on-grid values here are
/// exactly the values a downstream swap venue prices with.
pub fn sqrt_price_at_tick(tick: i32) -> Result<SqrtPriceX96, RebalanceError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(RebalanceError::TickOutOfRange { tick });
    }
    let abs_tick = tick.unsigned_abs();

    // Accumulate sqrt(1.0001^-abs_tick) in Q128.128.
    let mut ratio = if abs_tick & 1 != 0 {
        U256::from(SQRT_RATIO_MULTIPLIERS[0])
    } else {
        U256::one() << 128
    };
    for (bit, multiplier) in SQRT_RATIO_MULTIPLIERS.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            ratio = mul_shift_128(ratio, *multiplier)?;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up.
    let mask = (U256::one() << 32) - 1;
    let mut sqrt_price = ratio >> 32;
    if !(ratio & mask).is_zero() {
        sqrt_price = sqrt_price + U256::one();
    }
    Ok(SqrtPriceX96(sqrt_price))
}

/// `(x * y) >> 128` where the product needs more than 256 bits.
fn mul_shift_128(x: U256, y: u128) -> Result<U256, RebalanceError> {
    let product: U512 = x.full_mul(U256::from(y));
    U256::try_from(product >> 128)
        .map_err(|_| RebalanceError::ArithmeticOverflow("tick ratio ladder"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::sqrt_price::{MAX_SQRT_RATIO, MIN_SQRT_RATIO};

    #[test]
    fn tick_zero_is_exactly_one() {
        // price 1.0 -> sqrt price 2^96
        let sqrt = sqrt_price_at_tick(0).unwrap();
        assert_eq!(sqrt.as_u256(), U256::one() << 96);
    }

    #[test]
    fn domain_endpoints_match_curve_bounds() {
        assert_eq!(sqrt_price_at_tick(MIN_TICK).unwrap().as_u256(), MIN_SQRT_RATIO);
        assert_eq!(sqrt_price_at_tick(MAX_TICK).unwrap().as_u256(), MAX_SQRT_RATIO);
    }

    #[test]
    fn out_of_domain_ticks_are_rejected() {
        assert_eq!(
            sqrt_price_at_tick(MIN_TICK - 1).unwrap_err(),
            RebalanceError::TickOutOfRange { tick: MIN_TICK - 1 }
        );
        assert!(sqrt_price_at_tick(MAX_TICK + 1).is_err());
    }

    #[test]
    fn strictly_monotonic_near_zero() {
        let mut prev = sqrt_price_at_tick(-5).unwrap();
        for tick in -4..=5 {
            let sqrt = sqrt_price_at_tick(tick).unwrap();
            assert!(sqrt > prev, "curve must be strictly increasing at tick {tick}");
            prev = sqrt;
        }
    }

    #[test]
    fn strictly_monotonic_across_domain() {
        let mut prev = sqrt_price_at_tick(MIN_TICK).unwrap();
        let mut tick = MIN_TICK + 50_021;
        while tick < MAX_TICK {
            let sqrt = sqrt_price_at_tick(tick).unwrap();
            assert!(sqrt > prev, "curve must be strictly increasing at tick {tick}");
            prev = sqrt;
            tick += 50_021;
        }
        assert!(sqrt_price_at_tick(MAX_TICK).unwrap() > prev);
    }

    #[test]
    fn doubling_tick_is_near_sqrt_two() {
        // 1.0001^6931 ~= 2, so the sqrt price is ~sqrt(2) * 2^96.
        let sqrt = sqrt_price_at_tick(6931).unwrap().as_u256();
        let q96 = U256::one() << 96;
        let lo = q96 * 14_138u64 / 10_000u64;
        let hi = q96 * 14_145u64 / 10_000u64;
        assert!(sqrt > lo && sqrt < hi, "tick 6931 should price near sqrt(2)");
    }

    #[test]
    fn negated_ticks_multiply_to_one() {
        // sqrt(1.0001^t) * sqrt(1.0001^-t) == 1, up to fixed-point rounding.
        for tick in [1, 100, 1000, 50_000, 400_000] {
            let up = sqrt_price_at_tick(tick).unwrap().as_u256();
            let down = sqrt_price_at_tick(-tick).unwrap().as_u256();
            let product = up.full_mul(down) >> 96;
            let product = U256::try_from(product).unwrap();
            let q96 = U256::one() << 96;
            let diff = if product > q96 { product - q96 } else { q96 - product };
            assert!(diff < q96 / 1_000_000_000u64, "tick {tick} inverse drifted");
        }
    }
}
