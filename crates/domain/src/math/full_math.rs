use crate::errors::RebalanceError;
use primitive_types::{U256, U512};

/// 2^96, the Q64.96 fixed-point scale.
pub const Q96: U256 = U256([0, 1 << 32, 0, 0]);

/// Returns `(a * b) / denominator` with a 512-bit intermediate, rounding down.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, RebalanceError> {
    if denominator.is_zero() {
        return Err(RebalanceError::ArithmeticOverflow("mul_div by zero"));
    }
    let product = a.full_mul(b);
    narrow(product / U512::from(denominator), "mul_div")
}

/// Returns `ceil((a * b) / denominator)` with a 512-bit intermediate.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, RebalanceError> {
    if denominator.is_zero() {
        return Err(RebalanceError::ArithmeticOverflow("mul_div by zero"));
    }
    let product = a.full_mul(b);
    let denominator = U512::from(denominator);
    let quotient = product / denominator;
    let result = if (product % denominator).is_zero() {
        quotient
    } else {
        quotient + U512::one()
    };
    narrow(result, "mul_div_rounding_up")
}

/// Returns `(a * b) / denominator` on the wide axis, rounding down.
///
/// The result stays 512-bit; only the multiplication is checked. Used where a
/// value has already outgrown 256 bits (token value priced through a Q64.96
/// ratio) but the final clamp back to a balance makes the end result fit.
pub fn mul_div_wide(a: U512, b: U256, denominator: U256) -> Result<U512, RebalanceError> {
    if denominator.is_zero() {
        return Err(RebalanceError::ArithmeticOverflow("mul_div_wide by zero"));
    }
    let product = a
        .checked_mul(U512::from(b))
        .ok_or(RebalanceError::ArithmeticOverflow("mul_div_wide"))?;
    Ok(product / U512::from(denominator))
}

/// Narrows a 512-bit value back to 256 bits, erroring instead of truncating.
pub fn narrow(value: U512, context: &'static str) -> Result<U256, RebalanceError> {
    U256::try_from(value).map_err(|_| RebalanceError::ArithmeticOverflow(context))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q96_is_two_to_the_96() {
        assert_eq!(Q96, U256::one() << 96);
    }

    #[test]
    fn mul_div_basic() {
        let r = mul_div(U256::from(10u64), U256::from(20u64), U256::from(5u64)).unwrap();
        assert_eq!(r, U256::from(40u64));
    }

    #[test]
    fn mul_div_survives_256_bit_products() {
        // (MAX * MAX) / MAX = MAX only works with a wide intermediate.
        let max = U256::MAX;
        assert_eq!(mul_div(max, max, max).unwrap(), max);
    }

    #[test]
    fn mul_div_rounds_down_and_up() {
        let a = U256::from(7u64);
        let b = U256::from(3u64);
        let d = U256::from(2u64);
        assert_eq!(mul_div(a, b, d).unwrap(), U256::from(10u64));
        assert_eq!(mul_div_rounding_up(a, b, d).unwrap(), U256::from(11u64));
        // exact division: both agree
        assert_eq!(
            mul_div_rounding_up(U256::from(4u64), b, d).unwrap(),
            mul_div(U256::from(4u64), b, d).unwrap()
        );
    }

    #[test]
    fn mul_div_reports_overflow() {
        let err = mul_div(U256::MAX, U256::MAX, U256::one()).unwrap_err();
        assert!(matches!(err, RebalanceError::ArithmeticOverflow(_)));
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        let err = mul_div(U256::one(), U256::one(), U256::zero()).unwrap_err();
        assert!(matches!(err, RebalanceError::ArithmeticOverflow(_)));
    }

    #[test]
    fn mul_div_wide_keeps_width() {
        let a = U512::from(U256::MAX);
        let r = mul_div_wide(a, Q96, U256::one()).unwrap();
        assert_eq!(r / U512::from(Q96), a);
    }
}
