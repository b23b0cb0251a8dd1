use crate::errors::RebalanceError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// A non-negative token quantity in the token's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    pub fn new(amount: impl Into<U256>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Checked entry point for amounts arriving through signed interfaces.
    pub fn from_signed(amount: i128) -> Result<Self, RebalanceError> {
        if amount < 0 {
            return Err(RebalanceError::InvalidAmount { amount });
        }
        Ok(Self(U256::from(amount as u128)))
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for TokenAmount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_signed_rejects_negative() {
        let err = TokenAmount::from_signed(-5).unwrap_err();
        assert_eq!(err, RebalanceError::InvalidAmount { amount: -5 });
    }

    #[test]
    fn from_signed_accepts_zero_and_positive() {
        assert_eq!(TokenAmount::from_signed(0).unwrap(), TokenAmount::zero());
        assert_eq!(
            TokenAmount::from_signed(1_000_000).unwrap(),
            TokenAmount::from(1_000_000u64)
        );
    }
}
