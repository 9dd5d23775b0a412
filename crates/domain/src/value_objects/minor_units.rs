use crate::error::UnitsError;
use primitive_types::U256;
use uint::FromDecStrErr;
use rust_decimal::Decimal;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A signed 256-bit token amount in minor units (the smallest indivisible
/// amount of a token, `10^decimals` per whole token).
///
/// Serializes as its plain decimal string so it is safe inside JSON, where
/// 256-bit magnitudes do not fit in a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinorUnits {
    negative: bool,
    magnitude: U256,
}

impl MinorUnits {
    /// Creates a new amount. A zero magnitude is always non-negative.
    pub fn new(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    pub fn zero() -> Self {
        Self::new(false, U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    /// Converts to a `Decimal` scaled by `10^decimals`.
    ///
    /// Returns `None` when the value exceeds what `Decimal` can hold
    /// (96-bit mantissa, scale <= 28).
    pub fn to_decimal(&self, decimals: u32) -> Option<Decimal> {
        if decimals > 28 || self.magnitude.bits() > 96 {
            return None;
        }
        let mantissa = self.magnitude.as_u128() as i128;
        let signed = if self.negative { -mantissa } else { mantissa };
        Some(Decimal::from_i128_with_scale(signed, decimals))
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl FromStr for MinorUnits {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let magnitude = U256::from_dec_str(digits).map_err(|err| match err {
            FromDecStrErr::InvalidCharacter => UnitsError::InvalidFormat(s.to_string()),
            FromDecStrErr::InvalidLength => UnitsError::ValueTooLarge(s.to_string()),
        })?;
        Ok(Self::new(negative, magnitude))
    }
}

impl Neg for MinorUnits {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(!self.negative, self.magnitude)
    }
}

impl From<U256> for MinorUnits {
    fn from(v: U256) -> Self {
        Self::new(false, v)
    }
}

impl From<u64> for MinorUnits {
    fn from(v: u64) -> Self {
        Self::new(false, U256::from(v))
    }
}

impl From<u128> for MinorUnits {
    fn from(v: u128) -> Self {
        Self::new(false, U256::from(v))
    }
}

impl From<i64> for MinorUnits {
    fn from(v: i64) -> Self {
        Self::from(v as i128)
    }
}

impl From<i128> for MinorUnits {
    fn from(v: i128) -> Self {
        Self::new(v < 0, U256::from(v.unsigned_abs()))
    }
}

impl Serialize for MinorUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MinorUnits {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_and_from_str() {
        let v = MinorUnits::from(-5_500_000_000_000_000_000i128);
        assert_eq!(v.to_string(), "-5500000000000000000");
        assert_eq!("-5500000000000000000".parse::<MinorUnits>().unwrap(), v);
    }

    #[test]
    fn test_negative_zero_normalizes() {
        let v = MinorUnits::new(true, U256::zero());
        assert!(!v.is_negative());
        assert_eq!(v, MinorUnits::zero());
        assert_eq!((-MinorUnits::zero()).to_string(), "0");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(matches!(
            "12x4".parse::<MinorUnits>(),
            Err(UnitsError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let v = MinorUnits::from(1_234_500_000_000_000_000u128);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"1234500000000000000\"");
        let back: MinorUnits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_to_decimal() {
        let v = MinorUnits::from(1_234_500_000_000_000_000u128);
        assert_eq!(v.to_decimal(18), Some(dec!(1.2345)));
        assert_eq!(MinorUnits::from(-50i64).to_decimal(1), Some(dec!(-5.0)));
        // Beyond Decimal's 96-bit mantissa.
        let huge = MinorUnits::from(U256::MAX);
        assert_eq!(huge.to_decimal(18), None);
    }
}
