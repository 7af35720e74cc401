//! Raw reserve to decimal conversions.
//!
//! Pool reserves arrive as unsigned on-chain integers (up to 256 bits),
//! serialized as decimal strings. All conversions go through `BigInt` /
//! `BigDecimal` so no precision is lost on the way to the pricing core.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use once_cell::sync::Lazy;
use std::str::FromStr;

/// Convert a raw reserve string to a decimal-adjusted `BigDecimal`.
///
/// # Arguments
/// * `raw` - The raw integer reserve as a decimal string
/// * `decimals` - The token's decimal places
///
/// # Returns
/// * `Some(adjusted)` if `raw` parses to a non-negative integer, `None` otherwise
pub fn reserve_to_decimal(raw: &str, decimals: u8) -> Option<BigDecimal> {
    let value = BigInt::from_str(raw).ok()?;
    if value.sign() == Sign::Minus {
        return None;
    }

    let big_value = BigDecimal::from(value);

    if decimals == 0 {
        return Some(big_value);
    }

    Some(big_value / big_pow10(decimals))
}

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u8) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp as u32))
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::*;

    #[test]
    fn adjusts_by_token_decimals() {
        let adjusted = reserve_to_decimal("1000000000000000000", 18).unwrap();
        assert_eq!(adjusted, BigDecimal::from(1));

        let adjusted = reserve_to_decimal("2500000", 6).unwrap();
        assert_eq!(adjusted, BigDecimal::from_str("2.5").unwrap());
    }

    #[test]
    fn zero_decimals_passes_through() {
        let adjusted = reserve_to_decimal("42", 0).unwrap();
        assert_eq!(adjusted, BigDecimal::from(42));
    }

    #[test]
    fn handles_values_beyond_u128() {
        // 2^200, far outside u128 range but valid on-chain
        let raw = BigInt::from(2u32).pow(200).to_string();
        let adjusted = reserve_to_decimal(&raw, 18).unwrap();
        assert!(!adjusted.is_zero());
    }

    #[test]
    fn rejects_garbage_and_negatives() {
        assert!(reserve_to_decimal("not-a-number", 18).is_none());
        assert!(reserve_to_decimal("-5", 18).is_none());
    }
}
