use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;

use super::Token;
use crate::utils::reserve_to_decimal;

/// Liquidity pair state as of one snapshot.
///
/// Price convention (Uniswap style):
/// - `token0_price` = token0 per token1 (`reserve0 / reserve1`)
/// - `token1_price` = token1 per token0 (`reserve1 / reserve0`)
///
/// `reserve_native` is the pool's reserve expressed in wrapped-native units
/// and gates whether this pair may anchor a derived price.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Pair {
    pub address: String,

    // Token pair metadata (denormalized)
    pub token0: String,
    pub token1: String,
    pub token0_decimals: u8,
    pub token1_decimals: u8,

    // Raw reserves as reported on-chain
    pub reserve0_raw: String,
    pub reserve1_raw: String,

    // Decimal-adjusted reserves
    pub reserve0: BigDecimal,
    pub reserve1: BigDecimal,
    pub reserve_native: BigDecimal,

    // Spot prices, consistent with reserves at read time
    pub token0_price: BigDecimal,
    pub token1_price: BigDecimal,

    // Last update reference
    pub block_number: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pair {
    pub fn new(address: String, token0: &Token, token1: &Token) -> Self {
        Self {
            address: address.to_lowercase(),
            token0: token0.address.clone(),
            token1: token1.address.clone(),
            token0_decimals: token0.decimals,
            token1_decimals: token1.decimals,
            reserve0_raw: String::from("0"),
            reserve1_raw: String::from("0"),
            reserve0: BigDecimal::zero(),
            reserve1: BigDecimal::zero(),
            reserve_native: BigDecimal::zero(),
            token0_price: BigDecimal::zero(),
            token1_price: BigDecimal::zero(),
            block_number: 0,
            updated_at: None,
        }
    }

    /// Update reserves from a sync event and recompute spot prices from the
    /// reserve ratio. Updates from blocks older than the current state are
    /// ignored.
    pub fn update_reserves(
        &mut self,
        reserve0_raw: &str,
        reserve1_raw: &str,
        block_number: u64,
        timestamp: u64,
    ) {
        if block_number < self.block_number {
            return;
        }

        self.block_number = block_number;
        self.updated_at = DateTime::from_timestamp(timestamp as i64, 0);

        self.reserve0_raw = reserve0_raw.to_string();
        self.reserve1_raw = reserve1_raw.to_string();

        self.reserve0 =
            reserve_to_decimal(reserve0_raw, self.token0_decimals).unwrap_or_else(BigDecimal::zero);
        self.reserve1 =
            reserve_to_decimal(reserve1_raw, self.token1_decimals).unwrap_or_else(BigDecimal::zero);

        // A drained side makes the ratio meaningless; zero both directions
        // rather than divide by zero.
        self.token1_price = if self.reserve0.is_zero() {
            BigDecimal::zero()
        } else {
            &self.reserve1 / &self.reserve0
        };
        self.token0_price = if self.reserve1.is_zero() {
            BigDecimal::zero()
        } else {
            &self.reserve0 / &self.reserve1
        };
    }

    /// Recompute the native-denominated reserve from the tokens' current
    /// derived prices. Called after either side's `derived_native` changes.
    pub fn update_reserve_native(&mut self, derived0: &BigDecimal, derived1: &BigDecimal) {
        self.reserve_native = &self.reserve0 * derived0 + &self.reserve1 * derived1;
    }
}
