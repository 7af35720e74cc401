use std::sync::Arc;

use anyhow::{anyhow, Result};
use bigdecimal::BigDecimal;
use log::trace;
use num_traits::{One, Zero};

use crate::{
    config::PricingConfig,
    store::{PairLookup, Snapshot, Token},
};

/// Price resolution over a pair snapshot.
///
/// Resolves token prices using the whitelist approach:
/// 1. Wrapped native token → exactly 1 (it is the pricing unit)
/// 2. Any other token → derive through the first whitelisted anchor pair
///    holding more than the minimum native-denominated liquidity
///
/// The whitelist is ordered and the first qualifying anchor wins. This is a
/// contract, not a best-price search: reordering the whitelist changes
/// computed prices, so callers must preserve the declared order to
/// reproduce historical values.
pub struct PriceResolver<L> {
    config: Arc<PricingConfig>,
    factory: L,
}

impl<L> PriceResolver<L> {
    pub fn new(config: Arc<PricingConfig>, factory: L) -> Self {
        Self { config, factory }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// USD price of one unit of the wrapped native token.
    ///
    /// Reads the two designated native/stablecoin pairs (stablecoin is
    /// token1 in both) and weights each stablecoin's quote by its pair's
    /// share of the combined native-side reserve, trusting whichever pool
    /// currently holds more of the native token.
    ///
    /// Missing pairs degrade gracefully: one pair prices alone, none (or a
    /// fully drained market) prices to zero.
    pub fn native_price_usd(&self, snapshot: &Snapshot) -> BigDecimal {
        let [pair_a, pair_b] = &self.config.stable_pairs;

        match (snapshot.pair(pair_a), snapshot.pair(pair_b)) {
            (Some(a), Some(b)) => {
                let total_native = &a.reserve0 + &b.reserve0;
                if total_native.is_zero() {
                    return BigDecimal::zero();
                }
                let weight_a = &a.reserve0 / &total_native;
                let weight_b = &b.reserve0 / &total_native;
                &a.token1_price * &weight_a + &b.token1_price * &weight_b
            }
            (Some(a), None) => a.token1_price.clone(),
            (None, Some(b)) => b.token1_price.clone(),
            (None, None) => BigDecimal::zero(),
        }
    }
}

impl<L: PairLookup> PriceResolver<L> {
    /// Price of `token` in wrapped-native units, derived transitively
    /// through the whitelist, or zero if no anchor pair qualifies.
    ///
    /// For each whitelist entry in declared order, asks the factory for a
    /// pair between `token` and the entry. A pair qualifies only if its
    /// native-denominated reserve strictly exceeds the minimum liquidity
    /// threshold; an illiquid pair falls through to the next entry rather
    /// than anchoring a manipulable price.
    ///
    /// A pair address reported by the factory but absent from the snapshot
    /// (or a pair referencing an unknown token) is a store-consistency
    /// fault and surfaces as an error, never as a substituted price.
    pub fn find_native_per_token(&self, token: &Token, snapshot: &Snapshot) -> Result<BigDecimal> {
        if self.config.is_native(&token.address) {
            return Ok(BigDecimal::one());
        }

        for anchor in &self.config.whitelist {
            let Some(pair_address) = self.factory.pair_for(&token.address, anchor) else {
                continue;
            };

            let pair = snapshot.pair(&pair_address).ok_or_else(|| {
                anyhow!(
                    "pair {pair_address} reported for ({}, {anchor}) but missing from snapshot",
                    token.address
                )
            })?;

            if pair.token0 == token.address
                && pair.reserve_native > self.config.minimum_liquidity_threshold
            {
                let token1 = snapshot.token(&pair.token1).ok_or_else(|| {
                    anyhow!("token {} of pair {} missing from snapshot", pair.token1, pair.address)
                })?;
                // token1 per our token, times native per token1
                return Ok(&pair.token1_price * &token1.derived_native);
            }
            if pair.token1 == token.address
                && pair.reserve_native > self.config.minimum_liquidity_threshold
            {
                let token0 = snapshot.token(&pair.token0).ok_or_else(|| {
                    anyhow!("token {} of pair {} missing from snapshot", pair.token0, pair.address)
                })?;
                // token0 per our token, times native per token0
                return Ok(&pair.token0_price * &token0.derived_native);
            }

            trace!(
                "pair {} below liquidity threshold, trying next anchor",
                pair.address
            );
        }

        Ok(BigDecimal::zero())
    }
}
