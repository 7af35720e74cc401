//! Whitelist-gated USD attribution for volume, fee, and liquidity figures.
//!
//! Raw event amounts are only as trustworthy as the tokens behind them:
//! a leg priced through a non-whitelisted token is excluded from tracked
//! statistics instead of polluting them.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use once_cell::sync::Lazy;

use crate::store::{NativeTokenPrice, Token};

use super::PriceResolver;

static TWO: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(2));

impl<L> PriceResolver<L> {
    /// Tracked swap volume in USD.
    ///
    /// Both tokens whitelisted: the mean of the two legs' USD values, which
    /// smooths small pricing discrepancies between the two sides. Exactly
    /// one whitelisted: that leg's value alone. Neither: zero, the trade is
    /// excluded from tracked volume entirely.
    pub fn tracked_volume_usd(
        &self,
        bundle: &NativeTokenPrice,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        let price0 = &token0.derived_native * &bundle.price_usd;
        let price1 = &token1.derived_native * &bundle.price_usd;

        let whitelisted0 = self.config().is_whitelisted(&token0.address);
        let whitelisted1 = self.config().is_whitelisted(&token1.address);

        if whitelisted0 && whitelisted1 {
            return (amount0 * &price0 + amount1 * &price1) / &*TWO;
        }
        if whitelisted0 {
            return amount0 * &price0;
        }
        if whitelisted1 {
            return amount1 * &price1;
        }

        BigDecimal::zero()
    }

    /// Tracked fee volume in USD: the imbalance between the two legs' USD
    /// values, visible only when both tokens are whitelisted. Always
    /// non-negative regardless of which leg is larger.
    pub fn tracked_fee_volume_usd(
        &self,
        bundle: &NativeTokenPrice,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        if !self.config().is_whitelisted(&token0.address)
            || !self.config().is_whitelisted(&token1.address)
        {
            return BigDecimal::zero();
        }

        let usd0 = amount0 * &(&token0.derived_native * &bundle.price_usd);
        let usd1 = amount1 * &(&token1.derived_native * &bundle.price_usd);

        if usd0 >= usd1 {
            usd0 - usd1
        } else {
            usd1 - usd0
        }
    }

    /// Tracked liquidity in USD.
    ///
    /// Both tokens whitelisted: the sum of both legs. Exactly one: twice
    /// that leg's value, extrapolating from a balanced pool. Neither: zero.
    pub fn tracked_liquidity_usd(
        &self,
        bundle: &NativeTokenPrice,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        let price0 = &token0.derived_native * &bundle.price_usd;
        let price1 = &token1.derived_native * &bundle.price_usd;

        let whitelisted0 = self.config().is_whitelisted(&token0.address);
        let whitelisted1 = self.config().is_whitelisted(&token1.address);

        if whitelisted0 && whitelisted1 {
            return amount0 * &price0 + amount1 * &price1;
        }
        if whitelisted0 {
            return amount0 * &price0 * &*TWO;
        }
        if whitelisted1 {
            return amount1 * &price1 * &*TWO;
        }

        BigDecimal::zero()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use super::*;
    use crate::{config::PricingConfig, store::PairIndex};

    const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
    const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const UNI: &str = "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984";
    const LINK: &str = "0x514910771af9ca656af840dff83e8264ecf986ca";

    fn bd(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn token(address: &str, symbol: &str, derived_native: &str) -> Token {
        let mut token = Token::new(
            address.to_string(),
            symbol.to_string(),
            symbol.to_string(),
            18,
        );
        token.derived_native = bd(derived_native);
        token
    }

    fn resolver() -> PriceResolver<PairIndex> {
        let config = PricingConfig::new(
            WETH.to_string(),
            ["0xpair-a".to_string(), "0xpair-b".to_string()],
            vec![WETH.to_string(), USDC.to_string()],
            bd("0.001"),
        );
        PriceResolver::new(Arc::new(config), PairIndex::new())
    }

    fn bundle() -> NativeTokenPrice {
        NativeTokenPrice::new(bd("10"))
    }

    #[test]
    fn volume_averages_both_whitelisted_legs() {
        let resolver = resolver();
        // price0 = 2 * 10 = 20, price1 = 0.5 * 10 = 5
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(USDC, "USDC", "0.5");

        let volume =
            resolver.tracked_volume_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);

        // (5*20 + 20*5) / 2
        assert_eq!(volume, bd("100"));
    }

    #[test]
    fn volume_takes_single_whitelisted_leg() {
        let resolver = resolver();
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(UNI, "UNI", "0.5");

        let volume =
            resolver.tracked_volume_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);
        assert_eq!(volume, bd("100"));

        // Symmetric case: only token1 whitelisted
        let volume =
            resolver.tracked_volume_usd(&bundle(), &bd("5"), &token1, &bd("20"), &token0);
        assert_eq!(volume, bd("400"));
    }

    #[test]
    fn volume_of_untrusted_trade_is_zero() {
        let resolver = resolver();
        let token0 = token(UNI, "UNI", "2");
        let token1 = token(LINK, "LINK", "0.5");

        let volume =
            resolver.tracked_volume_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);
        assert!(volume.is_zero());
    }

    #[test]
    fn fee_volume_is_the_leg_imbalance() {
        let resolver = resolver();
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(USDC, "USDC", "0.5");

        // Balanced legs: 100 vs 100
        let fee = resolver.tracked_fee_volume_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);
        assert!(fee.is_zero());

        // 100 vs 110, larger leg on either side
        let fee = resolver.tracked_fee_volume_usd(&bundle(), &bd("5"), &token0, &bd("22"), &token1);
        assert_eq!(fee, bd("10"));
        let fee = resolver.tracked_fee_volume_usd(&bundle(), &bd("5.5"), &token0, &bd("20"), &token1);
        assert_eq!(fee, bd("10"));
    }

    #[test]
    fn fee_volume_requires_both_whitelisted() {
        let resolver = resolver();
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(UNI, "UNI", "0.5");

        let fee = resolver.tracked_fee_volume_usd(&bundle(), &bd("5"), &token0, &bd("22"), &token1);
        assert!(fee.is_zero());
    }

    #[test]
    fn liquidity_sums_both_whitelisted_legs() {
        let resolver = resolver();
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(USDC, "USDC", "0.5");

        let liquidity =
            resolver.tracked_liquidity_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);
        assert_eq!(liquidity, bd("200"));
    }

    #[test]
    fn liquidity_doubles_single_whitelisted_leg() {
        let resolver = resolver();
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(UNI, "UNI", "0.5");

        // 5 * 20 * 2
        let liquidity =
            resolver.tracked_liquidity_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);
        assert_eq!(liquidity, bd("200"));

        let liquidity =
            resolver.tracked_liquidity_usd(&bundle(), &bd("5"), &token1, &bd("20"), &token0);
        assert_eq!(liquidity, bd("800"));
    }

    #[test]
    fn liquidity_of_untrusted_pool_is_zero() {
        let resolver = resolver();
        let token0 = token(UNI, "UNI", "2");
        let token1 = token(LINK, "LINK", "0.5");

        let liquidity =
            resolver.tracked_liquidity_usd(&bundle(), &bd("5"), &token0, &bd("20"), &token1);
        assert!(liquidity.is_zero());
    }

    #[test]
    fn attribution_is_idempotent() {
        let resolver = resolver();
        let token0 = token(WETH, "WETH", "2");
        let token1 = token(USDC, "USDC", "0.5");
        let bundle = bundle();

        let first = resolver.tracked_volume_usd(&bundle, &bd("5"), &token0, &bd("20"), &token1);
        let second = resolver.tracked_volume_usd(&bundle, &bd("5"), &token0, &bd("20"), &token1);
        assert_eq!(first, second);

        let first = resolver.tracked_fee_volume_usd(&bundle, &bd("5"), &token0, &bd("20"), &token1);
        let second =
            resolver.tracked_fee_volume_usd(&bundle, &bd("5"), &token0, &bd("20"), &token1);
        assert_eq!(first, second);
    }
}
