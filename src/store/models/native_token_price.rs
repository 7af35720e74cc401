use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;

/// Current USD price of the wrapped native token.
///
/// Process-wide singleton: recomputed by the ingestion pipeline via
/// [`PriceResolver::native_price_usd`](crate::pricing::PriceResolver::native_price_usd)
/// whenever a stable pair's reserves change, and read by the attribution
/// functions to turn native-denominated prices into USD.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NativeTokenPrice {
    pub price_usd: BigDecimal,
    pub updated_at: DateTime<Utc>,
}

impl NativeTokenPrice {
    pub fn new(price_usd: BigDecimal) -> Self {
        Self {
            price_usd,
            updated_at: Utc::now(),
        }
    }

    pub fn set(&mut self, price_usd: BigDecimal) {
        self.price_usd = price_usd;
        self.updated_at = Utc::now();
    }
}

impl Default for NativeTokenPrice {
    fn default() -> Self {
        Self::new(BigDecimal::zero())
    }
}
