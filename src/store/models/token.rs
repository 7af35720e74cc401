use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;

/// Token metadata and derived price state.
///
/// Owned by the external entity store; the pricing core reads
/// `derived_native` and computes new values for it, the ingestion pipeline
/// decides when to write them back.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Token {
    pub address: String,

    // On-chain metadata (immutable after first fetch)
    pub symbol: String,
    pub name: String,
    pub decimals: u8,

    /// Price in wrapped-native units, as last computed by the resolver
    pub derived_native: BigDecimal,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Token {
    pub fn new(address: String, symbol: String, name: String, decimals: u8) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            address: address.to_lowercase(),
            symbol,
            name,
            decimals,
            derived_native: BigDecimal::zero(),
            updated_at: None,
        }
    }

    /// Store a freshly resolved native-denominated price.
    pub fn set_derived_native(&mut self, derived_native: BigDecimal) {
        self.derived_native = derived_native;
        self.updated_at = Some(Utc::now());
    }
}
