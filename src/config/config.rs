use std::str::FromStr;

use anyhow::{bail, Context};
use bigdecimal::BigDecimal;
use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Pricing configuration as it appears in `config.yaml`.
///
/// Addresses are accepted in any case and normalized when building the
/// runtime [`PricingConfig`]. The stablecoin of each stable pair must be
/// `token1` of that pair.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Wrapped native token address (the pricing anchor)
    pub wrapped_native_token: String,
    /// The two native/stablecoin pair addresses used for the USD price
    pub stable_pairs: Vec<String>,
    /// Trusted reference tokens, in resolution order
    pub whitelist: Vec<String>,
    /// Minimum native-denominated pair reserve for a price to be trusted
    #[serde(default = "default_minimum_liquidity_threshold")]
    pub minimum_liquidity_threshold: String,
}

fn default_minimum_liquidity_threshold() -> String {
    "0.001".to_string()
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub pricing: PricingSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}

/// Validated runtime pricing configuration.
///
/// Immutable once built; injected into the resolver so alternate whitelists
/// can be supplied in tests. Whitelist order is significant: the resolver
/// anchors a token's price on the first whitelist entry with a qualifying
/// pair, so reordering entries changes computed prices.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub wrapped_native_token: String,
    /// Stablecoin is token1 in both pairs
    pub stable_pairs: [String; 2],
    pub whitelist: Vec<String>,
    pub minimum_liquidity_threshold: BigDecimal,
}

impl PricingConfig {
    pub fn new(
        wrapped_native_token: String,
        stable_pairs: [String; 2],
        whitelist: Vec<String>,
        minimum_liquidity_threshold: BigDecimal,
    ) -> Self {
        // Always lowercase addresses for consistent comparisons
        Self {
            wrapped_native_token: wrapped_native_token.to_lowercase(),
            stable_pairs: stable_pairs.map(|p| p.to_lowercase()),
            whitelist: whitelist.into_iter().map(|t| t.to_lowercase()).collect(),
            minimum_liquidity_threshold,
        }
    }

    pub fn is_native(&self, token: &str) -> bool {
        self.wrapped_native_token == token.to_lowercase()
    }

    /// Whitelist membership test. Order-insensitive; resolution order is
    /// applied by iterating `whitelist` directly.
    pub fn is_whitelisted(&self, token: &str) -> bool {
        let token_lower = token.to_lowercase();
        self.whitelist.iter().any(|t| *t == token_lower)
    }
}

impl TryFrom<PricingSettings> for PricingConfig {
    type Error = anyhow::Error;

    fn try_from(settings: PricingSettings) -> Result<Self, Self::Error> {
        let threshold = BigDecimal::from_str(&settings.minimum_liquidity_threshold)
            .with_context(|| {
                format!(
                    "invalid minimum_liquidity_threshold: {}",
                    settings.minimum_liquidity_threshold
                )
            })?;

        let stable_pairs: [String; 2] = match settings.stable_pairs.try_into() {
            Ok(pairs) => pairs,
            Err(pairs) => bail!(
                "expected exactly 2 stable pair addresses, got {}",
                pairs.len()
            ),
        };

        Ok(PricingConfig::new(
            settings.wrapped_native_token,
            stable_pairs,
            settings.whitelist,
            threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PricingSettings {
        PricingSettings {
            wrapped_native_token: "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string(),
            stable_pairs: vec![
                "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc".to_string(),
                "0x0d4a11d5EEaaC28EC3F61d100daF4d40471f1852".to_string(),
            ],
            whitelist: vec![
                "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2".to_string(),
                "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
            ],
            minimum_liquidity_threshold: "0.001".to_string(),
        }
    }

    #[test]
    fn config_lowercases_addresses() {
        let config = PricingConfig::try_from(settings()).unwrap();

        assert_eq!(
            config.wrapped_native_token,
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
        assert!(config.is_native("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"));
        assert!(config.is_whitelisted("0xA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48"));
        assert!(!config.is_whitelisted("0x6b175474e89094c44da98b954eedeac495271d0f"));
    }

    #[test]
    fn threshold_is_parsed_exactly() {
        let config = PricingConfig::try_from(settings()).unwrap();
        assert_eq!(
            config.minimum_liquidity_threshold,
            BigDecimal::from_str("0.001").unwrap()
        );
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let mut bad = settings();
        bad.minimum_liquidity_threshold = "not-a-number".to_string();
        assert!(PricingConfig::try_from(bad).is_err());
    }

    #[test]
    fn wrong_stable_pair_count_is_rejected() {
        let mut bad = settings();
        bad.stable_pairs.pop();
        assert!(PricingConfig::try_from(bad).is_err());
    }
}
