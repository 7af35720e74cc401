pub mod config;
pub mod pricing;
pub mod store;
pub mod utils;

pub use config::{PricingConfig, Settings};
pub use pricing::PriceResolver;
pub use store::{NativeTokenPrice, Pair, PairIndex, PairLookup, Snapshot, Token};
