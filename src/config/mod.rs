mod config;

pub use config::{PricingConfig, PricingSettings, Settings};
