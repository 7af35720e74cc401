//! Utility functions for the sibyl pricing core.
//!
//! - [`conversion`] - raw on-chain integer to `BigDecimal` conversions

mod conversion;

pub use conversion::reserve_to_decimal;
