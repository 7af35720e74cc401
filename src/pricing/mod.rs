//! Price derivation and USD attribution over pair snapshots.
//!
//! No external price oracle is involved: the USD price of the wrapped
//! native token comes from its two designated stablecoin pairs, every other
//! token is priced transitively through whitelisted anchor pairs, and
//! volume/fee/liquidity statistics only count the legs of a trade that can
//! be trusted through that whitelist.

mod resolver;
mod tracked;

pub use resolver::PriceResolver;
