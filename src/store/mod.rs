pub mod models;
pub mod snapshot;

pub use models::{NativeTokenPrice, Pair, Token};
pub use snapshot::{PairIndex, PairLookup, Snapshot};
