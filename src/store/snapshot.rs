use rustc_hash::FxHashMap;

use super::models::{Pair, Token};

/// Read-consistent view of all tokens and pairs.
///
/// The ingestion pipeline owns mutation: it inserts entities on pool
/// creation and updates reserves event by event, never while a pricing
/// computation is in flight. The pricing core only reads.
#[derive(Debug, Default)]
pub struct Snapshot {
    tokens: FxHashMap<String, Token>,
    pairs: FxHashMap<String, Pair>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self, address: &str) -> Option<&Token> {
        self.tokens.get(address.to_lowercase().as_str())
    }

    pub fn token_mut(&mut self, address: &str) -> Option<&mut Token> {
        self.tokens.get_mut(address.to_lowercase().as_str())
    }

    pub fn pair(&self, address: &str) -> Option<&Pair> {
        self.pairs.get(address.to_lowercase().as_str())
    }

    pub fn pair_mut(&mut self, address: &str) -> Option<&mut Pair> {
        self.pairs.get_mut(address.to_lowercase().as_str())
    }

    pub fn insert_token(&mut self, token: Token) {
        self.tokens.insert(token.address.clone(), token);
    }

    pub fn insert_pair(&mut self, pair: Pair) {
        self.pairs.insert(pair.address.clone(), pair);
    }
}

/// Pair-existence lookup, the factory contract's `getPair` view.
///
/// `None` stands for the factory's zero-address sentinel: no pool exists
/// for the (unordered) token pair. Injected into the resolver so tests and
/// offline replays can substitute an in-memory index for the live call.
pub trait PairLookup {
    fn pair_for(&self, token_a: &str, token_b: &str) -> Option<String>;
}

impl<L: PairLookup> PairLookup for &L {
    fn pair_for(&self, token_a: &str, token_b: &str) -> Option<String> {
        (**self).pair_for(token_a, token_b)
    }
}

/// In-memory [`PairLookup`] backed by pairs observed at pool creation.
#[derive(Debug, Default)]
pub struct PairIndex {
    pairs: FxHashMap<(String, String), String>,
}

impl PairIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pair address for a token pair, in either order.
    pub fn register(&mut self, token_a: &str, token_b: &str, pair_address: &str) {
        self.pairs
            .insert(Self::key(token_a, token_b), pair_address.to_lowercase());
    }

    fn key(token_a: &str, token_b: &str) -> (String, String) {
        let a = token_a.to_lowercase();
        let b = token_b.to_lowercase();
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PairLookup for PairIndex {
    fn pair_for(&self, token_a: &str, token_b: &str) -> Option<String> {
        self.pairs.get(&Self::key(token_a, token_b)).cloned()
    }
}
