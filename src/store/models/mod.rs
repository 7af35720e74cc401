mod native_token_price;
mod pair;
mod token;

pub use native_token_price::NativeTokenPrice;
pub use pair::Pair;
pub use token::Token;
