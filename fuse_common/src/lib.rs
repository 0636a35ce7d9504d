pub mod helpers;
mod money;
mod secret;

pub use money::{format_amount, parse_amount, AmountParseError, GBP_CURRENCY_CODE};
pub use secret::Secret;
