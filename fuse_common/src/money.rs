use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Every amount handled by the adapter is in pounds sterling. There is no currency conversion.
pub const GBP_CURRENCY_CODE: &str = "GBP";

#[derive(Debug, Clone, Error)]
#[error("Invalid currency amount: {0}")]
pub struct AmountParseError(String);

/// Formats an amount the way the processor expects it: plain decimal notation, no grouping, `.` as the separator and
/// at least two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let mut amount = amount.normalize();
    if amount.scale() < 2 {
        amount.rescale(2);
    }
    amount.to_string()
}

/// Processors report amounts as decimal strings, e.g. "10.00".
pub fn parse_amount(value: &str) -> Result<Decimal, AmountParseError> {
    Decimal::from_str(value.trim()).map_err(|e| AmountParseError(format!("{value}. {e}")))
}
