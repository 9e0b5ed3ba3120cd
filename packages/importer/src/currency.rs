//! Currency normalization for extracted prices.

use async_trait::async_trait;
use chat_client::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// USD per unit for the currencies event files actually quote.
const RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 1.08),
    ("GBP", 1.27),
    ("CAD", 0.73),
    ("AUD", 0.66),
    ("JPY", 0.0067),
    ("CHF", 1.13),
    ("SEK", 0.095),
    ("MXN", 0.054),
];

/// Convert an amount in the given ISO 4217 currency to whole US dollars.
///
/// Total over all inputs: unrecognized codes convert 1:1 instead of
/// failing the surrounding extraction. Same input, same output, always.
pub fn convert_to_dollars(currency_code: &str, amount: f64) -> i64 {
    let code = currency_code.trim().to_ascii_uppercase();
    let rate = RATES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, rate)| *rate)
        .unwrap_or(1.0);
    (amount * rate).round() as i64
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ConvertCurrencyArgs {
    /// ISO 4217 currency code, e.g. "EUR"
    pub currency_code: String,

    /// Amount of money in that currency
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct ConvertCurrencyOutput {
    /// Equivalent amount in whole US dollars
    pub dollars: i64,
}

/// Tool the extraction call carries so the model can normalize prices
/// quoted in other currencies. Stateless and reentrant.
pub struct ConvertCurrencyTool;

#[async_trait]
impl Tool for ConvertCurrencyTool {
    const NAME: &'static str = "convert_currency";
    type Args = ConvertCurrencyArgs;
    type Output = ConvertCurrencyOutput;
    type Error = std::convert::Infallible;

    fn description(&self) -> &str {
        "Convert a currency amount to the equivalent whole US dollars"
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        Ok(ConvertCurrencyOutput {
            dollars: convert_to_dollars(&args.currency_code, args.amount),
        })
    }
}
