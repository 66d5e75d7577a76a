use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a money amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseMoneyError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for parsing: trims whitespace and removes comma grouping
/// separators (e.g. `12,50,000`).
fn normalize_money_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a money argument into a [`Decimal`].
///
/// Handles comma as grouping separator. Empty or whitespace-only input is
/// treated as 0.
pub fn parse_money(s: &str) -> Result<Decimal, ParseMoneyError> {
    let normalized = normalize_money_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|source| ParseMoneyError {
        input: s.to_string(),
        source,
    })
}
