//! Monetary amounts with currency information.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount paired with its ISO 4217 currency code.
///
/// The commerce platform transmits amounts as decimal strings (e.g.
/// `"19.99"`) to preserve precision; `Money` keeps them as [`Decimal`] and
/// serializes back to the same string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount in the currency's standard unit (dollars, not cents).
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g. "USD", "EUR").
    #[serde(rename = "currencyCode")]
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }
}
