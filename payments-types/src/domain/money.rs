//! Monetary amount and the currency allow-list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::DomainError;

/// Currencies accepted by the payment system.
///
/// Matching is exact and case-sensitive: `"usd"` is not a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    AUD,
    EUR,
    GBP,
    SGD,
}

impl Currency {
    /// Every member of the allow-list, in display order.
    pub const ALL: [Currency; 5] = [
        Currency::USD,
        Currency::AUD,
        Currency::EUR,
        Currency::GBP,
        Currency::SGD,
    ];

    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::AUD => "AUD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::SGD => "SGD",
        }
    }

    /// Comma-separated list of accepted codes, e.g. `"USD, AUD, EUR, GBP, SGD"`.
    pub fn allowed_codes() -> String {
        Self::ALL
            .iter()
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or(DomainError::CurrencyInvalid)
    }
}

/// A strictly positive, finite payment amount.
///
/// No currency-specific rounding is applied; the value is kept as given.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
#[schema(value_type = f64, example = 100.5)]
pub struct Amount(f64);

impl Amount {
    /// Creates a new Amount, rejecting non-finite and non-positive values.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::AmountMustBeFinite);
        }
        if value <= 0.0 {
            return Err(DomainError::AmountMustBePositive);
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
