//! Monetary values attached to jobs

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::{Lingo24Error, Result};

/// Net and gross amounts in one currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub currency_code: String,
    pub net: Decimal,
    pub gross: Decimal,
}

impl Price {
    /// Amounts are stored as given; rounding is the caller's job.
    pub fn new(currency_code: impl Into<String>, net: Decimal, gross: Decimal) -> Self {
        Self {
            currency_code: currency_code.into(),
            net,
            gross,
        }
    }

    pub fn tax(&self) -> Decimal {
        self.gross - self.net
    }

    /// Sum two prices, failing when the currencies differ
    pub fn checked_add(&self, other: &Price) -> Result<Price> {
        if self.currency_code != other.currency_code {
            return Err(Lingo24Error::CurrencyMismatch {
                left: self.currency_code.clone(),
                right: other.currency_code.clone(),
            });
        }

        Ok(Price {
            currency_code: self.currency_code.clone(),
            net: self.net + other.net,
            gross: self.gross + other.gross,
        })
    }

    pub fn formatted_net(&self) -> String {
        self.format_currency(self.net)
    }

    pub fn formatted_gross(&self) -> String {
        self.format_currency(self.gross)
    }

    pub fn formatted_tax(&self) -> String {
        self.format_currency(self.tax())
    }

    fn format_currency(&self, value: Decimal) -> String {
        match self.currency_code.as_str() {
            "GBP" => format!("£{}", value),
            "USD" => format!("${}", value),
            "EUR" => format!("€{}", value),
            code => format!("{} {}", code, value),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} net / {} gross",
            self.currency_code, self.net, self.gross
        )
    }
}

/// Job totals with and without discount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPrice {
    pub total_with_discount: Price,
    pub total_without_discount: Price,
}

impl JobPrice {
    pub fn new(total_with_discount: Price, total_without_discount: Price) -> Self {
        Self {
            total_with_discount,
            total_without_discount,
        }
    }

    /// Component-wise sum; fails on a currency mismatch in either total
    pub fn checked_add(&self, other: &JobPrice) -> Result<JobPrice> {
        Ok(JobPrice {
            total_with_discount: self
                .total_with_discount
                .checked_add(&other.total_with_discount)?,
            total_without_discount: self
                .total_without_discount
                .checked_add(&other.total_without_discount)?,
        })
    }
}

impl fmt::Display for JobPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Without discount {} | With discount {}",
            self.total_without_discount, self.total_with_discount
        )
    }
}

/// Parse a monetary figure sent as a JSON string or number into a
/// two-place decimal, rounding half away from zero.
pub(crate) fn parse_amount(value: &serde_json::Value) -> Result<Decimal> {
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(Lingo24Error::invalid_response(format!(
                "expected a monetary amount, got {}",
                other
            )))
        }
    };

    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| Lingo24Error::invalid_response(format!("bad amount {:?}: {}", text, e)))?;

    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Ok(rounded)
}
