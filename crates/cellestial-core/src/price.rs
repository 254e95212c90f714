//! # Price Types
//!
//! Currency and minor-unit amounts for checkout line items.

use serde::{Deserialize, Serialize};

/// Currencies the storefront charges in (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 currency code, lowercase as providers expect it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::EUR => "eur",
        }
    }

    /// Number of minor units in one major unit
    pub fn minor_units(&self) -> i64 {
        match self {
            Currency::EUR => 100,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
        }
    }

    /// Convert a decimal amount to the smallest currency unit.
    ///
    /// Rounds half away from zero. Amounts beyond the `i64` range clamp to
    /// `i64::MIN`/`i64::MAX` and NaN becomes 0.
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        (amount * self.minor_units() as f64).round() as i64
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for EUR)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Format for display (e.g., "€10.00")
    pub fn display(&self) -> String {
        let units = self.currency.minor_units();
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / units as u64,
            abs % units as u64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_unit_rounding() {
        // 19.99 * 100 is 1998.9999999999998 in f64
        assert_eq!(Currency::EUR.to_smallest_unit(19.99), 1999);
        assert_eq!(Currency::EUR.to_smallest_unit(2.5), 250);
        assert_eq!(Currency::EUR.to_smallest_unit(10.0), 1000);
        assert_eq!(Currency::EUR.to_smallest_unit(-1.5), -150);
    }

    #[test]
    fn test_smallest_unit_clamps_out_of_range() {
        assert_eq!(Currency::EUR.to_smallest_unit(1e17), i64::MAX);
        assert_eq!(Currency::EUR.to_smallest_unit(-1e17), i64::MIN);
        assert_eq!(Currency::EUR.to_smallest_unit(f64::NAN), 0);
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::default(), Currency::EUR);
        assert_eq!(Currency::EUR.as_str(), "eur");
        assert_eq!(Currency::EUR.to_string(), "EUR");
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::new(19.99, Currency::EUR).display(), "€19.99");
        assert_eq!(Price::new(0.05, Currency::EUR).display(), "€0.05");
        assert_eq!(Price::new(-3.0, Currency::EUR).display(), "-€3.00");
        assert_eq!(
            Price { amount: i64::MAX, currency: Currency::EUR }.display(),
            "€92233720368547758.07"
        );
    }
}
