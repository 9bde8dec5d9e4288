//! Peso amounts: decimal value object, minor-unit storage conversion and
//! locale formatting.
//!
//! Prices are stored as integer centavos and shown as `₱1,234.56`.
//! [`MonetaryAmount`] converts between the two without going through
//! floating point.

mod input;

pub use input::{sanitize_money_input, MoneyInput};

use log::debug;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept by every amount.
pub const PRECISION: u32 = 2;

/// Formatting conventions for displayed amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Currency sign placed before the number, may be empty
    pub symbol: String,
    /// Thousands separator
    pub separator: char,
    /// Decimal point
    pub decimal: char,
}

impl CurrencyFormat {
    /// Philippine peso: `₱1,000.50`
    pub fn php() -> Self {
        Self {
            symbol: "₱".to_string(),
            separator: ',',
            decimal: '.',
        }
    }

    /// Same conventions with the currency sign dropped: `1,000.50`
    pub fn without_symbol(mut self) -> Self {
        self.symbol.clear();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::php()
    }
}

/// An immutable currency amount with two decimal places.
///
/// Malformed input never fails construction: anything that does not parse
/// as a number becomes zero. Halves are rounded away from zero, so `10.005`
/// is stored as `10.01` and `-10.005` as `-10.01`.
#[derive(Debug, Clone)]
pub struct MonetaryAmount {
    value: Decimal,
    format: CurrencyFormat,
}

impl MonetaryAmount {
    /// Creates an amount from a decimal value (e.g. `10.99` or `"₱10.99"`)
    pub fn new(amount: impl Into<MonetaryAmount>) -> Self {
        amount.into()
    }

    /// Creates an amount that displays with `format` instead of the peso defaults
    pub fn with_format(amount: impl Into<MonetaryAmount>, format: CurrencyFormat) -> Self {
        Self {
            format,
            ..amount.into()
        }
    }

    /// Creates an amount from stored minor units (e.g. `1000` -> `₱10.00`)
    pub fn from_integer(minor_units: i64) -> Self {
        Self::from_decimal(Decimal::new(minor_units, PRECISION))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self {
            value: round(value),
            format: CurrencyFormat::default(),
        }
    }

    /// Parses a human string the way a lenient price field would.
    ///
    /// `(12.50)` is negative, every character except digits, `-` and the
    /// decimal point is ignored, and an empty or unreadable remainder is zero.
    pub fn parse(text: &str, format: &CurrencyFormat) -> Self {
        let text = text.trim();
        let negated = text.starts_with('(') && text.ends_with(')');

        let mut numeric: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == format.decimal)
            .map(|c| if c == format.decimal { '.' } else { c })
            .collect();
        if negated && !numeric.starts_with('-') {
            numeric.insert(0, '-');
        }

        let value = parse_decimal(&numeric).unwrap_or_else(|| {
            if !numeric.is_empty() {
                debug!("Unreadable amount {:?}, using zero", text);
            }
            Decimal::ZERO
        });

        Self::with_format(Self::from_decimal(value), format.clone())
    }

    /// Minor units for storage (e.g. `₱10.25` -> `1025`)
    ///
    /// Saturates at the `i64` bounds.
    pub fn to_integer(&self) -> i64 {
        let bound = if self.value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        };
        self.value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.trunc().to_i64())
            .unwrap_or(bound)
    }

    /// Plain float value (e.g. `10.25`)
    pub fn to_number(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    pub fn to_decimal(&self) -> Decimal {
        self.value
    }

    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Formats with `format` instead of this amount's own conventions
    pub fn format_with(&self, format: &CurrencyFormat) -> String {
        let fixed = format!("{:.2}", self.value.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(format.separator);
            }
            grouped.push(digit);
        }

        let sign = if self.value.is_sign_negative() && !self.value.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{grouped}{}{fraction}",
            format.symbol, format.decimal
        )
    }

    /// Adds an amount or a plain number.
    ///
    /// Arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` on overflow.
    pub fn add(&self, other: impl Into<MonetaryAmount>) -> Self {
        let other = other.into().value;
        let sum = self
            .value
            .checked_add(other)
            .unwrap_or_else(|| saturated(self.value.is_sign_negative()));
        self.derive(sum)
    }

    pub fn subtract(&self, other: impl Into<MonetaryAmount>) -> Self {
        let other = other.into().value;
        let difference = self
            .value
            .checked_sub(other)
            .unwrap_or_else(|| saturated(self.value.is_sign_negative()));
        self.derive(difference)
    }

    pub fn multiply(&self, factor: f64) -> Self {
        let factor = float_to_decimal(factor);
        let product = self.value.checked_mul(factor).unwrap_or_else(|| {
            saturated(self.value.is_sign_negative() != factor.is_sign_negative())
        });
        self.derive(product)
    }

    /// Divides the amount; a zero divisor gives zero.
    pub fn divide(&self, divisor: f64) -> Self {
        let quotient = self
            .value
            .checked_div(float_to_decimal(divisor))
            .unwrap_or(Decimal::ZERO);
        self.derive(quotient)
    }

    fn derive(&self, value: Decimal) -> Self {
        Self {
            value: round(value),
            format: self.format.clone(),
        }
    }
}

/// Renders a stored price, or `placeholder` when there is none
pub fn display_price(minor_units: Option<i64>, placeholder: &str) -> String {
    match minor_units {
        Some(price) if price != 0 => MonetaryAmount::from_integer(price).to_string(),
        _ => placeholder.to_string(),
    }
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

fn float_to_decimal(value: f64) -> Decimal {
    if !value.is_finite() {
        debug!("Non-finite amount {}, using zero", value);
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

fn parse_decimal(numeric: &str) -> Option<Decimal> {
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut normalized = numeric.to_string();
    if normalized.ends_with('.') {
        normalized.push('0');
    }
    if let Some(rest) = normalized.strip_prefix("-.") {
        normalized = format!("-0.{rest}");
    } else if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    Decimal::from_str(&normalized).ok()
}

impl From<f64> for MonetaryAmount {
    fn from(value: f64) -> Self {
        Self::from_decimal(float_to_decimal(value))
    }
}

impl From<Decimal> for MonetaryAmount {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<&str> for MonetaryAmount {
    fn from(text: &str) -> Self {
        Self::parse(text, &CurrencyFormat::default())
    }
}

impl From<String> for MonetaryAmount {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<&MonetaryAmount> for MonetaryAmount {
    fn from(amount: &MonetaryAmount) -> Self {
        amount.clone()
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(&self.format))
    }
}

/// Amounts compare by value; display conventions are ignored.
impl PartialEq for MonetaryAmount {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for MonetaryAmount {}

impl Serialize for MonetaryAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.value, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trip() {
        for n in [0, 1, 99, 100, 1099, 999_999, -250] {
            assert_eq!(MonetaryAmount::from_integer(n).to_integer(), n);
        }
    }

    #[test]
    fn test_formatting() {
        assert_eq!(MonetaryAmount::from_integer(100_050).to_string(), "₱1,000.50");
        assert_eq!(MonetaryAmount::from_integer(5).to_string(), "₱0.05");
        assert_eq!(MonetaryAmount::new(1_234_567.8).to_string(), "₱1,234,567.80");
        assert_eq!(MonetaryAmount::new(-1.0).to_string(), "-₱1.00");
        assert_eq!(
            MonetaryAmount::new("1234.5").format_with(&CurrencyFormat::php().without_symbol()),
            "1,234.50"
        );
    }

    #[test]
    fn test_custom_format() {
        let euro = CurrencyFormat {
            symbol: "€".to_string(),
            separator: '.',
            decimal: ',',
        };
        let amount = MonetaryAmount::parse("1.234,56", &euro);
        assert_eq!(amount.to_integer(), 123_456);
        assert_eq!(amount.to_string(), "€1.234,56");
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!(MonetaryAmount::new("₱1,234.56").to_integer(), 123_456);
        assert_eq!(MonetaryAmount::new(" 12 ").to_integer(), 1200);
        assert_eq!(MonetaryAmount::new("(12.50)").to_integer(), -1250);
        assert_eq!(MonetaryAmount::new(".5").to_integer(), 50);
        assert_eq!(MonetaryAmount::new("12.").to_integer(), 1200);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert!(MonetaryAmount::new("abc").is_zero());
        assert!(MonetaryAmount::new("").is_zero());
        assert!(MonetaryAmount::new("1.2.3").is_zero());
        assert!(MonetaryAmount::new("1-2").is_zero());
        assert!(MonetaryAmount::new(f64::NAN).is_zero());
        assert!(MonetaryAmount::new(f64::INFINITY).is_zero());
        assert_eq!(MonetaryAmount::new("abc").to_number(), 0.0);
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(MonetaryAmount::new("10.005").to_integer(), 1001);
        assert_eq!(MonetaryAmount::new("10.004").to_integer(), 1000);
        assert_eq!(MonetaryAmount::new("-10.005").to_integer(), -1001);
        assert_eq!(MonetaryAmount::new(0.125).to_integer(), 13);
    }

    #[test]
    fn test_float_sums_do_not_drift() {
        let amount = MonetaryAmount::new(0.1).add(0.2);
        assert_eq!(amount.to_integer(), 30);
        assert_eq!(amount.to_number(), 0.3);
    }

    #[test]
    fn test_arithmetic() {
        let price = MonetaryAmount::from_integer(1099);

        assert_eq!(price.add(&price).to_integer(), 2198);
        assert_eq!(price.add(1.0).to_integer(), 1199);
        assert_eq!(price.subtract(0.99).to_integer(), 1000);
        assert_eq!(price.subtract(&price).to_integer(), 0);
        assert_eq!(price.multiply(3.0).to_integer(), 3297);
        assert_eq!(price.divide(2.0).to_integer(), 550);
        assert_eq!(price.divide(0.0).to_integer(), 0);

        let total = price.add(MonetaryAmount::from_integer(1)).subtract(0.5);
        assert_eq!(total.to_integer(), 1050);
    }

    #[test]
    fn test_arithmetic_keeps_format() {
        let bare = MonetaryAmount::with_format(10.0, CurrencyFormat::php().without_symbol());
        assert_eq!(bare.add(1000.0).to_string(), "1,010.00");
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let max = MonetaryAmount::new("79228162514264337593543950335");
        assert_eq!(max.to_integer(), i64::MAX);
        assert_eq!(MonetaryAmount::new(7.0e28).to_integer(), i64::MAX);
        assert_eq!(
            MonetaryAmount::new("-79228162514264337593543950335").to_integer(),
            i64::MIN
        );
        // just past i64 once scaled to centavos
        assert_eq!(MonetaryAmount::new("92233720368547758.08").to_integer(), i64::MAX);

        assert_eq!(max.add(&max).to_decimal(), Decimal::MAX);
        assert_eq!(max.subtract(-1000.0).to_decimal(), Decimal::MAX);
        assert_eq!(max.multiply(-2.0).to_decimal(), Decimal::MIN);
        assert_eq!(max.multiply(2.0).to_integer(), i64::MAX);
    }

    #[test]
    fn test_display_price() {
        assert_eq!(display_price(Some(150_000), "N/A"), "₱1,500.00");
        assert_eq!(display_price(None, "N/A"), "N/A");
        assert_eq!(display_price(Some(0), "Any Amount"), "Any Amount");
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&MonetaryAmount::from_integer(123_456)).unwrap();
        assert_eq!(json, "\"1234.56\"");
    }
}
