use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A price token found in page text
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatch {
    /// The matched text, symbol included (e.g. `₱ 1,234.56`)
    pub raw: String,
    /// The parsed amount, `None` when the token holds no digits
    pub amount: Option<Decimal>,
}

/// Finds the first currency-prefixed amount in a document.
///
/// The pattern is the symbol, optional whitespace, digits with optional
/// thousands separators, and an optional fraction: `₱400.00`, `₱123`,
/// `₱ 1,234.56`.
#[derive(Debug, Clone)]
pub struct PricePattern {
    symbol: String,
    regex: Regex,
}

impl PricePattern {
    pub fn new(symbol: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(
            r"{}\s*[0-9,]+(?:\.[0-9]+)?",
            regex::escape(symbol)
        ))?;
        Ok(Self {
            symbol: symbol.to_string(),
            regex,
        })
    }

    /// The first match in document order, not the largest or most frequent
    pub fn find(&self, text: &str) -> Option<PriceMatch> {
        let found = self.regex.find(text)?;
        let raw = found.as_str().to_string();
        let amount = self.normalize(&raw);
        Some(PriceMatch { raw, amount })
    }

    fn normalize(&self, raw: &str) -> Option<Decimal> {
        let numeric: String = raw
            .trim_start_matches(self.symbol.as_str())
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .collect();
        Decimal::from_str(&numeric).ok()
    }
}
