use super::{CurrencyFormat, MonetaryAmount};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Restricts a raw field value to something that can become an amount.
///
/// Keeps digits, `,` and `.`, drops every period after the first, and keeps
/// at most two digits after the period. Applied on every change, so the
/// newest surplus digit is the one that disappears.
pub fn sanitize_money_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_period = false;
    let mut fraction_digits = 0;

    for c in raw.chars() {
        match c {
            '.' if !seen_period => {
                seen_period = true;
                out.push(c);
            }
            '.' => {}
            ',' => out.push(c),
            '0'..='9' if seen_period => {
                if fraction_digits < 2 {
                    fraction_digits += 1;
                    out.push(c);
                }
            }
            '0'..='9' => out.push(c),
            _ => {}
        }
    }

    out
}

/// Text field binding for prices typed by hand.
///
/// The host field forwards its change and blur events here and renders
/// [`value`](Self::value). A successful blur hands the committed string to
/// the callback.
pub struct MoneyInput<F: FnMut(&str)> {
    value: String,
    on_commit: F,
}

impl<F: FnMut(&str)> MoneyInput<F> {
    pub fn new(initial: impl Into<String>, on_commit: F) -> Self {
        Self {
            value: sanitize_money_input(&initial.into()),
            on_commit,
        }
    }

    /// Seeds the field from a stored price, `12050` shows as `120.50`.
    ///
    /// The field cannot hold a sign, so negative prices are clamped to
    /// `0.00`.
    pub fn from_minor_units(price: Option<i64>, on_commit: F) -> Self {
        let initial = price
            .map(|p| format!("{:.2}", Decimal::new(p.max(0), super::PRECISION)))
            .unwrap_or_default();
        Self::new(initial, on_commit)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Handles a change event carrying the field's full new text
    pub fn on_change(&mut self, raw: &str) {
        self.value = sanitize_money_input(raw);
    }

    /// Appends one typed character
    pub fn type_char(&mut self, c: char) {
        let mut next = self.value.clone();
        next.push(c);
        self.on_change(&next);
    }

    /// Normalizes the field when it loses focus.
    ///
    /// Unreadable text clears the field without committing. Otherwise the
    /// field is rewritten as `1,234.50` and that string is committed and
    /// returned.
    pub fn on_blur(&mut self) -> Option<&str> {
        let Some(amount) = parse_field(&self.value) else {
            self.value.clear();
            return None;
        };

        self.value = amount.format_with(&CurrencyFormat::php().without_symbol());
        (self.on_commit)(&self.value);
        Some(&self.value)
    }

    /// The field as an amount, zero when empty
    pub fn amount(&self) -> MonetaryAmount {
        parse_field(&self.value).unwrap_or_else(|| MonetaryAmount::from_integer(0))
    }
}

fn parse_field(value: &str) -> Option<MonetaryAmount> {
    let numeric: String = value.chars().filter(|c| *c != ',').collect();
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let numeric = if numeric.ends_with('.') {
        format!("{numeric}0")
    } else if numeric.starts_with('.') {
        format!("0{numeric}")
    } else {
        numeric
    };
    Decimal::from_str(&numeric)
        .ok()
        .map(MonetaryAmount::from_decimal)
}
