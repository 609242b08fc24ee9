//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Formatting only
//! happens at the presentation boundary.

use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How [`Money::parse`] treats thousands separators in price strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPolicy {
    /// Accept commas only in well-formed groups of three digits
    /// (`2,500.00`, `12,345`). Lakh-style grouping is rejected.
    #[default]
    Grouped,
    /// Any comma in the amount is an error.
    Reject,
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., paise for INR).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, as sent by the backend.
    ///
    /// ```
    /// use detail_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(2499.0, Currency::INR);
    /// assert_eq!(price.amount_cents, 249_900);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Parse a symbol-prefixed price string such as `"$49.99"` or `"₹2,499"`.
    ///
    /// Only the symbol of `currency` is stripped. Any other glyph, a
    /// negative amount, more fractional digits than the currency allows, or
    /// a separator the policy does not accept is reported as
    /// [`CommerceError::InvalidPrice`] instead of being mis-read.
    pub fn parse(
        input: &str,
        currency: Currency,
        policy: SeparatorPolicy,
    ) -> Result<Money, CommerceError> {
        let invalid = |reason: &str| CommerceError::InvalidPrice {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix(currency.symbol())
            .unwrap_or(trimmed)
            .trim_start();

        if body.is_empty() {
            return Err(invalid("empty amount"));
        }
        if body.starts_with('-') {
            return Err(invalid("negative amount"));
        }

        let (whole, fraction) = match body.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (body, None),
        };

        let whole = match policy {
            SeparatorPolicy::Reject if whole.contains(',') => {
                return Err(invalid("thousands separators are not accepted"));
            }
            SeparatorPolicy::Reject => whole.to_string(),
            SeparatorPolicy::Grouped => {
                ungroup(whole).ok_or_else(|| invalid("malformed digit grouping"))?
            }
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("unexpected character"));
        }

        let places = currency.decimal_places() as usize;
        let fraction = fraction.unwrap_or("");
        if fraction.len() > places {
            return Err(invalid("too many decimal places"));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("unexpected character"));
        }
        if body.ends_with('.') {
            return Err(invalid("missing fractional digits"));
        }

        let major: i64 = whole.parse().map_err(|_| CommerceError::Overflow)?;
        let minor: i64 = if fraction.is_empty() {
            0
        } else {
            format!("{:0<places$}", fraction)
                .parse()
                .map_err(|_| invalid("unexpected character"))?
        };

        let amount_cents = major
            .checked_mul(currency.minor_per_major())
            .and_then(|cents| cents.checked_add(minor))
            .ok_or(CommerceError::Overflow)?;

        Ok(Money::new(amount_cents, currency))
    }

    /// Format with symbol and thousands grouping (e.g., "₹2,499.00").
    pub fn display(&self) -> String {
        let (sign, whole, fraction) = self.parts();
        let whole = group_thousands(&whole);
        match fraction {
            Some(fraction) => format!("{sign}{}{whole}.{fraction}", self.currency.symbol()),
            None => format!("{sign}{}{whole}", self.currency.symbol()),
        }
    }

    /// Format without symbol or grouping (e.g., "50.00").
    pub fn display_amount(&self) -> String {
        match self.parts() {
            (sign, whole, Some(fraction)) => format!("{sign}{whole}.{fraction}"),
            (sign, whole, None) => format!("{sign}{whole}"),
        }
    }

    fn parts(&self) -> (&'static str, String, Option<String>) {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let places = self.currency.decimal_places();
        if places == 0 {
            return (sign, abs.to_string(), None);
        }
        let divisor = 10_u64.pow(places);
        let width = places as usize;
        (
            sign,
            (abs / divisor).to_string(),
            Some(format!("{:0width$}", abs % divisor)),
        )
    }

    /// Add another Money value, failing on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity.
    pub fn try_multiply(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Sum an iterator of Money values in the given currency.
    pub fn try_sum<'a>(
        iter: impl IntoIterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.into_iter()
            .try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Strip well-formed three-digit comma grouping. `None` when malformed.
fn ungroup(whole: &str) -> Option<String> {
    if !whole.contains(',') {
        return Some(whole.to_string());
    }
    let mut groups = whole.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
