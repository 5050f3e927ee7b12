//! Fare amounts.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Largest amount accepted, in cents.
const MAX_CENTS: u64 = 1_000_000_000_000_000;

/// Error returned when parsing an invalid fare amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fare amount: {reason}")]
pub struct InvalidFare {
    reason: &'static str,
}

impl InvalidFare {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A non-negative fare held exactly in cents.
///
/// Fares are compared and hashed when collapsing duplicate offers, so they
/// are never stored as floating point.
///
/// # Examples
///
/// ```
/// use tariff_lookup::domain::Fare;
///
/// let fare = Fare::parse("$ 1.234,50").unwrap();
/// assert_eq!(fare.cents(), 123_450);
/// assert_eq!(fare.to_string(), "$ 1,234.50");
///
/// // Negative amounts are rejected
/// assert!(Fare::parse("-10").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fare(u64);

impl Fare {
    /// Create a fare from an amount in cents.
    pub const fn from_cents(cents: u64) -> Self {
        Fare(cents)
    }

    /// Parse a fare from tariff-sheet text.
    ///
    /// Accepts an optional leading `$`, thousands separators, and either
    /// `.` or `,` as decimal separator. When both appear, the last one is
    /// the decimal separator. A lone separator followed by exactly three
    /// digits is read as a thousands separator (`"1.500"` is 1500).
    pub fn parse(s: &str) -> Result<Self, InvalidFare> {
        let trimmed = s.trim();
        let amount = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();

        if amount.is_empty() {
            return Err(InvalidFare::new("empty amount"));
        }
        if amount.starts_with('-') {
            return Err(InvalidFare::new("must not be negative"));
        }
        if !amount
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return Err(InvalidFare::new("unexpected character"));
        }

        let (whole, fraction) = split_decimal(amount)?;
        let whole: String = whole.chars().filter(char::is_ascii_digit).collect();
        if whole.is_empty() && fraction.is_empty() {
            return Err(InvalidFare::new("no digits"));
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| InvalidFare::new("amount too large"))?
        };
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().unwrap_or(0) * 10,
            _ => fraction.parse::<u64>().unwrap_or(0),
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= MAX_CENTS)
            .map(Fare)
            .ok_or(InvalidFare::new("amount too large"))
    }

    /// Create a fare from a decimal amount, rounding to the nearest cent.
    pub fn from_f64(amount: f64) -> Result<Self, InvalidFare> {
        if !amount.is_finite() {
            return Err(InvalidFare::new("not a finite number"));
        }
        if amount < 0.0 {
            return Err(InvalidFare::new("must not be negative"));
        }
        let cents = (amount * 100.0).round();
        if cents > MAX_CENTS as f64 {
            return Err(InvalidFare::new("amount too large"));
        }
        Ok(Fare(cents as u64))
    }

    /// The amount in cents.
    pub fn cents(self) -> u64 {
        self.0
    }

    /// The amount as a decimal number, for serialization.
    pub fn amount(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Split an amount into whole and fractional digits at its decimal separator.
fn split_decimal(amount: &str) -> Result<(&str, &str), InvalidFare> {
    let separator = match (amount.rfind('.'), amount.rfind(',')) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (Some(idx), None) | (None, Some(idx)) => {
            let sep = &amount[idx..=idx];
            let single = amount.matches(sep).count() == 1;
            let digits_after = amount.len() - idx - 1;
            (single && digits_after != 3).then_some(idx)
        }
        (None, None) => None,
    };

    let Some(idx) = separator else {
        return Ok((amount, ""));
    };

    let (whole, fraction) = (&amount[..idx], &amount[idx + 1..]);
    if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(InvalidFare::new("at most two decimal places"));
    }
    Ok((whole, fraction))
}

/// Format a whole number with `,` thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl FromStr for Fare {
    type Err = InvalidFare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fare::parse(s)
    }
}

impl fmt::Debug for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fare({}.{:02})", self.0 / 100, self.0 % 100)
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$ {}.{:02}", group_thousands(self.0 / 100), self.0 % 100)
    }
}

impl Serialize for Fare {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.amount())
    }
}
