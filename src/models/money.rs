//! Currency amounts kept as integer cents.
//!
//! Amounts travel over the wire and through configuration as decimal strings
//! (`"12.99"`), so no floating point value is ever involved in pricing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount '{0}'")]
    Invalid(String),
    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Amount multiplied by a quantity (seats, tickets); `None` on overflow.
    pub fn checked_times(self, quantity: usize) -> Option<Self> {
        let quantity = i64::try_from(quantity).ok()?;
        self.cents.checked_mul(quantity).map(Self::from_cents)
    }

    pub fn checked_add(self, other: Money) -> Option<Self> {
        self.cents.checked_add(other.cents).map(Self::from_cents)
    }

    pub const fn is_negative(self) -> bool {
        self.cents < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) {
            return Err(MoneyParseError::Invalid(raw.to_string()));
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(raw.to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::Invalid(raw.to_string()))?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(|| MoneyParseError::Invalid(raw.to_string()))?;

        Ok(Self::from_cents(if negative { -cents } else { cents }))
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("12.99".parse::<Money>().unwrap().cents(), 1299);
        assert_eq!("2".parse::<Money>().unwrap().cents(), 200);
        assert_eq!("2.5".parse::<Money>().unwrap().cents(), 250);
        assert_eq!("-0.01".parse::<Money>().unwrap().cents(), -1);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert!(matches!("12.999".parse::<Money>(), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!("1,50".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(".50".parse::<Money>(), Err(MoneyParseError::Invalid(_))));
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_cents(4097).to_string(), "40.97");
        assert_eq!(Money::from_cents(200).to_string(), "2.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn arithmetic_reports_overflow() {
        let price = Money::from_cents(1299);
        assert_eq!(price.checked_times(3), Some(Money::from_cents(3897)));
        assert_eq!(Money::from_cents(i64::MAX).checked_times(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(1299)).unwrap();
        assert_eq!(json, "\"12.99\"");
        let back: Money = serde_json::from_str("\"40.97\"").unwrap();
        assert_eq!(back, Money::from_cents(4097));
    }
}
