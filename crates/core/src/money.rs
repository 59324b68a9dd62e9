#![forbid(unsafe_code)]

use serde::{Serialize, Serializer};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const CENTS_PER_UNIT: i64 = 100;

/// Fixed-point currency amount with two fractional digits, held as cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_units(units: i64) -> Self {
        Self(units * CENTS_PER_UNIT)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    /// Parses `"1234"`, `"1234.5"` or `"-1234.50"`. More than two fractional
    /// digits is rejected rather than rounded.
    pub fn parse(value: &str) -> Result<Self, MoneyError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(MoneyError::Empty);
        }
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::InvalidDigits);
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::InvalidDigits);
        }
        if frac.len() > 2 {
            return Err(MoneyError::TooPrecise);
        }

        let whole = whole.parse::<i64>().map_err(|_| MoneyError::Overflow)?;
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| MoneyError::InvalidDigits)? * 10,
            _ => frac.parse::<i64>().map_err(|_| MoneyError::InvalidDigits)?,
        };
        let cents = whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or(MoneyError::Overflow)?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        write!(f, "{sign}{}.{:02}", abs / per_unit, abs % per_unit)
    }
}

/// Saturates at the `i64` cent bounds instead of wrapping or panicking; use
/// [`Money::checked_add`] to detect overflow.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or(if rhs.is_negative() {
            Self(i64::MIN)
        } else {
            Self(i64::MAX)
        })
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// Serialized as a decimal string so JSON consumers never see float rounding.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoneyError {
    Empty,
    InvalidDigits,
    TooPrecise,
    Overflow,
}

impl MoneyError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "amount must not be empty",
            Self::InvalidDigits => "amount must be a decimal number",
            Self::TooPrecise => "amount supports at most two fractional digits",
            Self::Overflow => "amount is out of range",
        }
    }
}

impl std::fmt::Display for MoneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for MoneyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_whole_and_fractional_amounts() {
        assert_eq!(Money::parse("150").unwrap(), Money::from_cents(15_000));
        assert_eq!(Money::parse("12.5").unwrap(), Money::from_cents(1_250));
        assert_eq!(Money::parse(" 0.07 ").unwrap(), Money::from_cents(7));
        assert_eq!(Money::parse("-3.10").unwrap(), Money::from_cents(-310));
    }

    #[test]
    fn parse_rejects_malformed_amounts() {
        assert_eq!(Money::parse("").unwrap_err(), MoneyError::Empty);
        assert_eq!(Money::parse("1.234").unwrap_err(), MoneyError::TooPrecise);
        assert_eq!(Money::parse("1e3").unwrap_err(), MoneyError::InvalidDigits);
        assert_eq!(Money::parse(".5").unwrap_err(), MoneyError::InvalidDigits);
        assert_eq!(
            Money::parse("99999999999999999999").unwrap_err(),
            MoneyError::Overflow
        );
    }

    #[test]
    fn display_keeps_two_digits() {
        assert_eq!(Money::from_cents(123_450).to_string(), "1234.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn sums_are_exact() {
        let parts = [
            Money::parse("0.10").unwrap(),
            Money::parse("0.20").unwrap(),
            Money::parse("0.30").unwrap(),
        ];
        let total: Money = parts.iter().sum();
        assert_eq!(total, Money::parse("0.60").unwrap());
    }

    #[test]
    fn addition_saturates_at_the_cent_bounds() {
        let near_max = Money::from_cents(i64::MAX - 1);
        assert_eq!(near_max.checked_add(Money::from_cents(5)), None);
        assert_eq!(near_max + Money::from_cents(5), Money::from_cents(i64::MAX));

        let near_min = Money::from_cents(i64::MIN + 1);
        assert_eq!(near_min.checked_add(Money::from_cents(-5)), None);
        assert_eq!(near_min + Money::from_cents(-5), Money::from_cents(i64::MIN));

        let mut total = near_max;
        total += Money::from_cents(5);
        assert_eq!(total, Money::from_cents(i64::MAX));
        let total: Money = [near_max, Money::from_units(1)].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));

        assert_eq!(
            Money::from_cents(150).checked_add(Money::from_cents(-50)),
            Some(Money::from_units(1))
        );
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::from_units(350)).unwrap();
        assert_eq!(json, "\"350.00\"");
    }
}
