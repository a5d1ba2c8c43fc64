use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const CURRENCY_CODE: &str = "USD";

//--------------------------------------       Cents        ----------------------------------------------------------
/// An exact monetary amount, stored as an integer number of minor units (cents).
///
/// All balance and price arithmetic in the ledger goes through this type, so no binary floating
/// point value ever holds money. External I/O uses decimal strings with two fractional digits.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Cents(i64);

op!(binary Cents, Add, add);
op!(binary Cents, Sub, sub);
op!(inplace Cents, AddAssign, add_assign);
op!(inplace Cents, SubAssign, sub_assign);
op!(unary Cents, Neg, neg);

impl Mul<i64> for Cents {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct MoneyError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Cents {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Cents {}

impl TryFrom<u64> for Cents {
    type Error = MoneyError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(MoneyError(format!("Value {value} is too large to convert to cents")))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl FromStr for Cents {
    type Err = MoneyError;

    /// Parses a decimal amount with at most two fractional digits, e.g. `100`, `100.5` or `100.05`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(MoneyError(format!("'{s}' is not a monetary amount")));
        }
        if frac.len() > 2 {
            return Err(MoneyError(format!("'{s}' has more than two fractional digits")));
        }
        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| MoneyError(format!("'{s}' is not a monetary amount")))?
        };
        let frac = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<2}").parse::<i64>().map_err(|_| MoneyError(format!("'{s}' is not a monetary amount")))?
        };
        let cents = whole * 100 + frac;
        Ok(if negative { Self(-cents) } else { Self(cents) })
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Cents {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// The amount for a whole number of currency units, e.g. `from_whole(100)` is 100.00.
    pub fn from_whole(units: i64) -> Self {
        Self(units * 100)
    }

    /// The largest whole-cent amount not exceeding `pct` percent of this value.
    pub fn percent(&self, pct: u8) -> Self {
        Self(self.0.saturating_mul(i64::from(pct)) / 100)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}
