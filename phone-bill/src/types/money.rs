use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
};

use serde::Serialize;

use super::{number::Number, time::BillableMinutes};

/// A monetary amount in the single currency of the bill.
#[derive(Debug, Default, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Money(Number);

impl Money {
    pub(crate) fn zero() -> Self {
        Self(Number::default())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl Mul<BillableMinutes> for Money {
    type Output = Money;

    fn mul(self, rhs: BillableMinutes) -> Self::Output {
        Self(self.0 * Number::from(rhs.count()))
    }
}

impl Mul<Money> for BillableMinutes {
    type Output = Money;

    fn mul(self, rhs: Money) -> Self::Output {
        rhs * self
    }
}

impl From<rust_decimal::Decimal> for Money {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self(value.into())
    }
}

impl From<Money> for rust_decimal::Decimal {
    fn from(value: Money) -> Self {
        value.0.into()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::Money;
    use crate::types::time::BillableMinutes;

    #[test]
    fn rate_times_minutes() {
        let cost = Money::from(dec!(0.5)) * BillableMinutes::from_seconds(150);
        assert_eq!(Decimal::from(cost), dec!(1.5));
    }

    #[test]
    fn sum_of_amounts_is_exact() {
        let total: Money = std::iter::repeat_n(Money::from(dec!(0.1)), 10).sum();
        assert_eq!(Decimal::from(total), dec!(1.0));
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Money::from(dec!(1.5)).to_string(), "1.50");
        assert_eq!(Money::from(dec!(13.8)).to_string(), "13.80");
    }
}
