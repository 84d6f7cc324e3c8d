use std::ops::{Mul, Neg, Sub};

use num_traits::{Signed, Zero};
use rug::Integer;

use crate::number::Number;
use crate::round::RoundingMode;

use super::Decimal;
use crate::util::round_div as div_round;

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        if self.is_zero() {
            self
        } else {
            Decimal {
                sign: !Number::sign(&self),
                ..self
            }
        }
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    /// Exact subtraction; decimal subtraction never loses precision.
    fn sub(self, rhs: &Decimal) -> Decimal {
        let n = self.exp().unwrap_or(0).min(rhs.exp().unwrap_or(0));
        let lhs_exp = self.exp().unwrap_or(n);
        let rhs_exp = rhs.exp().unwrap_or(n);

        let lhs_mag = self.c().unwrap_or_else(|| Integer::from(0))
            * crate::util::pow10((lhs_exp - n) as u32);
        let rhs_mag = rhs.c().unwrap_or_else(|| Integer::from(0))
            * crate::util::pow10((rhs_exp - n) as u32);

        let lhs_signed = if self.sign() { -lhs_mag } else { lhs_mag };
        let rhs_signed = if rhs.sign() { -rhs_mag } else { rhs_mag };

        let diff = lhs_signed - rhs_signed;
        let sign = diff.is_negative();
        Decimal {
            sign,
            exp: n,
            unscaled: diff.abs(),
        }
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    /// Exact multiplication; decimal multiplication never loses precision.
    fn mul(self, rhs: &Decimal) -> Decimal {
        let exp = self.exp().unwrap_or(0) + rhs.exp().unwrap_or(0);
        let unscaled = self.c().unwrap_or_else(|| Integer::from(0)) * rhs.c().unwrap_or_else(|| Integer::from(0));
        let sign = self.sign() != rhs.sign();
        Decimal {
            sign: sign && !unscaled.is_zero(),
            exp,
            unscaled,
        }
    }
}

impl Decimal {
    /// Approximates `1 / self`, rounded to `extra_digits` digits past
    /// the decimal point, per `rm`.
    ///
    /// Decimal division is not generally terminating (e.g. `1/3`), so
    /// unlike [`Sub`]/[`Mul`] this is necessarily an approximation.
    pub fn reciprocal(&self, extra_digits: usize, rm: RoundingMode) -> Decimal {
        assert!(!self.is_zero(), "reciprocal of zero is undefined");
        let exp = self.exp().unwrap();
        let unscaled = self.c().unwrap();

        let shift = extra_digits as isize - exp;
        let (numerator, denominator) = if shift >= 0 {
            (crate::util::pow10(shift as u32), unscaled)
        } else {
            (Integer::from(1), unscaled * crate::util::pow10((-shift) as u32))
        };

        let q = div_round(&numerator, &denominator, self.sign, rm);
        Decimal {
            sign: self.sign && !q.is_zero(),
            exp: -(extra_digits as isize),
            unscaled: q,
        }
    }

    /// Approximates `self / other`, rounded to `extra_digits` digits
    /// past `self`'s scale, per `rm`.
    pub fn div(&self, other: &Decimal, extra_digits: usize, rm: RoundingMode) -> Decimal {
        assert!(!other.is_zero(), "division by zero");
        let recip = other.reciprocal(other.precision() + extra_digits + 1, rm);
        self * &recip
    }
}

impl Mul<&Decimal> for Decimal {
    type Output = Decimal;
    fn mul(self, rhs: &Decimal) -> Decimal {
        &self * rhs
    }
}
