use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_traits::{Signed, Zero};
use rug::Integer;

use crate::error::ConversionError;
use crate::number::Number;
use crate::round::RoundingMode;

/// An arbitrary-precision signed decimal number.
///
/// Represented canonically as `(-1)^sign * unscaled * 10^exp` with
/// `unscaled >= 0`. This is the same "unnormalized scientific" triple
/// shape used throughout this crate's codecs, specialized to radix 10
/// and with no infinite/NaN case of its own (those live in [`Value`][crate::value::Value]).
#[derive(Debug, Clone)]
pub struct Decimal {
    pub(super) sign: bool,
    pub(super) exp: isize,
    pub(super) unscaled: Integer,
}

impl Number for Decimal {
    fn radix() -> usize {
        10
    }

    fn sign(&self) -> bool {
        self.sign
    }

    fn exp(&self) -> Option<isize> {
        if self.unscaled.is_zero() {
            None
        } else {
            Some(self.exp)
        }
    }

    fn e(&self) -> Option<isize> {
        self.exp().map(|exp| (exp - 1) + self.digits() as isize)
    }

    fn n(&self) -> Option<isize> {
        self.exp().map(|exp| exp - 1)
    }

    fn c(&self) -> Option<Integer> {
        if self.unscaled.is_zero() {
            None
        } else {
            Some(self.unscaled.clone())
        }
    }

    fn m(&self) -> Option<Integer> {
        self.c().map(|c| if self.sign { -c } else { c })
    }

    fn p(&self) -> usize {
        self.digits()
    }

    fn is_nar(&self) -> bool {
        false
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn is_infinite(&self) -> bool {
        false
    }

    fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    fn is_negative(&self) -> Option<bool> {
        if self.is_zero() {
            None
        } else {
            Some(self.sign)
        }
    }

    fn is_numerical(&self) -> bool {
        true
    }
}

impl Decimal {
    /// Constructs the canonical zero.
    pub fn zero() -> Self {
        Decimal {
            sign: false,
            exp: 0,
            unscaled: Integer::from(0),
        }
    }

    /// Constructs the canonical one.
    pub fn one() -> Self {
        Decimal {
            sign: false,
            exp: 0,
            unscaled: Integer::from(1),
        }
    }

    /// Constructs a decimal from its canonical triple.
    ///
    /// `unscaled` must be non-negative; the magnitude's sign is carried
    /// entirely by `sign`. Violating this invariant is a caller bug in
    /// this crate, so it is checked rather than silently corrected.
    pub fn new(sign: bool, exp: isize, unscaled: Integer) -> Result<Self, ConversionError> {
        if unscaled.is_negative() {
            return Err(ConversionError::InvalidSign);
        }
        Ok(Decimal { sign, exp, unscaled })
    }

    /// Constructs a decimal from a signed integer (scale 0).
    pub fn from_integer(value: Integer) -> Self {
        let sign = value.is_negative();
        Decimal {
            sign,
            exp: 0,
            unscaled: value.abs(),
        }
    }

    /// Number of decimal digits in the unscaled significand.
    /// Zero has zero digits, matching [`Number::p`]'s convention.
    fn digits(&self) -> usize {
        if self.unscaled.is_zero() {
            0
        } else {
            self.unscaled.to_string().trim_start_matches('-').len()
        }
    }

    /// The power-of-ten scale: `-exp`.
    pub fn scale(&self) -> isize {
        -self.exp
    }

    /// Decimal digit count of the unscaled significand.
    pub fn precision(&self) -> usize {
        self.digits()
    }

    /// Returns the unsigned magnitude of this decimal (sign cleared).
    pub fn abs(&self) -> Self {
        Decimal {
            sign: false,
            exp: self.exp,
            unscaled: self.unscaled.clone(),
        }
    }

    /// The integer part of the magnitude, `floor(|value|)`.
    pub fn integer_part(&self) -> Integer {
        if self.exp >= 0 {
            self.unscaled.clone() * crate::util::pow10(self.exp as u32)
        } else {
            let denom = crate::util::pow10((-self.exp) as u32);
            self.unscaled.clone() / denom
        }
    }

    /// The exact fractional part of the magnitude as `(numerator, denominator)`,
    /// with `denominator` a power of ten and `0 <= numerator < denominator`.
    pub fn fraction_ratio(&self) -> (Integer, Integer) {
        if self.exp >= 0 {
            (Integer::from(0), Integer::from(1))
        } else {
            let denom = crate::util::pow10((-self.exp) as u32);
            let num = self.unscaled.clone() % &denom;
            (num, denom)
        }
    }

    /// The exact magnitude as `(numerator, denominator)`, unsigned.
    pub fn abs_ratio(&self) -> (Integer, Integer) {
        if self.exp >= 0 {
            (self.unscaled.clone() * crate::util::pow10(self.exp as u32), Integer::from(1))
        } else {
            (self.unscaled.clone(), crate::util::pow10((-self.exp) as u32))
        }
    }

    /// Rounds this decimal to an integer-valued (`scale() == 0`) decimal,
    /// per `mode`.
    pub fn round_to_integer(&self, mode: RoundingMode) -> Decimal {
        if self.exp >= 0 {
            return self.clone();
        }

        let int_part = self.integer_part();
        let (num, den) = self.fraction_ratio();
        if num.is_zero() {
            return Decimal {
                sign: self.sign,
                exp: 0,
                unscaled: int_part,
            };
        }

        let twice = Integer::from(&num * 2);
        let half_cmp = twice.cmp(&den);
        let is_half = half_cmp == Ordering::Equal;
        let above_half = half_cmp == Ordering::Greater;

        let round_up = match mode {
            RoundingMode::NearestTiesToEven => {
                above_half || (is_half && !crate::util::is_even(self.exp, &int_part))
            }
            RoundingMode::NearestTiesAwayZero => above_half || is_half,
            RoundingMode::TowardZero => false,
            RoundingMode::TowardPositive => !self.sign,
            RoundingMode::TowardNegative => self.sign,
        };

        let unscaled = if round_up { int_part + Integer::from(1) } else { int_part };
        Decimal {
            sign: self.sign && !unscaled.is_zero(),
            exp: 0,
            unscaled,
        }
    }

    /// Truncates toward zero to an integer-valued decimal.
    pub fn trunc(&self) -> Decimal {
        let int_part = self.integer_part();
        Decimal {
            sign: self.sign && !int_part.is_zero(),
            exp: 0,
            unscaled: int_part,
        }
    }

    /// Rescales so that `exp() <= target_exp`, by multiplying the
    /// unscaled significand by the appropriate power of ten. Never
    /// loses precision (it only ever adds trailing zero digits).
    pub fn rescale(&self, target_exp: isize) -> Decimal {
        if target_exp >= self.exp {
            return self.clone();
        }
        let shift = (self.exp - target_exp) as u32;
        Decimal {
            sign: self.sign,
            exp: target_exp,
            unscaled: self.unscaled.clone() * crate::util::pow10(shift),
        }
    }
}

impl FromStr for Decimal {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let invalid = || ConversionError::InvalidParameter {
            detail: format!("not a decimal literal: {:?}", s),
        };

        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let digits = format!("{}{}", int_part, frac_part);
        let digits = if digits.is_empty() { "0" } else { &digits };
        let unscaled = Integer::from_str(digits).map_err(|_| invalid())?;
        let exp = -(frac_part.len() as isize);
        Ok(Decimal { sign, exp, unscaled })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign {
            write!(f, "-")?;
        }
        if self.exp >= 0 {
            write!(f, "{}", self.integer_part())
        } else {
            let (num, den) = self.fraction_ratio();
            let width = den.to_string().len() - 1;
            write!(f, "{}.{:0width$}", self.integer_part(), num, width = width)
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_zero() && other.is_zero() {
            return Some(Ordering::Equal);
        }
        if self.is_zero() {
            return Some(if other.sign { Ordering::Greater } else { Ordering::Less });
        }
        if other.is_zero() {
            return Some(if self.sign { Ordering::Less } else { Ordering::Greater });
        }

        // normalize to a common exponent, then compare signed magnitudes
        let n = self.exp.min(other.exp);
        let lhs = self.unscaled.clone() * crate::util::pow10((self.exp - n) as u32);
        let rhs = other.unscaled.clone() * crate::util::pow10((other.exp - n) as u32);

        let lhs = if self.sign { -lhs } else { lhs };
        let rhs = if other.sign { -rhs } else { rhs };
        Some(lhs.cmp(&rhs))
    }
}
