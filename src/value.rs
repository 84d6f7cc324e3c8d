/*!
The abstract floating-point value.

[`Value`] is the tagged union every codec encodes from and decodes to:
a finite signed decimal magnitude, a signed infinity, or a quiet/signaling
NaN. It carries no format parameters of its own — those belong to the
codec that constructs or interprets it.
*/

use crate::decimal::Decimal;
use crate::error::ConversionError;
use crate::number::Number;

/// An abstract IEEE-754-style value: finite, infinite, or not-a-number.
#[derive(Debug, Clone)]
pub enum Value {
    /// A finite value. `magnitude` is always non-negative; `sign` carries
    /// the value's sign, including for signed zero.
    Finite { sign: bool, magnitude: Decimal },
    /// Signed infinity.
    Infinity { sign: bool },
    /// Not-a-number, either quiet or signaling.
    Nan { sign: bool, signaling: bool },
}

/// A value's category, independent of its sign or magnitude. Used by
/// [`Value::from_category`], the generic counterpart to the specific
/// constructors ([`Value::finite`], [`Value::infinity`], [`Value::nan`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Finite,
    Infinite,
    Nan,
    SignalingNan,
}

impl Value {
    /// Constructs a finite value, checking that `magnitude` is unsigned.
    pub fn finite(sign: bool, magnitude: Decimal) -> Result<Self, ConversionError> {
        if magnitude.sign() {
            return Err(ConversionError::InvalidSign);
        }
        Ok(Value::Finite { sign, magnitude })
    }

    /// Constructs a value from an explicit category plus its data,
    /// validating that the two agree: `Category::Finite` requires
    /// `magnitude` to be `Some`, and every other category requires it to
    /// be `None`.
    pub fn from_category(
        category: Category,
        sign: bool,
        magnitude: Option<Decimal>,
    ) -> Result<Self, ConversionError> {
        match (category, magnitude) {
            (Category::Finite, Some(magnitude)) => Value::finite(sign, magnitude),
            (Category::Infinite, None) => Ok(Value::infinity(sign)),
            (Category::Nan, None) => Ok(Value::nan(sign)),
            (Category::SignalingNan, None) => Ok(Value::snan(sign)),
            _ => Err(ConversionError::CategoryMismatch),
        }
    }

    /// Constructs a finite value without checking the magnitude's sign.
    ///
    /// Reserved for codec-internal derivation of memoized constants
    /// (max/min-normal/min-subnormal) before the codec has finished
    /// constructing the overflow check those constants would otherwise
    /// need to go through. Never exposed outside the crate.
    pub(crate) fn finite_unchecked(sign: bool, magnitude: Decimal) -> Self {
        Value::Finite { sign, magnitude }
    }

    /// Signed positive/negative zero.
    pub fn zero(sign: bool) -> Self {
        Value::Finite {
            sign,
            magnitude: Decimal::zero(),
        }
    }

    /// Signed infinity.
    pub fn infinity(sign: bool) -> Self {
        Value::Infinity { sign }
    }

    /// A quiet NaN.
    pub fn nan(sign: bool) -> Self {
        Value::Nan { sign, signaling: false }
    }

    /// A signaling NaN.
    pub fn snan(sign: bool) -> Self {
        Value::Nan { sign, signaling: true }
    }

    /// The value's sign bit, present for every category including NaN.
    pub fn sign(&self) -> bool {
        match self {
            Value::Finite { sign, .. } => *sign,
            Value::Infinity { sign } => *sign,
            Value::Nan { sign, .. } => *sign,
        }
    }

    /// Returns the magnitude of a finite value, or [`ConversionError::NotFinite`].
    pub fn magnitude(&self) -> Result<&Decimal, ConversionError> {
        match self {
            Value::Finite { magnitude, .. } => Ok(magnitude),
            _ => Err(ConversionError::NotFinite),
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Value::Finite { .. })
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Value::Finite { magnitude, .. } if magnitude.is_zero())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Value::Infinity { .. })
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Nan { .. })
    }

    pub fn is_quiet_nan(&self) -> bool {
        matches!(self, Value::Nan { signaling: false, .. })
    }

    pub fn is_signaling_nan(&self) -> bool {
        matches!(self, Value::Nan { signaling: true, .. })
    }

    /// Returns the negation of this value (sign flipped; magnitude, NaN
    /// signaling bit unchanged).
    pub fn negate(&self) -> Self {
        match self {
            Value::Finite { sign, magnitude } => Value::Finite {
                sign: !sign,
                magnitude: magnitude.clone(),
            },
            Value::Infinity { sign } => Value::Infinity { sign: !sign },
            Value::Nan { sign, signaling } => Value::Nan {
                sign: !sign,
                signaling: *signaling,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_zero_is_distinct() {
        let pos = Value::zero(false);
        let neg = Value::zero(true);
        assert!(pos.is_zero());
        assert!(neg.is_zero());
        assert_ne!(pos.sign(), neg.sign());
    }

    #[test]
    fn finite_rejects_signed_magnitude() {
        let bad = Decimal::new(true, 0, rug::Integer::from(5)).unwrap();
        assert!(Value::finite(false, bad).is_err());
    }

    #[test]
    fn from_category_rejects_mismatched_data() {
        let magnitude = Decimal::one();
        assert_eq!(
            Value::from_category(Category::Finite, false, None).unwrap_err(),
            ConversionError::CategoryMismatch
        );
        assert_eq!(
            Value::from_category(Category::Infinite, false, Some(magnitude)).unwrap_err(),
            ConversionError::CategoryMismatch
        );
    }

    #[test]
    fn from_category_builds_every_category() {
        assert!(Value::from_category(Category::Finite, false, Some(Decimal::one())).unwrap().is_finite());
        assert!(Value::from_category(Category::Infinite, false, None).unwrap().is_infinite());
        assert!(Value::from_category(Category::Nan, false, None).unwrap().is_quiet_nan());
        assert!(Value::from_category(Category::SignalingNan, false, None).unwrap().is_signaling_nan());
    }

    #[test]
    fn negate_flips_sign_only() {
        let v = Value::finite(false, Decimal::one()).unwrap();
        let n = v.negate();
        assert!(n.sign());
        assert_eq!(n.magnitude().unwrap(), v.magnitude().unwrap());
    }
}
