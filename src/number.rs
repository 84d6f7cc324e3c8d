// number.rs
//
// Number trait

use rug::Integer;

/// The "digital" number representing a (projective) real number format.
///
/// All computer number systems share some characteristics.
/// They all can be represented by a finite-precision number in
/// scientific notation: `(-1)^s * c * b^exp` where `s` is the sign,
/// `c` is the integer significand, `b` is the radix, and `exp` is
/// the exponent. Specifically, `s` is either `0` or `1`, `c` is
/// non-negative, and `b` is positive. Number systems can usually be
/// split into two broad groups: floating-point or fixed-point, where
/// the "point" refers to the position of the "ones" place within `c`, if
/// `c` were extended to an infinite sequence of digits in either direction.
/// Number systems may encode non-real numbers, notably infinity or NaN.
pub trait Number {
    /// Returns the radix of a number.
    /// It must be strictly positive.
    fn radix() -> usize;

    /// Returns true if the number's sign bit is true.
    /// For number formats with no notion of sign bit, the result
    /// will always be false.
    fn sign(&self) -> bool;

    /// Viewing this number as `(-1)^s * c * b^exp` where `c` is an integer,
    /// returns `exp`. Only well-defined for finite, non-zero numbers.
    fn exp(&self) -> Option<isize>;

    /// Viewing this number as `(-1)^s * f * b^e` where `f` is a fraction
    /// between 1 and `b`, returns the exponent `e`. This is the preferred
    /// IEEE-754 interpretation of an exponent. Only well-defined for
    /// finite, non-zero numbers.
    fn e(&self) -> Option<isize>;

    /// The "least absolute exponent", the place below the least
    /// significant digit of the significand. Always equal to
    /// `self.exp() - 1`. Only well-defined for finite, non-zero numbers.
    fn n(&self) -> Option<isize>;

    /// Viewing this number as `(-1)^s * c * b^exp` where `c` is an integer,
    /// returns `c`. Only well-defined for finite, non-zero numbers.
    fn c(&self) -> Option<Integer>;

    /// Viewing this number as `(-1)^s * c * b^exp` where `c` is an integer,
    /// returns `(-1)^s * c`, the signed significand. Only well-defined for
    /// finite, non-zero numbers.
    fn m(&self) -> Option<Integer>;

    /// Precision of the significand, in `radix()`-ary digits.
    /// For values that do not encode numbers the result is 0.
    fn p(&self) -> usize;

    /// Returns true if this number is not a real number.
    /// Example: NaN or +/-Inf.
    fn is_nar(&self) -> bool;

    /// Returns true if this number is finite.
    fn is_finite(&self) -> bool;

    /// Returns true if this number is infinite.
    fn is_infinite(&self) -> bool;

    /// Returns true if this number is zero.
    fn is_zero(&self) -> bool;

    /// Returns true if this number is negative.
    /// Not always well-defined (e.g. signed zero), so the result is an Option.
    fn is_negative(&self) -> Option<bool>;

    /// Returns true if this number represents a numerical value:
    /// either a finite number or some limiting value (e.g. infinity).
    fn is_numerical(&self) -> bool;
}
