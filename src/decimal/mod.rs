/*!
Arbitrary-precision decimal numbers.

This module implements [`Decimal`], the signed, arbitrary-precision
decimal primitive used throughout the binary and decimal codecs. It is
radix 10 and has no infinite or NaN variant of its own — those
categories live one level up, in [`Value`][crate::value::Value].
*/

mod number;
mod ops;

pub use number::Decimal;
