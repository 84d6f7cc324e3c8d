/*!
Parameter presets for the standard IEEE-754-2008 interchange formats.

These are not distinct types: a "binary32 value" is just whatever
[`binary::BinaryCodec`][crate::binary::BinaryCodec] you get from
[`binary32()`], applied to a [`Value`][crate::value::Value]. Building a
codec for a non-standard width (say, a 24-bit `(E=7, P=16)` format) is
exactly as supported — just call
[`BinaryCodec::new`][crate::binary::BinaryCodec::new] directly.
*/

use crate::binary::{BinaryCodec, BinaryParams};
use crate::decimal_codec::{DecimalCodec, DecimalParams};

fn binary_codec(es: u32, p: u32, implicit: bool) -> BinaryCodec {
    BinaryCodec::new(BinaryParams::new(es, p, implicit).expect("standard format parameters are valid"))
        .expect("standard format parameters are valid")
}

fn decimal_codec(c: u32, t: u32) -> DecimalCodec {
    DecimalCodec::new(DecimalParams::new(c, t).expect("standard format parameters are valid"))
        .expect("standard format parameters are valid")
}

/// IEEE-754 half precision: E=5, P=10, implicit leading bit.
pub fn binary16() -> BinaryCodec {
    binary_codec(5, 10, true)
}

/// IEEE-754 single precision: E=8, P=23, implicit leading bit.
pub fn binary32() -> BinaryCodec {
    binary_codec(8, 23, true)
}

/// IEEE-754 double precision: E=11, P=52, implicit leading bit.
pub fn binary64() -> BinaryCodec {
    binary_codec(11, 52, true)
}

/// x87 80-bit extended precision: E=15, P=63, explicit leading bit.
pub fn binary80() -> BinaryCodec {
    binary_codec(15, 63, false)
}

/// IEEE-754 quadruple precision: E=15, P=112, implicit leading bit.
pub fn binary128() -> BinaryCodec {
    binary_codec(15, 112, true)
}

/// IEEE-754-2008 octuple precision: E=19, P=236, implicit leading bit.
pub fn binary256() -> BinaryCodec {
    binary_codec(19, 236, true)
}

/// IEEE-754-2008 decimal32: C=11, T=20 (7 digits of precision).
pub fn decimal32() -> DecimalCodec {
    decimal_codec(11, 20)
}

/// IEEE-754-2008 decimal64: C=13, T=50 (16 digits of precision).
pub fn decimal64() -> DecimalCodec {
    decimal_codec(13, 50)
}

/// IEEE-754-2008 decimal128: C=17, T=110 (34 digits of precision).
pub fn decimal128() -> DecimalCodec {
    decimal_codec(17, 110)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_preset_widths_match_standard() {
        assert_eq!(binary16().width(), 16);
        assert_eq!(binary32().width(), 32);
        assert_eq!(binary64().width(), 64);
        assert_eq!(binary80().width(), 80);
        assert_eq!(binary128().width(), 128);
        assert_eq!(binary256().width(), 256);
    }

    #[test]
    fn decimal_preset_widths_match_standard() {
        assert_eq!(decimal32().width(), 32);
        assert_eq!(decimal64().width(), 64);
        assert_eq!(decimal128().width(), 128);
    }

    #[test]
    fn decimal_preset_digit_counts_match_standard() {
        assert_eq!(decimal32().digits(), 7);
        assert_eq!(decimal64().digits(), 16);
        assert_eq!(decimal128().digits(), 34);
    }
}
