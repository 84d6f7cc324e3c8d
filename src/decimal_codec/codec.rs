use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use rug::Integer;

use crate::decimal::Decimal;
use crate::error::ConversionError;
use crate::number::Number;
use crate::round::RoundingMode;
use crate::util::{bitmask, pow10, round_div};
use crate::value::Value;

use super::declet::{decode_declet, encode_declet};
use super::params::DecimalParams;

/// Which significand encoding a [`DecimalCodec`]'s generic `encode`/`decode`
/// uses for the trailing-significand field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignificandEncoding {
    /// Binary Integer Decimal: the trailing digits as a plain binary integer.
    Bid,
    /// Densely Packed Decimal: the trailing digits packed as declets.
    Dpd,
}

static DEFAULT_ENCODING_IS_DPD: AtomicBool = AtomicBool::new(false);

/// The process-wide default significand encoding used by [`DecimalCodec::encode`]
/// and [`DecimalCodec::decode`]. Defaults to BID.
pub fn default_encoding() -> SignificandEncoding {
    if DEFAULT_ENCODING_IS_DPD.load(AtomicOrdering::SeqCst) {
        SignificandEncoding::Dpd
    } else {
        SignificandEncoding::Bid
    }
}

/// Sets the process-wide default significand encoding.
pub fn set_default_encoding(encoding: SignificandEncoding) {
    DEFAULT_ENCODING_IS_DPD.store(encoding == SignificandEncoding::Dpd, AtomicOrdering::SeqCst);
}

fn digit_count(n: &Integer) -> u32 {
    n.to_string().len() as u32
}

/// The result of bringing a decimal magnitude's `(coefficient, exponent)`
/// pair into a codec's representable range.
enum Normalized {
    Zero,
    Overflow,
    Value(Integer, isize),
}

/// A codec for one IEEE-754 decimal interchange format, parameterized by
/// combination-field width and trailing-significand width.
#[derive(Debug, Clone)]
pub struct DecimalCodec {
    params: DecimalParams,
    digits: u32,
    bias: isize,
    e_min: isize,
    e_max: isize,
    max_value: Decimal,
    min_normal: Decimal,
    min_subnormal: Decimal,
    epsilon: Decimal,
}

impl DecimalCodec {
    /// Constructs a codec for the given format parameters.
    pub fn new(params: DecimalParams) -> Result<Self, ConversionError> {
        let digits = params.digits();
        let bias = params.bias();
        let e_max = params.exponent_span() / 2 - digits as isize + 1;
        let e_min = -bias;

        let max_c = pow10(digits) - Integer::from(1);
        let max_value = Decimal::new(false, e_max, max_c).expect("non-negative by construction");
        let min_normal =
            Decimal::new(false, e_min, pow10(digits - 1)).expect("non-negative by construction");
        let min_subnormal =
            Decimal::new(false, e_min, Integer::from(1)).expect("non-negative by construction");
        let epsilon =
            Decimal::new(false, 1 - digits as isize, Integer::from(1)).expect("non-negative by construction");

        Ok(DecimalCodec {
            params,
            digits,
            bias,
            e_min,
            e_max,
            max_value,
            min_normal,
            min_subnormal,
            epsilon,
        })
    }

    pub fn params(&self) -> DecimalParams {
        self.params
    }

    pub fn width(&self) -> u32 {
        self.params.width()
    }

    /// Total decimal digits of precision.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The unbiased exponent range `(e_min, e_max)` of full-precision values.
    pub fn exponent_range(&self) -> (isize, isize) {
        (self.e_min, self.e_max)
    }

    pub fn max_value(&self) -> &Decimal {
        &self.max_value
    }

    pub fn min_normal(&self) -> &Decimal {
        &self.min_normal
    }

    pub fn min_subnormal(&self) -> &Decimal {
        &self.min_subnormal
    }

    pub fn epsilon(&self) -> &Decimal {
        &self.epsilon
    }

    fn combination_width(&self) -> u32 {
        self.params.c
    }

    fn continuation_width(&self) -> u32 {
        self.params.c - 5
    }

    fn trailing_width(&self) -> u32 {
        self.params.t
    }

    pub fn positive_infinity(&self) -> Integer {
        self.encode(&Value::infinity(false), RoundingMode::NearestTiesToEven)
    }

    pub fn negative_infinity(&self) -> Integer {
        self.encode(&Value::infinity(true), RoundingMode::NearestTiesToEven)
    }

    pub fn quiet_nan(&self, sign: bool) -> Integer {
        self.encode(&Value::nan(sign), RoundingMode::NearestTiesToEven)
    }

    pub fn signaling_nan(&self, sign: bool) -> Integer {
        self.encode(&Value::snan(sign), RoundingMode::NearestTiesToEven)
    }

    pub fn zero(&self, sign: bool) -> Integer {
        self.encode(&Value::zero(sign), RoundingMode::NearestTiesToEven)
    }

    pub fn is_negative(&self, bits: &Integer) -> bool {
        bits.get_bit(self.width() - 1)
    }

    pub fn is_positive(&self, bits: &Integer) -> bool {
        !self.is_negative(bits)
    }

    pub fn is_infinity(&self, bits: &Integer) -> bool {
        matches!(self.decode(bits), Value::Infinity { .. })
    }

    pub fn is_pos_infinity(&self, bits: &Integer) -> bool {
        matches!(self.decode(bits), Value::Infinity { sign: false })
    }

    pub fn is_neg_infinity(&self, bits: &Integer) -> bool {
        matches!(self.decode(bits), Value::Infinity { sign: true })
    }

    pub fn is_nan(&self, bits: &Integer) -> bool {
        matches!(self.decode(bits), Value::Nan { .. })
    }

    pub fn is_quiet_nan(&self, bits: &Integer) -> bool {
        matches!(self.decode(bits), Value::Nan { signaling: false, .. })
    }

    pub fn is_signaling_nan(&self, bits: &Integer) -> bool {
        matches!(self.decode(bits), Value::Nan { signaling: true, .. })
    }

    /// Alias for [`Self::quiet_nan`].
    pub fn nan(&self, sign: bool) -> Integer {
        self.quiet_nan(sign)
    }

    /// Classifies `(sign, magnitude)` into a [`Value`], mapping a magnitude
    /// beyond this format's `max_value` to signed infinity rather than
    /// erroring (per the format's overflow convention).
    pub fn value(&self, sign: bool, magnitude: Decimal) -> Result<Value, ConversionError> {
        if magnitude.sign() {
            return Err(ConversionError::InvalidSign);
        }
        if magnitude > self.max_value {
            Ok(Value::infinity(sign))
        } else {
            Ok(Value::Finite { sign, magnitude })
        }
    }

    /// Encodes using the process-wide default significand encoding.
    pub fn encode(&self, value: &Value, rm: RoundingMode) -> Integer {
        match default_encoding() {
            SignificandEncoding::Bid => self.encode_bid(value, rm),
            SignificandEncoding::Dpd => self.encode_dpd(value, rm),
        }
    }

    /// Decodes using the process-wide default significand encoding.
    pub fn decode(&self, bits: &Integer) -> Value {
        match default_encoding() {
            SignificandEncoding::Bid => self.decode_bid(bits),
            SignificandEncoding::Dpd => self.decode_dpd(bits),
        }
    }

    pub fn encode_bid(&self, value: &Value, rm: RoundingMode) -> Integer {
        self.encode_with(value, rm, true)
    }

    pub fn encode_dpd(&self, value: &Value, rm: RoundingMode) -> Integer {
        self.encode_with(value, rm, false)
    }

    /// Encodes using the process-wide default rounding mode and the
    /// process-wide default significand encoding.
    pub fn encode_with_default_rounding(&self, value: &Value) -> Integer {
        self.encode(value, crate::round::default_rounding_mode())
    }

    /// Encodes BID using the process-wide default rounding mode.
    pub fn encode_bid_with_default_rounding(&self, value: &Value) -> Integer {
        self.encode_bid(value, crate::round::default_rounding_mode())
    }

    /// Encodes DPD using the process-wide default rounding mode.
    pub fn encode_dpd_with_default_rounding(&self, value: &Value) -> Integer {
        self.encode_dpd(value, crate::round::default_rounding_mode())
    }

    pub fn decode_bid(&self, bits: &Integer) -> Value {
        self.decode_with(bits, true)
    }

    pub fn decode_dpd(&self, bits: &Integer) -> Value {
        self.decode_with(bits, false)
    }

    /// Brings a finite nonzero magnitude's `(coefficient, exponent)` pair
    /// into this codec's representable range, rounding or padding with
    /// trailing zeros as needed.
    fn normalize(&self, magnitude: &Decimal, sign: bool, rm: RoundingMode) -> Normalized {
        let mut s = match magnitude.c() {
            Some(c) if c.cmp0() != Ordering::Equal => c,
            _ => return Normalized::Zero,
        };
        let mut q = magnitude.exp().unwrap_or(0);
        let mut k = digit_count(&s);

        if k > self.digits {
            let shift = k - self.digits;
            s = round_div(&s, &pow10(shift), sign, rm);
            q += shift as isize;
            if s.cmp0() == Ordering::Equal {
                return Normalized::Zero;
            }
            k = digit_count(&s);
            if k > self.digits {
                // rounding rolled the coefficient over (e.g. 999... -> 1000...)
                s = Integer::from(&s / 10);
                q += 1;
                k -= 1;
            }
        }

        // pad toward e_max with trailing zeros so a too-large exponent with
        // a short coefficient (e.g. 5 * 10^96) is re-expressed with a
        // longer coefficient and a smaller, in-range exponent.
        if k < self.digits && q > self.e_max {
            let room = (self.digits - k) as isize;
            let want = (q - self.e_max).min(room) as u32;
            if want > 0 {
                s *= pow10(want);
                q -= want as isize;
                k += want;
            }
        }
        let _ = k;

        if q > self.e_max {
            return Normalized::Overflow;
        }

        if q < self.e_min {
            let shift = (self.e_min - q) as u32;
            s = round_div(&s, &pow10(shift), sign, rm);
            q = self.e_min;
            if s.cmp0() == Ordering::Equal {
                return Normalized::Zero;
            }
        }

        Normalized::Value(s, q)
    }

    fn assemble(&self, sign: bool, combination: Integer, trailing: Integer) -> Integer {
        let t_width = self.trailing_width();
        let mut bits = Integer::from(sign as u32) << (self.combination_width() + t_width);
        bits |= combination << t_width;
        bits |= trailing;
        bits
    }

    fn encode_with(&self, value: &Value, rm: RoundingMode, bid: bool) -> Integer {
        let cont_width = self.continuation_width();

        match value {
            Value::Infinity { sign } => {
                let combination = Integer::from(0b11110u32) << cont_width;
                self.assemble(*sign, combination, Integer::from(0))
            }
            Value::Nan { sign, signaling } => {
                let sbit: u32 = if *signaling { 1 } else { 0 };
                let combination =
                    (Integer::from(0b11111u32) << cont_width) | (Integer::from(sbit) << (cont_width - 1));
                self.assemble(*sign, combination, Integer::from(0))
            }
            Value::Finite { sign, magnitude } if magnitude.is_zero() => {
                self.assemble(*sign, Integer::from(0), Integer::from(0))
            }
            Value::Finite { sign, magnitude } => match self.normalize(magnitude, *sign, rm) {
                Normalized::Zero => self.assemble(*sign, Integer::from(0), Integer::from(0)),
                Normalized::Overflow => {
                    let combination = Integer::from(0b11110u32) << cont_width;
                    self.assemble(*sign, combination, Integer::from(0))
                }
                Normalized::Value(s, q) => {
                    // `s` has at most `digits` digits but may have fewer; split it
                    // against the field's fixed width rather than its own digit
                    // count, so a short coefficient's leading field digit is 0
                    // (not its own first significant digit).
                    let scale = pow10(self.digits - 1);
                    let d = Integer::from(&s / &scale).to_u32().expect("leading digit fits in u32");
                    let l = Integer::from(&s % &scale);

                    let q_biased = (q + self.bias) as u32;
                    let qhi = q_biased >> cont_width;
                    let qlo = q_biased & ((1u32 << cont_width) - 1);
                    // high form: a,b fixed to 1; c,d carry the exponent's top two
                    // bits (never 11, since a valid Q's qhi is at most 2); e is
                    // the digit's payload bit. Keeping qhi out of the low bit
                    // avoids ever producing the reserved "cd=11" special prefix.
                    let top5: u32 = if d > 7 {
                        0b11000 | (qhi << 1) | (d - 8)
                    } else {
                        (qhi << 3) | d
                    };
                    let combination = (Integer::from(top5) << cont_width) | Integer::from(qlo);

                    let trailing = if bid { l } else { self.encode_declets(&l) };
                    let trailing = if trailing.significant_bits() > self.trailing_width() {
                        Integer::from(0)
                    } else {
                        trailing
                    };
                    self.assemble(*sign, combination, trailing)
                }
            },
        }
    }

    fn decode_with(&self, bits: &Integer, bid: bool) -> Value {
        let c_width = self.combination_width();
        let t_width = self.trailing_width();
        let cont_width = self.continuation_width();

        let sign = bits.get_bit(c_width + t_width);
        let combination = Integer::from(bits >> t_width) & bitmask(c_width as usize);
        let trailing = Integer::from(bits & bitmask(t_width as usize));

        let top5 = (Integer::from(&combination >> cont_width))
            .to_u32()
            .expect("5-bit field fits in u32");

        if top5 == 0b11110 {
            return Value::infinity(sign);
        }
        if top5 == 0b11111 {
            let cont = Integer::from(&combination & bitmask(cont_width as usize));
            let signaling = cont.get_bit(cont_width - 1);
            return Value::Nan { sign, signaling };
        }

        let qhi_disc = top5 >> 3;
        let (d, qhi) = if qhi_disc == 0b11 {
            (8 + (top5 & 1), (top5 >> 1) & 0b11)
        } else {
            (top5 & 0b111, qhi_disc)
        };
        let qlo = Integer::from(&combination & bitmask(cont_width as usize));
        let q_biased = (Integer::from(qhi) << cont_width) | qlo;
        let q = q_biased.to_i64().expect("exponent field fits in i64") as isize - self.bias;

        let l = if bid { trailing } else { self.decode_declets(&trailing) };
        let s = Integer::from(d) * pow10(self.digits - 1) + l;

        let magnitude = Decimal::new(false, q, s).expect("non-negative by construction");
        Value::finite_unchecked(sign, magnitude)
    }

    /// Packs `l`'s digits (zero-padded on the left to `digits - 1` digits)
    /// into declets, most-significant declet first.
    fn encode_declets(&self, l: &Integer) -> Integer {
        let total = (self.digits - 1) as usize;
        let mut s = l.to_string();
        while s.len() < total {
            s.insert(0, '0');
        }
        let digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();

        let mut bits = Integer::from(0);
        for chunk in digits.chunks(3) {
            let packed = encode_declet(chunk[0], chunk[1], chunk[2]);
            bits = (bits << 10) | Integer::from(packed);
        }
        bits
    }

    /// Unpacks a trailing-significand field of declets back into its
    /// `digits - 1`-digit integer value.
    fn decode_declets(&self, trailing: &Integer) -> Integer {
        let n_declets = self.trailing_width() / 10;
        let mut acc = Integer::from(0);
        for i in 0..n_declets {
            let shift = (n_declets - 1 - i) * 10;
            let chunk = (Integer::from(trailing >> shift) & Integer::from(0x3ffu32))
                .to_u16()
                .expect("declet fits in 10 bits");
            let (hi, mid, lo) = decode_declet(chunk);
            acc = acc * Integer::from(1000) + Integer::from(hi as u32 * 100 + mid as u32 * 10 + lo as u32);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::decimal_codec::params::DecimalParams;

    fn decimal32() -> DecimalCodec {
        DecimalCodec::new(DecimalParams::new(11, 20).unwrap()).unwrap()
    }

    #[test]
    fn infinity_round_trips_bid_and_dpd() {
        let codec = decimal32();
        for sign in [false, true] {
            let bits = codec.encode_bid(&Value::infinity(sign), RoundingMode::NearestTiesToEven);
            assert!(matches!(codec.decode_bid(&bits), Value::Infinity { sign: s } if s == sign));
            let bits = codec.encode_dpd(&Value::infinity(sign), RoundingMode::NearestTiesToEven);
            assert!(matches!(codec.decode_dpd(&bits), Value::Infinity { sign: s } if s == sign));
        }
    }

    #[test]
    fn nan_signaling_bit_round_trips() {
        let codec = decimal32();
        for signaling in [false, true] {
            let v = if signaling { Value::snan(false) } else { Value::nan(false) };
            let bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
            match codec.decode_bid(&bits) {
                Value::Nan { signaling: s, .. } => assert_eq!(s, signaling),
                other => panic!("expected NaN, got {:?}", other),
            }
        }
    }

    #[test]
    fn zero_round_trips() {
        let codec = decimal32();
        for sign in [false, true] {
            let bits = codec.encode_bid(&Value::zero(sign), RoundingMode::NearestTiesToEven);
            assert!(codec.decode_bid(&bits).is_zero());
            assert_eq!(codec.decode_bid(&bits).sign(), sign);
        }
    }

    #[test]
    fn small_integer_round_trips_both_encodings() {
        let codec = decimal32();
        let magnitude = Decimal::from_str("12345.67").unwrap();
        let v = Value::finite(false, magnitude.clone()).unwrap();

        let bid_bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
        let bid_back = codec.decode_bid(&bid_bits).magnitude().unwrap().clone();
        assert_eq!(bid_back, magnitude);

        let dpd_bits = codec.encode_dpd(&v, RoundingMode::NearestTiesToEven);
        let dpd_back = codec.decode_dpd(&dpd_bits).magnitude().unwrap().clone();
        assert_eq!(dpd_back, magnitude);
    }

    #[test]
    fn short_coefficient_round_trips_without_shifting_value() {
        // a 1-digit coefficient at exponent 0 must decode back to 5, not
        // 5 * 10^(digits - 1) (regression test for a fixed-width combination
        // field split that assumed the coefficient always used all digits).
        let codec = decimal32();
        let magnitude = Decimal::new(false, 0, Integer::from(5)).unwrap();
        let v = Value::finite(false, magnitude.clone()).unwrap();

        let bid_bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
        let bid_back = codec.decode_bid(&bid_bits).magnitude().unwrap().clone();
        assert_eq!(bid_back, magnitude);

        let dpd_bits = codec.encode_dpd(&v, RoundingMode::NearestTiesToEven);
        let dpd_back = codec.decode_dpd(&dpd_bits).magnitude().unwrap().clone();
        assert_eq!(dpd_back, magnitude);
    }

    #[test]
    fn large_exponent_small_coefficient_does_not_overflow() {
        // 5 * 10^96 is well within decimal32's max (9.999999E96); the
        // coefficient must be padded so the biased exponent stays in range.
        let codec = decimal32();
        let magnitude = Decimal::new(false, 96, Integer::from(5)).unwrap();
        let v = Value::finite(false, magnitude.clone()).unwrap();
        let bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
        assert!(!codec.is_infinity(&bits));
        let back = codec.decode_bid(&bits).magnitude().unwrap().clone();
        assert_eq!(back, magnitude);
    }

    #[test]
    fn high_form_leading_digit_with_max_qhi_does_not_collide_with_specials() {
        // d=9 (high form) together with the largest valid qhi (2) would
        // collide with the reserved infinity/NaN combination-field prefix
        // under a wrong bit ordering; this exercises exactly that corner.
        let codec = decimal32();
        let magnitude = Decimal::new(false, 79, Integer::from(9_123_456)).unwrap();
        let v = Value::finite(false, magnitude.clone()).unwrap();

        let bid_bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
        assert!(!codec.is_infinity(&bid_bits));
        assert!(!codec.is_nan(&bid_bits));
        assert_eq!(codec.decode_bid(&bid_bits).magnitude().unwrap().clone(), magnitude);

        let dpd_bits = codec.encode_dpd(&v, RoundingMode::NearestTiesToEven);
        assert!(!codec.is_infinity(&dpd_bits));
        assert!(!codec.is_nan(&dpd_bits));
        assert_eq!(codec.decode_dpd(&dpd_bits).magnitude().unwrap().clone(), magnitude);
    }

    #[test]
    fn overflow_encodes_infinity() {
        let codec = decimal32();
        let magnitude = Decimal::new(false, 200, Integer::from(1)).unwrap();
        let v = Value::finite(false, magnitude).unwrap();
        let bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
        assert!(codec.is_infinity(&bits));
    }

    #[test]
    fn underflow_below_min_subnormal_encodes_zero() {
        let codec = decimal32();
        let magnitude = Decimal::new(false, -150, Integer::from(1)).unwrap();
        let v = Value::finite(false, magnitude).unwrap();
        let bits = codec.encode_bid(&v, RoundingMode::NearestTiesToEven);
        assert!(codec.decode_bid(&bits).is_zero());
    }
}
