use std::cmp::Ordering;

use rug::Integer;

use crate::decimal::Decimal;
use crate::error::ConversionError;
use crate::number::Number;
use crate::round::{round_binary, RoundingMode};
use crate::util::{bitmask, pow2, pow5};
use crate::value::Value;

use super::params::BinaryParams;

/// Converts a binary significand `c * 2^shift` to an exact [`Decimal`].
/// Binary fractions always terminate in base ten, so this is exact.
fn binary_to_decimal(c: &Integer, shift: isize) -> Decimal {
    if shift >= 0 {
        Decimal::from_integer(Integer::from(c << shift as u32))
    } else {
        let unscaled = Integer::from(c * pow5((-shift) as u32));
        Decimal::new(false, shift, unscaled).expect("unscaled is non-negative by construction")
    }
}

/// A codec for one IEEE-754 binary interchange format, parameterized by
/// exponent width, significand width, and the implicit-leading-bit flag.
#[derive(Debug, Clone)]
pub struct BinaryCodec {
    params: BinaryParams,
    bias: isize,
    e_min: isize,
    e_max: isize,
    max_value: Decimal,
    min_normal: Decimal,
    min_subnormal: Decimal,
    epsilon: Decimal,
}

impl BinaryCodec {
    /// Constructs a codec for the given format parameters.
    pub fn new(params: BinaryParams) -> Result<Self, ConversionError> {
        let bias = params.bias();
        let e_min = 1 - bias;
        let e_max = bias;
        let p_total = params.precision() as isize;

        // derived directly from the bit layout, bypassing the overflow
        // check that would otherwise need `max_value` to already exist
        let max_c = Integer::from(pow2(p_total as u32)) - Integer::from(1);
        let max_value = binary_to_decimal(&max_c, e_max - (p_total - 1));

        let min_normal = binary_to_decimal(&Integer::from(1), e_min);
        let min_subnormal = binary_to_decimal(&Integer::from(1), e_min - (p_total - 1));
        let epsilon = binary_to_decimal(&Integer::from(1), -(p_total - 1));

        Ok(BinaryCodec {
            params,
            bias,
            e_min,
            e_max,
            max_value,
            min_normal,
            min_subnormal,
            epsilon,
        })
    }

    pub fn params(&self) -> BinaryParams {
        self.params
    }

    pub fn width(&self) -> u32 {
        self.params.width()
    }

    fn precision(&self) -> isize {
        self.params.precision() as isize
    }

    /// The unbiased exponent range `(e_min, e_max)` of normal values.
    pub fn exponent_range(&self) -> (isize, isize) {
        (self.e_min, self.e_max)
    }

    /// Approximate count of equivalent decimal digits of precision.
    pub fn equivalent_decimal_digits(&self) -> u32 {
        ((self.precision() as f64 - 1.0) * std::f64::consts::LOG10_2).floor() as u32
    }

    /// Approximate unbiased exponent range, converted to base 10.
    pub fn decimal_exponent_range(&self) -> (isize, isize) {
        let scale = std::f64::consts::LOG10_2;
        (
            (self.e_min as f64 * scale).floor() as isize,
            (self.e_max as f64 * scale).floor() as isize,
        )
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

    fn all_ones_exp(&self) -> Integer {
        bitmask(self.params.es as usize)
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

    /// Alias for [`Self::quiet_nan`].
    pub fn nan(&self, sign: bool) -> Integer {
        self.quiet_nan(sign)
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

    /// Encodes using the process-wide default rounding mode.
    pub fn encode_with_default_rounding(&self, value: &Value) -> Integer {
        self.encode(value, crate::round::default_rounding_mode())
    }

    /// Encodes a value into its `width()`-bit interchange pattern.
    pub fn encode(&self, value: &Value, rm: RoundingMode) -> Integer {
        let p_total = self.precision();
        let sig_width = if self.params.implicit { p_total - 1 } else { p_total };

        // for non-implicit formats (binary80), the explicit leading bit
        // of the significand field is set for both infinities and NaNs,
        // matching the x87 extended-precision convention
        let explicit_bit = if self.params.implicit {
            Integer::from(0)
        } else {
            Integer::from(1) << (p_total - 1) as u32
        };

        let (sign, exp_field, sig_field): (bool, Integer, Integer) = match value {
            Value::Infinity { sign } => (*sign, self.all_ones_exp(), explicit_bit.clone()),
            Value::Nan { sign, signaling } => {
                let quiet_bit = if *signaling {
                    Integer::from(0)
                } else {
                    Integer::from(1) << (p_total - 2) as u32
                };
                let payload = explicit_bit.clone() | quiet_bit | Integer::from(1);
                (*sign, self.all_ones_exp(), payload)
            }
            Value::Finite { sign, magnitude } if magnitude.is_zero() => {
                (*sign, Integer::from(0), Integer::from(0))
            }
            Value::Finite { sign, magnitude } => {
                let (num, den) = magnitude.abs_ratio();
                let e = Self::floor_log2(&num, &den);

                let mut effective_e = e.max(self.e_min);
                let shift = effective_e - (p_total - 1);
                let mut c = Self::scaled_round(&num, &den, shift, rm, *sign);

                if c.significant_bits() as isize > p_total {
                    c >>= 1u32;
                    effective_e += 1;
                }

                if effective_e > self.e_max {
                    (*sign, self.all_ones_exp(), Integer::from(0))
                } else {
                    let is_normal = c.significant_bits() as isize >= p_total;
                    let exp_field = if is_normal {
                        Integer::from(effective_e + self.bias)
                    } else {
                        Integer::from(0)
                    };
                    let sig_field = if self.params.implicit {
                        c & bitmask(sig_width as usize)
                    } else {
                        c
                    };
                    (*sign, exp_field, sig_field)
                }
            }
        };

        let mut bits = Integer::from(0);
        if sign {
            bits.set_bit(self.width() - 1, true);
        }
        bits |= Integer::from(exp_field) << sig_width as u32;
        bits |= sig_field;
        bits
    }

    /// Computes `floor(log2(num/den))` for positive `num`, `den`.
    fn floor_log2(num: &Integer, den: &Integer) -> isize {
        let mut e = num.significant_bits() as isize - den.significant_bits() as isize;
        loop {
            if Self::compare_scaled(num, den, e + 1) != Ordering::Less {
                e += 1;
            } else {
                break;
            }
        }
        loop {
            if Self::compare_scaled(num, den, e) == Ordering::Less {
                e -= 1;
            } else {
                break;
            }
        }
        e
    }

    /// Compares `num/den` against `2^e`.
    fn compare_scaled(num: &Integer, den: &Integer, e: isize) -> Ordering {
        if e >= 0 {
            num.cmp(&(Integer::from(den * pow2(e as u32))))
        } else {
            Integer::from(num << (-e) as u32).cmp(den)
        }
    }

    /// Computes `round(num/den / 2^shift)` using `rm`, returning the
    /// integer significand. `shift` may be negative (more fractional
    /// bits are produced than `num/den` has integer bits).
    fn scaled_round(num: &Integer, den: &Integer, shift: isize, rm: RoundingMode, sign: bool) -> Integer {
        let (c, rem, rem_den) = if shift >= 0 {
            let scaled_den = Integer::from(den * pow2(shift as u32));
            let c = Integer::from(num / &scaled_den);
            let rem = Integer::from(num - Integer::from(&c * &scaled_den));
            (c, rem, scaled_den)
        } else {
            let scaled_num = Integer::from(num << (-shift) as u32);
            let c = Integer::from(&scaled_num / den);
            let rem = Integer::from(&scaled_num - Integer::from(&c * den));
            (c, rem, den.clone())
        };

        if rem.cmp0() == Ordering::Equal {
            return c;
        }

        let guard = c.get_bit(0);
        let twice_rem = Integer::from(&rem * 2);
        let round = twice_rem.cmp(&rem_den) != Ordering::Less;
        let sticky = if round {
            twice_rem.cmp(&rem_den) != Ordering::Equal
        } else {
            rem.cmp0() != Ordering::Equal
        };

        if round_binary(rm, sign, guard, round, sticky) {
            c + Integer::from(1)
        } else {
            c
        }
    }

    /// Decodes a `width()`-bit interchange pattern into a value.
    pub fn decode(&self, bits: &Integer) -> Value {
        let p_total = self.precision();
        let sig_width = if self.params.implicit { p_total - 1 } else { p_total };

        let sign = bits.get_bit(self.width() - 1);
        let exp_field = Integer::from(bits >> sig_width as u32) & self.all_ones_exp();
        let sig_field = Integer::from(bits & bitmask(sig_width as usize));

        if exp_field == self.all_ones_exp() {
            let payload = if self.params.implicit {
                sig_field.clone()
            } else {
                sig_field.clone() & bitmask((p_total - 1) as usize)
            };
            if payload.cmp0() == Ordering::Equal {
                return Value::infinity(sign);
            }
            let quiet = payload.get_bit((p_total - 2) as u32);
            return Value::Nan { sign, signaling: !quiet };
        }

        if exp_field.cmp0() == Ordering::Equal {
            if sig_field.cmp0() == Ordering::Equal {
                return Value::zero(sign);
            }
            let shift = self.e_min - (p_total - 1);
            let magnitude = binary_to_decimal(&sig_field, shift);
            return Value::finite_unchecked(sign, magnitude);
        }

        let effective_e = exp_field.to_i64().expect("exponent field fits in i64") as isize - self.bias;
        let c = if self.params.implicit {
            sig_field | (Integer::from(1) << (p_total - 1) as u32)
        } else {
            sig_field
        };
        let shift = effective_e - (p_total - 1);
        let magnitude = binary_to_decimal(&c, shift);
        Value::finite_unchecked(sign, magnitude)
    }
}
