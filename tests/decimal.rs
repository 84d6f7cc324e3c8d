//! Round-trip properties of `DecimalCodec`, exercised across every
//! standard decimal format and both significand encodings.

use std::str::FromStr;

use rug::Integer;

use ieee754_codec::decimal_codec::DecimalCodec;
use ieee754_codec::round::RoundingMode;
use ieee754_codec::value::Value;
use ieee754_codec::{decimal::Decimal, formats};

const RM: RoundingMode = RoundingMode::NearestTiesToEven;

fn codecs() -> Vec<DecimalCodec> {
    vec![formats::decimal32(), formats::decimal64(), formats::decimal128()]
}

fn check_specials_round_trip(
    codec: &DecimalCodec,
    sign: bool,
    encode: impl Fn(&DecimalCodec, &Value, RoundingMode) -> Integer,
    decode: impl Fn(&DecimalCodec, &Integer) -> Value,
) {
    let zero = Value::zero(sign);
    let bits = encode(codec, &zero, RM);
    assert!(decode(codec, &bits).is_zero());
    assert_eq!(decode(codec, &bits).sign(), sign);

    let inf = Value::infinity(sign);
    let bits = encode(codec, &inf, RM);
    assert!(codec.is_infinity(&bits));
    assert_eq!(codec.is_pos_infinity(&bits), !sign);
    assert_eq!(codec.is_neg_infinity(&bits), sign);

    let nan = Value::nan(sign);
    let bits = encode(codec, &nan, RM);
    assert!(codec.is_quiet_nan(&bits));

    let snan = Value::snan(sign);
    let bits = encode(codec, &snan, RM);
    assert!(codec.is_signaling_nan(&bits));
}

#[test]
fn special_values_round_trip_bid_and_dpd() {
    for codec in codecs() {
        for sign in [false, true] {
            check_specials_round_trip(&codec, sign, DecimalCodec::encode_bid, DecimalCodec::decode_bid);
            check_specials_round_trip(&codec, sign, DecimalCodec::encode_dpd, DecimalCodec::decode_dpd);
        }
    }
}

#[test]
fn boundary_values_round_trip_exactly_bid_and_dpd() {
    for codec in codecs() {
        for magnitude in [
            codec.min_subnormal().clone(),
            codec.min_normal().clone(),
            codec.max_value().clone(),
        ] {
            let v = Value::finite(false, magnitude.clone()).unwrap();

            let bid_bits = codec.encode_bid(&v, RM);
            assert_eq!(codec.decode_bid(&bid_bits).magnitude().unwrap().clone(), magnitude);

            let dpd_bits = codec.encode_dpd(&v, RM);
            assert_eq!(codec.decode_dpd(&dpd_bits).magnitude().unwrap().clone(), magnitude);
        }
    }
}

#[test]
fn short_coefficients_round_trip_across_the_exponent_range() {
    // a coefficient far shorter than the format's digit budget, at a
    // spread of exponents across the representable range; regression
    // coverage for the fixed-width combination-field split.
    for codec in codecs() {
        let (e_min, e_max) = codec.exponent_range();
        let span = (e_max - e_min) / 20;
        for k in 0..20isize {
            let exp = e_min + k * span.max(1);
            let magnitude = Decimal::new(false, exp, Integer::from(1234567)).unwrap();
            let v = match codec.value(false, magnitude.clone()) {
                Ok(v) => v,
                Err(_) => continue,
            };

            let bid_bits = codec.encode_bid(&v, RM);
            if codec.is_infinity(&bid_bits) {
                continue;
            }
            assert_eq!(codec.decode_bid(&bid_bits).magnitude().unwrap().clone(), magnitude);

            let dpd_bits = codec.encode_dpd(&v, RM);
            assert_eq!(codec.decode_dpd(&dpd_bits).magnitude().unwrap().clone(), magnitude);
        }
    }
}

#[test]
fn random_bit_patterns_round_trip_bid_and_dpd() {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    for codec in codecs() {
        for _ in 0..100 {
            let coefficient: u32 = rng.gen_range(1..=999_999);
            let (e_min, e_max) = codec.exponent_range();
            let exp = rng.gen_range(e_min..=e_max);
            let magnitude = Decimal::new(false, exp, Integer::from(coefficient)).unwrap();
            let v = match codec.value(false, magnitude) {
                Ok(v) => v,
                Err(_) => continue,
            };

            let bid_bits = codec.encode_bid(&v, RM);
            let re_encoded = codec.encode_bid(&codec.decode_bid(&bid_bits), RM);
            assert_eq!(bid_bits, re_encoded);

            let dpd_bits = codec.encode_dpd(&v, RM);
            let re_encoded = codec.encode_dpd(&codec.decode_dpd(&dpd_bits), RM);
            assert_eq!(dpd_bits, re_encoded);
        }
    }
}

#[test]
fn decimal_midpoint_rounding_matches_every_mode() {
    let cases: &[(&str, RoundingMode, &str)] = &[
        ("50.25", RoundingMode::NearestTiesToEven, "50"),
        ("50.5", RoundingMode::NearestTiesToEven, "50"),
        ("50.75", RoundingMode::NearestTiesToEven, "51"),
        ("51.25", RoundingMode::NearestTiesToEven, "51"),
        ("51.5", RoundingMode::NearestTiesToEven, "52"),
        ("51.75", RoundingMode::NearestTiesToEven, "52"),
        ("50.5", RoundingMode::NearestTiesAwayZero, "51"),
        ("50.5", RoundingMode::TowardZero, "50"),
        ("50.5", RoundingMode::TowardPositive, "51"),
        ("50.5", RoundingMode::TowardNegative, "50"),
        ("-50.5", RoundingMode::NearestTiesToEven, "-50"),
        ("-50.5", RoundingMode::NearestTiesAwayZero, "-51"),
        ("-50.5", RoundingMode::TowardZero, "-50"),
        ("-50.5", RoundingMode::TowardPositive, "-50"),
        ("-50.5", RoundingMode::TowardNegative, "-51"),
    ];

    for (input, mode, expected) in cases {
        let value = Decimal::from_str(input).unwrap();
        let rounded = value.round_to_integer(*mode);
        let expected = Decimal::from_str(expected).unwrap();
        assert_eq!(rounded, expected, "{} under {:?}", input, mode);
    }
}
