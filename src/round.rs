/*!
Rounding policy shared by the binary and decimal codecs.

Most floating-point encoders decompose into two steps: an exact
computation over real numbers, then a rounding step that decides how
digits beyond the target precision affect the result. This module
supplies that second step for both codecs in this crate.
*/

use std::sync::atomic::{AtomicU8, Ordering};

use crate::decimal::Decimal;

/// Rounding modes understood by both codecs.
///
/// The IEEE-754 standard specifies five rounding modes: two "nearest"
/// modes and three directed modes, all represented here. Rounding
/// behavior for zero, infinite, and non-numerical values is unaffected
/// by the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to the nearest representable value; on a tie, round to the
    /// value whose least significant digit is even.
    NearestTiesToEven,
    /// Round to the nearest representable value; on a tie, round to the
    /// value of greater magnitude.
    NearestTiesAwayZero,
    /// Round toward zero (truncate).
    TowardZero,
    /// Round toward positive infinity (ceiling).
    TowardPositive,
    /// Round toward negative infinity (floor).
    TowardNegative,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::NearestTiesToEven
    }
}

/// Given the sign of the value and the guard/round/sticky bits of a
/// truncated binary significand, returns whether the truncated
/// significand should be incremented by one ulp.
///
/// - `guard` is the least significant bit that was *kept*.
/// - `round` is the first bit that was *discarded*.
/// - `sticky` is the logical OR of every discarded bit below `round`.
pub fn round_binary(
    mode: RoundingMode,
    negative: bool,
    guard: bool,
    round: bool,
    sticky: bool,
) -> bool {
    match mode {
        RoundingMode::NearestTiesToEven => (guard && round) || (round && sticky),
        RoundingMode::NearestTiesAwayZero => round,
        RoundingMode::TowardZero => false,
        RoundingMode::TowardPositive => !negative && (round || sticky),
        RoundingMode::TowardNegative => negative && (round || sticky),
    }
}

/// Rounds an arbitrary-precision decimal to an integer-valued [`Decimal`]
/// (scale zero), per the active rounding mode.
pub fn round_decimal(mode: RoundingMode, value: &Decimal) -> Decimal {
    value.round_to_integer(mode)
}

static DEFAULT_ROUNDING_MODE: AtomicU8 = AtomicU8::new(0);

fn mode_to_u8(mode: RoundingMode) -> u8 {
    match mode {
        RoundingMode::NearestTiesToEven => 0,
        RoundingMode::NearestTiesAwayZero => 1,
        RoundingMode::TowardZero => 2,
        RoundingMode::TowardPositive => 3,
        RoundingMode::TowardNegative => 4,
    }
}

fn u8_to_mode(v: u8) -> RoundingMode {
    match v {
        0 => RoundingMode::NearestTiesToEven,
        1 => RoundingMode::NearestTiesAwayZero,
        2 => RoundingMode::TowardZero,
        3 => RoundingMode::TowardPositive,
        _ => RoundingMode::TowardNegative,
    }
}

/// Returns the process-wide default rounding mode.
///
/// Every codec entry point also accepts an explicit [`RoundingMode`],
/// which should be preferred where the mode is a meaningful part of the
/// call site; this global is convenience sugar. Reads/writes are atomic
/// with respect to each other, with no stronger ordering guaranteed.
pub fn default_rounding_mode() -> RoundingMode {
    u8_to_mode(DEFAULT_ROUNDING_MODE.load(Ordering::SeqCst))
}

/// Sets the process-wide default rounding mode.
pub fn set_default_rounding_mode(mode: RoundingMode) {
    DEFAULT_ROUNDING_MODE.store(mode_to_u8(mode), Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_binary_truth_table() {
        for negative in [false, true] {
            for guard in [false, true] {
                for round in [false, true] {
                    for sticky in [false, true] {
                        let ntte =
                            round_binary(RoundingMode::NearestTiesToEven, negative, guard, round, sticky);
                        assert_eq!(ntte, (guard && round) || (round && sticky));

                        let ntaz =
                            round_binary(RoundingMode::NearestTiesAwayZero, negative, guard, round, sticky);
                        assert_eq!(ntaz, round);

                        let tz = round_binary(RoundingMode::TowardZero, negative, guard, round, sticky);
                        assert!(!tz);

                        let tp =
                            round_binary(RoundingMode::TowardPositive, negative, guard, round, sticky);
                        assert_eq!(tp, !negative && (round || sticky));

                        let tn =
                            round_binary(RoundingMode::TowardNegative, negative, guard, round, sticky);
                        assert_eq!(tn, negative && (round || sticky));
                    }
                }
            }
        }
    }

    #[test]
    fn default_rounding_mode_roundtrips() {
        set_default_rounding_mode(RoundingMode::TowardZero);
        assert_eq!(default_rounding_mode(), RoundingMode::TowardZero);
        set_default_rounding_mode(RoundingMode::NearestTiesToEven);
        assert_eq!(default_rounding_mode(), RoundingMode::NearestTiesToEven);
    }
}
