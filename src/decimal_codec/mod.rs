/*!
Codec for IEEE-754-2008 decimal interchange formats (decimal32/64/128 and
any other `(c, t)` parameterization the standard's formulas support).

Unlike the binary formats, decimal interchange formats come in two
significand encodings that share the same sign/combination-field layout
and differ only in how the trailing significand digits are packed:
Binary Integer Decimal (`BID`, the trailing digits as a plain base-2
integer) and Densely Packed Decimal (`DPD`, ten bits per three digits).
[`DecimalCodec`] supports both explicitly, plus a process-wide default
used by its generic `encode`/`decode`.
*/

mod codec;
mod declet;
mod params;

pub use codec::{default_encoding, set_default_encoding, DecimalCodec, SignificandEncoding};
pub use params::DecimalParams;
