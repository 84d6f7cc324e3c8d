/*!
Codec for IEEE-754-2008 binary interchange formats (binary16/32/64/80/128
and any other `(es, p, implicit)` parameterization the standard's
formulas support).
*/

mod codec;
mod params;

pub use codec::BinaryCodec;
pub use params::BinaryParams;
