/*!
`mpmfnum` is a bit-exact codec library between arbitrary-precision decimal
numbers and IEEE-754-2008 floating-point interchange formats. Unlike a
library built around one concrete type like `f32`/`f64`, every format
here is a parameterized codec: [`binary::BinaryCodec`] takes the
exponent width, significand width, and implicit-leading-bit flag that
define a binary interchange format, and [`decimal_codec::DecimalCodec`]
takes the combination-field and trailing-significand widths that define
a decimal one. [`formats`] supplies presets for the standard widths
(binary16 through binary256, decimal32/64/128), but any IEEE-754-2008-
shaped format is just another call to `BinaryCodec::new`/`DecimalCodec::new`.

The library defines a universal trait for all number types [`Number`],
a shared arbitrary-precision decimal primitive [`Decimal`][crate::decimal::Decimal],
and the abstract value both codecs encode from and decode to,
[`Value`][crate::value::Value].
*/

pub mod binary;
pub mod decimal;
pub mod decimal_codec;
pub mod error;
pub mod formats;
pub mod number;
pub mod round;
pub mod value;

mod util;

pub use crate::error::ConversionError;
pub use crate::number::Number;
pub use crate::round::RoundingMode;
pub use crate::value::Value;
