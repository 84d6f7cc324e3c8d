// error.rs
//
// Error taxonomy for codec construction and value access.

use std::fmt;

/// Errors raised by codec construction and value accessors.
///
/// Encoding and decoding of well-formed inputs never fail: overflow maps
/// to signed infinity and underflow maps to signed zero, silently, per
/// the active rounding policy. These variants only cover misuse of the
/// constructors themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A codec was constructed with out-of-range format parameters.
    InvalidParameter { detail: String },
    /// A value was constructed with a sign that disagrees with its
    /// (always non-negative) magnitude representation.
    InvalidSign,
    /// A finite-only operation was applied to a special value, or vice versa.
    CategoryMismatch,
    /// The magnitude of a non-finite value was requested.
    NotFinite,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidParameter { detail } => {
                write!(f, "invalid codec parameter: {}", detail)
            }
            ConversionError::InvalidSign => {
                write!(f, "sign disagrees with magnitude")
            }
            ConversionError::CategoryMismatch => {
                write!(f, "value category does not support this operation")
            }
            ConversionError::NotFinite => {
                write!(f, "value is not finite")
            }
        }
    }
}

impl std::error::Error for ConversionError {}
