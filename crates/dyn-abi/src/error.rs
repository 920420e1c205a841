use alloc::string::String;
use core::fmt;

/// Dynamic ABI result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced by the type parser, the codec, and the function/event/
/// error descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type string does not match the Solidity type grammar.
    InvalidTypeString(String),
    /// `bytesN` or `(u)intN` carries a width outside the allowed range.
    InvalidSize(String),
    /// A `Struct` field graph references itself, directly or indirectly.
    CycleInStruct(String),
    /// A decoded integer does not fit the type's declared bit width.
    NumericOverflow,
    /// A value count does not match a `FixedArray`'s declared length.
    InvalidFixedArrayLength,
    /// A length prefix or offset in an encoded blob is out of bounds or
    /// misaligned, or a `bool` word was neither `0` nor `1` under strict
    /// decoding.
    InvalidEncoding,
    /// A `String` payload is not valid UTF-8.
    InvalidUtf8,
    /// A descriptor's selector does not match the leading bytes of a blob.
    SelectorMismatch,
    /// No descriptor in a candidate set matched a 4-byte selector.
    UnknownFunctionOrError,
    /// A hex string could not be decoded.
    InvalidHex,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTypeString(s) => write!(f, "invalid type string: {s}"),
            Self::InvalidSize(s) => write!(f, "invalid size for type: {s}"),
            Self::CycleInStruct(name) => write!(f, "cyclic struct reference: {name}"),
            Self::NumericOverflow => f.write_str("integer does not fit its declared bit width"),
            Self::InvalidFixedArrayLength => {
                f.write_str("value count does not match fixed array length")
            }
            Self::InvalidEncoding => f.write_str("malformed ABI encoding"),
            Self::InvalidUtf8 => f.write_str("string payload is not valid UTF-8"),
            Self::SelectorMismatch => f.write_str("selector does not match descriptor"),
            Self::UnknownFunctionOrError => {
                f.write_str("no descriptor matches the given selector")
            }
            Self::InvalidHex => f.write_str("invalid hex string"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<evmabi_primitives::InvalidHex> for Error {
    fn from(_: evmabi_primitives::InvalidHex) -> Self {
        Self::InvalidHex
    }
}
