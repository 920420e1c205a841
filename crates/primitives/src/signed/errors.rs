use core::fmt;

/// The error type that is returned when parsing a signed integer fails.
#[derive(Clone, Copy, Debug)]
pub enum ParseSignedError {
    /// Error that occurred while parsing the digits.
    Ruint(ruint::ParseError),

    /// The value does not fit in the target bit width.
    IntegerOverflow,
}

impl From<ruint::ParseError> for ParseSignedError {
    fn from(err: ruint::ParseError) -> Self {
        Self::Ruint(err)
    }
}

impl fmt::Display for ParseSignedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ruint(err) => write!(f, "parsing error: {err}"),
            Self::IntegerOverflow => f.write_str("number does not fit in the target bit width"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseSignedError {}

/// The error type that is returned when a conversion to or from a signed
/// integer would be out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigIntConversionError;

impl fmt::Display for BigIntConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("out-of-range integer conversion attempted")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BigIntConversionError {}
