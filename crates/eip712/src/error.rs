use alloc::string::String;
use core::fmt;

/// EIP-712 result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors produced while resolving an EIP-712 type graph or hashing typed
/// data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A property referenced a type name with no matching definition.
    MissingType(String),
    /// A type's dependency graph references itself, directly or indirectly.
    CircularDependency(String),
    /// A `"type name"`-form property definition could not be split into a
    /// type and a name.
    InvalidPropertyDefinition(String),
    /// A JSON value did not match the Solidity type it was coerced against.
    TypeMismatch {
        /// The expected Solidity type, rendered as a string.
        expected: String,
        /// The JSON value that failed to coerce, rendered as a string.
        value: String,
    },
    /// `hash_struct` was called on a value that is not a named struct.
    NotAStruct,
    /// An error from the underlying ABI type model or codec.
    Dyn(evmabi_dyn_abi::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingType(name) => write!(f, "missing type definition: {name}"),
            Self::CircularDependency(name) => write!(f, "circular type dependency at: {name}"),
            Self::InvalidPropertyDefinition(s) => write!(f, "invalid property definition: {s}"),
            Self::TypeMismatch { expected, value } => {
                write!(f, "expected {expected}, found JSON value {value}")
            }
            Self::NotAStruct => f.write_str("value is not a named struct"),
            Self::Dyn(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<evmabi_dyn_abi::Error> for Error {
    fn from(e: evmabi_dyn_abi::Error) -> Self {
        Self::Dyn(e)
    }
}
