//! Fixed-width two's-complement signed integer, used to represent Solidity
//! `int<M>` values. Only construction, byte round-tripping and ordering are
//! implemented; the codec never computes with these values.

/// Conversion implementations.
mod conversions;

/// Error types for signed integers.
mod errors;
pub use errors::{BigIntConversionError, ParseSignedError};

/// A simple [`Sign`] enum, for dealing with integer signs.
mod sign;
pub use sign::Sign;

/// Signed integer type wrapping a [`ruint::Uint`].
mod int;
pub use int::Signed;

/// Utility functions used in the signed integer implementation.
pub(crate) mod utils;
pub use utils::const_eq;
