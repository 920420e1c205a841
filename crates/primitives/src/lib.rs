//! Primitive types shared by the ABI codec and the EIP-712 pipeline:
//! fixed-width byte arrays, the `Address` and byte-string wrappers, the
//! bounded signed/unsigned integer representations the codec encodes, and
//! the `keccak256` hash primitive.
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

pub mod aliases;
#[doc(no_inline)]
pub use aliases::{
    ChainId, Selector, B128, B256, B512, B64, I128, I16, I256, I32, I64, I8, U128, U16, U256, U32,
    U512, U64, U8,
};

mod bits;
pub use bits::{Address, AddressError, FixedBytes};

mod bytes;
pub use self::bytes::Bytes;

mod signed;
pub use signed::{BigIntConversionError, ParseSignedError, Sign, Signed};

mod utils;
pub use utils::{
    decode_hex, decode_hex_lenient, encode_hex, encode_hex_prefixed, keccak256, InvalidHex,
};

#[doc(no_inline)]
pub use ruint::{self, uint, Uint};

#[doc(no_inline)]
pub use tiny_keccak::{self, Hasher, Keccak};

#[doc(hidden)]
pub use derive_more;
