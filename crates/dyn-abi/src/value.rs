use crate::DynSolType;
use alloc::{string::String, vec::Vec};
use evmabi_primitives::{Address, B256, I256, U256};

/// A Solidity value decoded into Rust, or about to be ABI-encoded.
///
/// Broadly similar to `serde_json::Value`: an enum of possible shapes that
/// the caller inspects and disambiguates. `Int`/`Uint` are always stored at
/// full 256-bit width regardless of the declared bit width, which is kept
/// alongside for range-checking and signature rendering — this mirrors how
/// the codec treats every integer as a 256-bit ABI word.
///
/// Two `Struct` values are equal iff their name and field values match in
/// order; field names do not affect equality, matching [`DynSolType`]'s own
/// equality rule.
#[derive(Debug, Clone)]
pub enum DynSolValue {
    /// An address.
    Address(Address),
    /// A boolean.
    Bool(bool),
    /// A signed integer and its declared bit width.
    Int(I256, usize),
    /// An unsigned integer and its declared bit width.
    Uint(U256, usize),
    /// A fixed-length byte string and its declared length.
    FixedBytes(B256, usize),
    /// A dynamic-length byte string.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    String(String),
    /// A dynamically-sized array of values of the same type.
    Array(Vec<DynSolValue>),
    /// A fixed-size array of values of the same type.
    FixedArray(Vec<DynSolValue>),
    /// A heterogeneous tuple of values.
    Tuple(Vec<DynSolValue>),
    /// A named struct, treated as a tuple for ABI purposes.
    Struct {
        /// Struct name.
        name: String,
        /// Field names, in declaration order.
        prop_names: Vec<String>,
        /// Field values, in declaration order.
        tuple: Vec<DynSolValue>,
    },
}

impl PartialEq for DynSolValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Address(a), Self::Address(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a, sa), Self::Int(b, sb)) => a == b && sa == sb,
            (Self::Uint(a, sa), Self::Uint(b, sb)) => a == b && sa == sb,
            (Self::FixedBytes(a, sa), Self::FixedBytes(b, sb)) => a == b && sa == sb,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::FixedArray(a), Self::FixedArray(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Struct { name: na, tuple: ta, .. }, Self::Struct { name: nb, tuple: tb, .. }) => {
                na == nb && ta == tb
            }
            _ => false,
        }
    }
}

impl Eq for DynSolValue {}

impl DynSolValue {
    /// Returns the type of this value, if it can be determined. A type
    /// cannot be determined for an empty dynamic-length array, since its
    /// element type is not recoverable from the empty value alone.
    pub fn as_type(&self) -> Option<DynSolType> {
        Some(match self {
            Self::Address(_) => DynSolType::Address,
            Self::Bool(_) => DynSolType::Bool,
            Self::Int(_, size) => DynSolType::Int(*size),
            Self::Uint(_, size) => DynSolType::Uint(*size),
            Self::FixedBytes(_, size) => DynSolType::FixedBytes(*size),
            Self::Bytes(_) => DynSolType::Bytes,
            Self::String(_) => DynSolType::String,
            Self::Array(v) => DynSolType::Array(alloc::boxed::Box::new(v.first()?.as_type()?)),
            Self::FixedArray(v) => {
                let ty = v.first().map(Self::as_type).unwrap_or(Some(DynSolType::Tuple(vec![])))?;
                DynSolType::FixedArray(alloc::boxed::Box::new(ty), v.len())
            }
            Self::Tuple(v) => {
                DynSolType::Tuple(v.iter().map(Self::as_type).collect::<Option<_>>()?)
            }
            Self::Struct { name, prop_names, tuple } => DynSolType::Struct {
                name: name.clone(),
                prop_names: prop_names.clone(),
                tuple: tuple.iter().map(Self::as_type).collect::<Option<_>>()?,
            },
        })
    }

    /// Returns `true` if this value's encoded length depends on its contents.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Address(_)
            | Self::Bool(_)
            | Self::Int(..)
            | Self::Uint(..)
            | Self::FixedBytes(..) => false,
            Self::Bytes(_) | Self::String(_) | Self::Array(_) => true,
            Self::FixedArray(v) => v.iter().any(Self::is_dynamic),
            Self::Tuple(v) => v.iter().any(Self::is_dynamic),
            Self::Struct { tuple, .. } => tuple.iter().any(Self::is_dynamic),
        }
    }

    /// Fallible cast to the contents of a `Tuple`.
    pub fn as_tuple(&self) -> Option<&[DynSolValue]> {
        match self {
            Self::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// Fallible cast to `Address`.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Encodes this value as if it were the sole element of a 1-tuple. This
    /// is the convention used for decoding a single return value or a single
    /// EIP-712 field.
    pub fn encode_single(&self) -> Vec<u8> {
        crate::coder::encode_params(core::slice::from_ref(self))
    }

    /// Encodes this value's static in-place representation. Panics if
    /// `self` is dynamic; callers must check [`Self::is_dynamic`] first.
    pub(crate) fn encode_head(&self, out: &mut Vec<u8>) {
        debug_assert!(!self.is_dynamic());
        match self {
            Self::Address(a) => {
                out.extend_from_slice(&[0u8; 12]);
                out.extend_from_slice(a.as_slice());
            }
            Self::Bool(b) => {
                out.extend_from_slice(&[0u8; 31]);
                out.push(*b as u8);
            }
            Self::Int(v, _) => out.extend_from_slice(&v.to_big_endian()),
            Self::Uint(v, _) => out.extend_from_slice(&v.to_be_bytes::<32>()),
            Self::FixedBytes(b, _) => out.extend_from_slice(b.as_slice()),
            Self::FixedArray(v) | Self::Tuple(v) => out.extend(crate::coder::encode_group(v)),
            Self::Struct { tuple, .. } => out.extend(crate::coder::encode_group(tuple)),
            Self::Bytes(_) | Self::String(_) | Self::Array(_) => unreachable!(),
        }
    }

    /// Encodes this value's dynamic tail representation. Panics if `self`
    /// is static.
    pub(crate) fn encode_tail(&self, out: &mut Vec<u8>) {
        debug_assert!(self.is_dynamic());
        match self {
            Self::Bytes(b) => encode_packed(b, out),
            Self::String(s) => encode_packed(s.as_bytes(), out),
            Self::Array(v) => {
                out.extend_from_slice(&word_from_usize(v.len()));
                out.extend(crate::coder::encode_group(v));
            }
            Self::FixedArray(v) | Self::Tuple(v) => out.extend(crate::coder::encode_group(v)),
            Self::Struct { tuple, .. } => out.extend(crate::coder::encode_group(tuple)),
            _ => unreachable!(),
        }
    }
}

pub(crate) fn word_from_usize(n: usize) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&(n as u64).to_be_bytes());
    out
}

fn encode_packed(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&word_from_usize(bytes.len()));
    out.extend_from_slice(bytes);
    let pad = (32 - bytes.len() % 32) % 32;
    out.extend(core::iter::repeat(0u8).take(pad));
}
