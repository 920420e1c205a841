use crate::{parser, Error, Result};
use alloc::{borrow::Cow, boxed::Box, format, string::String, vec::Vec};
use core::{fmt, str::FromStr};

/// A dynamic Solidity type.
///
/// This represents Solidity types that are not known at compile time; it is
/// the foundation the codec (`coder`) and the function/event/error
/// descriptors are built on.
///
/// `Struct` is a named tuple: it behaves exactly like `Tuple` for ABI
/// signature rendering (names are erased) but keeps its field names for
/// EIP-712 type-string rendering. Two `Struct`s are equal iff their name and
/// field types match in order; field names do not affect equality, matching
/// how a struct's ABI shape is determined purely by its tuple erasure.
#[derive(Debug, Clone)]
pub enum DynSolType {
    /// `address`
    Address,
    /// `bool`
    Bool,
    /// `int<n>`, n in 8..=256, multiple of 8.
    Int(usize),
    /// `uint<n>`, n in 8..=256, multiple of 8.
    Uint(usize),
    /// `bytes<n>`, n in 1..=32.
    FixedBytes(usize),
    /// `bytes`
    Bytes,
    /// `string`
    String,
    /// `T[]`
    Array(Box<DynSolType>),
    /// `T[k]`
    FixedArray(Box<DynSolType>, usize),
    /// `(T0,T1,...)`
    Tuple(Vec<DynSolType>),
    /// A named struct: a tuple with a name and per-field names.
    Struct {
        /// Struct name.
        name: String,
        /// Field names, in declaration order.
        prop_names: Vec<String>,
        /// Field types, in declaration order.
        tuple: Vec<DynSolType>,
    },
}

// Hand-written rather than derived: `Struct`'s `prop_names` are provenance
// metadata, not part of its ABI shape, and must not affect equality (see the
// doc comment above).
impl PartialEq for DynSolType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Address, Self::Address)
            | (Self::Bool, Self::Bool)
            | (Self::Bytes, Self::Bytes)
            | (Self::String, Self::String) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::FixedBytes(a), Self::FixedBytes(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::FixedArray(a, la), Self::FixedArray(b, lb)) => la == lb && a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Struct { name: na, tuple: ta, .. }, Self::Struct { name: nb, tuple: tb, .. }) => {
                na == nb && ta == tb
            }
            _ => false,
        }
    }
}

impl Eq for DynSolType {}

impl fmt::Display for DynSolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sol_type_name())
    }
}

impl FromStr for DynSolType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl DynSolType {
    /// Parses a Solidity type name string, e.g. `"(bool,address)[]"`.
    pub fn parse(s: &str) -> Result<Self> {
        parser::parse(s)
    }

    /// Returns `true` if this type's encoded length depends on its value.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Address | Self::Bool | Self::Int(_) | Self::Uint(_) | Self::FixedBytes(_) => {
                false
            }
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(t, _) => t.is_dynamic(),
            Self::Tuple(tys) => tys.iter().any(Self::is_dynamic),
            Self::Struct { tuple, .. } => tuple.iter().any(Self::is_dynamic),
        }
    }

    /// Returns the width, in bytes, that a value of this type occupies in
    /// the head region of its enclosing group: 32 for every dynamic type
    /// and every elementary type, or the sum of the components' head
    /// widths for a static composite.
    pub fn head_word_width(&self) -> usize {
        if self.is_dynamic() {
            return 32
        }
        match self {
            Self::FixedArray(t, len) => t.head_word_width() * len,
            Self::Tuple(tys) => tys.iter().map(Self::head_word_width).sum(),
            Self::Struct { tuple, .. } => tuple.iter().map(Self::head_word_width).sum(),
            _ => 32,
        }
    }

    /// Erases struct names, rendering `self` the way it appears inside a
    /// function/event signature.
    pub fn sol_type_name(&self) -> Cow<'_, str> {
        match self {
            Self::Address => Cow::Borrowed("address"),
            Self::Bool => Cow::Borrowed("bool"),
            Self::Bytes => Cow::Borrowed("bytes"),
            Self::String => Cow::Borrowed("string"),
            Self::Int(size) => Cow::Owned(format!("int{size}")),
            Self::Uint(size) => Cow::Owned(format!("uint{size}")),
            Self::FixedBytes(size) => Cow::Owned(format!("bytes{size}")),
            Self::Array(t) => Cow::Owned(format!("{}[]", t.sol_type_name())),
            Self::FixedArray(t, len) => Cow::Owned(format!("{}[{len}]", t.sol_type_name())),
            Self::Tuple(tys) => Cow::Owned(render_tuple(tys)),
            Self::Struct { tuple, .. } => Cow::Owned(render_tuple(tuple)),
        }
    }

    /// Fallible cast to the contents of a `Tuple`.
    pub fn as_tuple(&self) -> Option<&[Self]> {
        match self {
            Self::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// Fallible cast to the contents of a `Struct`.
    pub fn as_struct(&self) -> Option<(&str, &[String], &[Self])> {
        match self {
            Self::Struct { name, prop_names, tuple } => Some((name, prop_names, tuple)),
            _ => None,
        }
    }

    /// Returns `true` if `self`, or any type it contains, is a `Struct`.
    pub fn has_struct(&self) -> bool {
        match self {
            Self::Struct { .. } => true,
            Self::Array(t) | Self::FixedArray(t, _) => t.has_struct(),
            Self::Tuple(tys) => tys.iter().any(Self::has_struct),
            _ => false,
        }
    }
}

fn render_tuple(tys: &[DynSolType]) -> String {
    let mut out = String::from("(");
    for (i, t) in tys.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&t.sol_type_name());
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_parse_and_render() {
        for s in ["address", "uint256", "int8", "bytes32", "bool", "string", "bytes"] {
            assert_eq!(DynSolType::parse(s).unwrap().sol_type_name(), s);
        }
        assert_eq!(DynSolType::parse("address[]").unwrap().sol_type_name(), "address[]");
        assert_eq!(DynSolType::parse("address[2][]").unwrap().sol_type_name(), "address[2][]");
        assert_eq!(
            DynSolType::parse("(bool,address)[]").unwrap().sol_type_name(),
            "(bool,address)[]"
        );
    }

    #[test]
    fn dynamic_ness() {
        assert!(!DynSolType::Address.is_dynamic());
        assert!(DynSolType::Bytes.is_dynamic());
        assert!(DynSolType::Array(Box::new(DynSolType::Address)).is_dynamic());
        assert!(!DynSolType::FixedArray(Box::new(DynSolType::Address), 2).is_dynamic());
        assert!(DynSolType::FixedArray(Box::new(DynSolType::Bytes), 2).is_dynamic());
        assert!(!DynSolType::Tuple(vec![DynSolType::Bool, DynSolType::Address]).is_dynamic());
        assert!(DynSolType::Tuple(vec![DynSolType::Bool, DynSolType::String]).is_dynamic());
    }

    #[test]
    fn head_width_of_static_composites() {
        let t = DynSolType::Tuple(vec![DynSolType::Uint(256), DynSolType::Address]);
        assert_eq!(t.head_word_width(), 64);
        let arr = DynSolType::FixedArray(Box::new(DynSolType::Uint(256)), 3);
        assert_eq!(arr.head_word_width(), 96);
        assert_eq!(DynSolType::Bytes.head_word_width(), 32);
    }

    #[test]
    fn struct_erases_to_tuple_in_signature() {
        let s = DynSolType::Struct {
            name: "Person".into(),
            prop_names: vec!["wallet".into(), "name".into()],
            tuple: vec![DynSolType::Address, DynSolType::String],
        };
        assert_eq!(s.sol_type_name(), "(address,string)");
    }

    #[test]
    fn struct_equality_ignores_field_names() {
        let a = DynSolType::Struct {
            name: "Person".into(),
            prop_names: vec!["wallet".into(), "name".into()],
            tuple: vec![DynSolType::Address, DynSolType::String],
        };
        let b = DynSolType::Struct {
            name: "Person".into(),
            prop_names: vec!["owner".into(), "label".into()],
            tuple: vec![DynSolType::Address, DynSolType::String],
        };
        assert_eq!(a, b);

        let different_name = DynSolType::Struct {
            name: "Other".into(),
            prop_names: vec!["wallet".into(), "name".into()],
            tuple: vec![DynSolType::Address, DynSolType::String],
        };
        assert_ne!(a, different_name);
    }
}
