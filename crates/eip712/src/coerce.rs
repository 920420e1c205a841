//! Coerces `serde_json::Value`s into [`DynSolValue`]s guided by a
//! [`DynSolType`], for turning a `TypedData` message object into an
//! EIP-712-hashable value tree.

use crate::{Error, Result};
use alloc::{string::ToString, vec::Vec};
use evmabi_dyn_abi::{DynSolType, DynSolValue};
use evmabi_primitives::{Address, Sign, I256, U256};
use serde_json::Value;

fn mismatch(ty: &DynSolType, value: &Value) -> Error {
    Error::TypeMismatch { expected: ty.to_string(), value: alloc::format!("{value:?}") }
}

/// Coerces `value` into a [`DynSolValue`] matching `ty`.
pub fn coerce(ty: &DynSolType, value: &Value) -> Result<DynSolValue> {
    match ty {
        DynSolType::Address => {
            let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;
            let bytes = evmabi_primitives::decode_hex(s).map_err(|_| mismatch(ty, value))?;
            let addr: [u8; 20] = bytes.try_into().map_err(|_| mismatch(ty, value))?;
            Ok(DynSolValue::Address(Address::from(addr)))
        }
        DynSolType::Bool => {
            if let Some(b) = value.as_bool() {
                return Ok(DynSolValue::Bool(b))
            }
            match value.as_str() {
                Some("true") => Ok(DynSolValue::Bool(true)),
                Some("false") => Ok(DynSolValue::Bool(false)),
                _ => Err(mismatch(ty, value)),
            }
        }
        DynSolType::Int(size) => {
            if let Some(n) = value.as_i64() {
                let sign = if n < 0 { Sign::Negative } else { Sign::Positive };
                let abs = U256::from(n.unsigned_abs());
                let i = I256::checked_from_sign_and_abs(sign, abs).ok_or_else(|| mismatch(ty, value))?;
                return Ok(DynSolValue::Int(i, *size))
            }
            let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;
            let i = I256::from_dec_str(s).map_err(|_| mismatch(ty, value))?;
            Ok(DynSolValue::Int(i, *size))
        }
        DynSolType::Uint(size) => {
            if let Some(n) = value.as_u64() {
                return Ok(DynSolValue::Uint(U256::from(n), *size))
            }
            let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;
            let (digits, radix) = match s.strip_prefix("0x") {
                Some(rest) => (rest, 16),
                None => (s, 10),
            };
            let u = U256::from_str_radix(digits, radix).map_err(|_| mismatch(ty, value))?;
            Ok(DynSolValue::Uint(u, *size))
        }
        DynSolType::FixedBytes(size) => {
            let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;
            let bytes = evmabi_primitives::decode_hex(s).map_err(|_| mismatch(ty, value))?;
            if bytes.len() != *size {
                return Err(mismatch(ty, value))
            }
            let mut word = [0u8; 32];
            word[..*size].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(evmabi_primitives::B256::from(word), *size))
        }
        DynSolType::Bytes => {
            let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;
            let bytes = evmabi_primitives::decode_hex(s).map_err(|_| mismatch(ty, value))?;
            Ok(DynSolValue::Bytes(bytes))
        }
        DynSolType::String => {
            let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;
            Ok(DynSolValue::String(s.to_string()))
        }
        DynSolType::Array(inner) => {
            let arr = value.as_array().ok_or_else(|| mismatch(ty, value))?;
            let values = arr.iter().map(|v| coerce(inner, v)).collect::<Result<Vec<_>>>()?;
            Ok(DynSolValue::Array(values))
        }
        DynSolType::FixedArray(inner, len) => {
            let arr = value.as_array().ok_or_else(|| mismatch(ty, value))?;
            if arr.len() != *len {
                return Err(mismatch(ty, value))
            }
            let values = arr.iter().map(|v| coerce(inner, v)).collect::<Result<Vec<_>>>()?;
            Ok(DynSolValue::FixedArray(values))
        }
        DynSolType::Tuple(inner) => {
            let arr = value.as_array().ok_or_else(|| mismatch(ty, value))?;
            if arr.len() != inner.len() {
                return Err(mismatch(ty, value))
            }
            let values =
                inner.iter().zip(arr.iter()).map(|(t, v)| coerce(t, v)).collect::<Result<Vec<_>>>()?;
            Ok(DynSolValue::Tuple(values))
        }
        DynSolType::Struct { name, prop_names, tuple } => {
            let obj = value.as_object().ok_or_else(|| mismatch(ty, value))?;
            let mut values = Vec::with_capacity(tuple.len());
            for (prop_name, prop_ty) in prop_names.iter().zip(tuple.iter()) {
                let v = obj.get(prop_name).ok_or_else(|| mismatch(ty, value))?;
                values.push(coerce(prop_ty, v)?);
            }
            Ok(DynSolValue::Struct { name: name.clone(), prop_names: prop_names.clone(), tuple: values })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_struct_from_object() {
        let ty = DynSolType::Struct {
            name: "Person".to_string(),
            prop_names: vec!["wallet".to_string(), "name".to_string()],
            tuple: vec![DynSolType::Address, DynSolType::String],
        };
        let value = json!({ "wallet": "0x0000000000000000000000000000000000000000", "name": "Bob" });
        let coerced = coerce(&ty, &value).unwrap();
        assert_eq!(
            coerced,
            DynSolValue::Struct {
                name: "Person".to_string(),
                prop_names: vec!["wallet".to_string(), "name".to_string()],
                tuple: vec![
                    DynSolValue::Address(Address::from([0u8; 20])),
                    DynSolValue::String("Bob".to_string())
                ],
            }
        );
    }

    #[test]
    fn coerces_uint_from_decimal_and_hex_strings() {
        assert_eq!(
            coerce(&DynSolType::Uint(256), &json!("42")).unwrap(),
            DynSolValue::Uint(U256::from(42u64), 256)
        );
        assert_eq!(
            coerce(&DynSolType::Uint(256), &json!("0x2a")).unwrap(),
            DynSolValue::Uint(U256::from(42u64), 256)
        );
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(coerce(&DynSolType::Address, &json!(42)).is_err());
    }
}
