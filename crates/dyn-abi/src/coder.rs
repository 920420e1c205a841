//! The 32-byte-word ABI codec: encodes and decodes a sequence of
//! `(DynSolType, DynSolValue)` pairs using the Solidity head/tail layout.
//!
//! There is no stateful `Encoder`/`Decoder` object here — encoding is a pure
//! function from a value slice to bytes, and decoding is a pure function
//! from bytes and a type slice to a value vector. Both recurse through the
//! same head/tail algorithm for nested groups (tuples, fixed arrays, dynamic
//! arrays), since a nested dynamic group is encoded exactly like a top-level
//! argument list.

use crate::{value::word_from_usize, DynSolType, DynSolValue, Error, Result};
use alloc::{string::String, vec, vec::Vec};
use evmabi_primitives::{Address, B256, I256, U256};

const WORD: usize = 32;

/// ABI-encodes a sequence of values as a top-level argument list (the
/// "group" layout: head region of in-place/offset words, followed by the
/// tail region of dynamic payloads).
pub fn encode_params(values: &[DynSolValue]) -> Vec<u8> {
    encode_group(values)
}

/// Encodes `values` as a head/tail group. Used both for the top-level
/// argument list and recursively for nested dynamic tuples/arrays.
pub(crate) fn encode_group(values: &[DynSolValue]) -> Vec<u8> {
    let head_width: usize = values
        .iter()
        .map(|v| if v.is_dynamic() { WORD } else { static_head_width(v) })
        .sum();

    let mut head = Vec::with_capacity(head_width);
    let mut tail = Vec::new();
    for v in values {
        if v.is_dynamic() {
            let offset = head_width + tail.len();
            head.extend_from_slice(&word_from_usize(offset));
            v.encode_tail(&mut tail);
        } else {
            v.encode_head(&mut head);
        }
    }
    head.extend(tail);
    head
}

fn static_head_width(v: &DynSolValue) -> usize {
    match v {
        DynSolValue::FixedArray(elems) | DynSolValue::Tuple(elems) => {
            elems.iter().map(static_head_width_dyn_aware).sum()
        }
        DynSolValue::Struct { tuple, .. } => tuple.iter().map(static_head_width_dyn_aware).sum(),
        _ => WORD,
    }
}

fn static_head_width_dyn_aware(v: &DynSolValue) -> usize {
    if v.is_dynamic() {
        WORD
    } else {
        static_head_width(v)
    }
}

/// Decodes `data` as a sequence of `types`, in strict bool-decoding mode.
pub fn decode_params(data: &[u8], types: &[DynSolType]) -> Result<Vec<DynSolValue>> {
    decode_group(data, types, true)
}

/// Decodes `data` as a sequence of `types`. `strict_bool` selects whether a
/// `bool` word outside `{0,1}` is rejected (`true`, the default) or coerced
/// to `true` on any nonzero byte (`false`) — the one configurable switch
/// named by the codec's design.
pub fn decode_params_with(data: &[u8], types: &[DynSolType], strict_bool: bool) -> Result<Vec<DynSolValue>> {
    decode_group(data, types, strict_bool)
}

/// Decodes a single value of `ty`, treating `data` as a 1-element group.
pub fn decode_single(ty: &DynSolType, data: &[u8]) -> Result<DynSolValue> {
    decode_group(data, core::slice::from_ref(ty), true).map(|mut v| v.remove(0))
}

/// Decodes a 4-byte-selector-prefixed blob, validating the prefix first.
pub fn decode_with_selector(selector: [u8; 4], data: &[u8], types: &[DynSolType]) -> Result<Vec<DynSolValue>> {
    if data.len() < 4 || data[..4] != selector {
        return Err(Error::SelectorMismatch)
    }
    decode_params(&data[4..], types)
}

pub(crate) fn decode_group(data: &[u8], types: &[DynSolType], strict_bool: bool) -> Result<Vec<DynSolValue>> {
    let mut values = Vec::with_capacity(types.len());
    let mut cursor = 0usize;
    for ty in types {
        if ty.is_dynamic() {
            let offset = read_usize(take_word(data, cursor)?)?;
            if offset % WORD != 0 || offset > data.len() {
                return Err(Error::InvalidEncoding)
            }
            let child = data.get(offset..).ok_or(Error::InvalidEncoding)?;
            values.push(decode_dynamic(ty, child, strict_bool)?);
            cursor += WORD;
        } else {
            let width = ty.head_word_width();
            let chunk = data.get(cursor..cursor + width).ok_or(Error::InvalidEncoding)?;
            values.push(decode_static(ty, chunk, strict_bool)?);
            cursor += width;
        }
    }
    Ok(values)
}

fn take_word(data: &[u8], at: usize) -> Result<&[u8; 32]> {
    data.get(at..at + WORD)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::InvalidEncoding)
}

fn read_usize(word: &[u8; 32]) -> Result<usize> {
    if word[..24].iter().any(|&b| b != 0) {
        return Err(Error::InvalidEncoding)
    }
    Ok(u64::from_be_bytes(word[24..].try_into().unwrap()) as usize)
}

fn decode_static(ty: &DynSolType, chunk: &[u8], strict_bool: bool) -> Result<DynSolValue> {
    match ty {
        DynSolType::Address => {
            let word: &[u8; 32] = chunk.try_into().map_err(|_| Error::InvalidEncoding)?;
            Ok(DynSolValue::Address(Address::from_slice(&word[12..])))
        }
        DynSolType::Bool => {
            let word: &[u8; 32] = chunk.try_into().map_err(|_| Error::InvalidEncoding)?;
            let last = word[31];
            let value = match last {
                0 => false,
                1 => true,
                _ if !strict_bool => true,
                _ => return Err(Error::InvalidEncoding),
            };
            Ok(DynSolValue::Bool(value))
        }
        DynSolType::Int(size) => {
            let word: [u8; 32] = chunk.try_into().map_err(|_| Error::InvalidEncoding)?;
            let value = I256::from_raw(U256::from_be_bytes(word));
            check_int_fits(value, *size)?;
            Ok(DynSolValue::Int(value, *size))
        }
        DynSolType::Uint(size) => {
            let word: [u8; 32] = chunk.try_into().map_err(|_| Error::InvalidEncoding)?;
            let value = U256::from_be_bytes(word);
            check_uint_fits(value, *size)?;
            Ok(DynSolValue::Uint(value, *size))
        }
        DynSolType::FixedBytes(size) => {
            let word: [u8; 32] = chunk.try_into().map_err(|_| Error::InvalidEncoding)?;
            Ok(DynSolValue::FixedBytes(B256::from(word), *size))
        }
        DynSolType::FixedArray(t, len) => {
            let elems = decode_group(chunk, &vec![(**t).clone(); *len], strict_bool)?;
            Ok(DynSolValue::FixedArray(elems))
        }
        DynSolType::Tuple(tys) => Ok(DynSolValue::Tuple(decode_group(chunk, tys, strict_bool)?)),
        DynSolType::Struct { name, prop_names, tuple } => Ok(DynSolValue::Struct {
            name: name.clone(),
            prop_names: prop_names.clone(),
            tuple: decode_group(chunk, tuple, strict_bool)?,
        }),
        DynSolType::Bytes | DynSolType::String | DynSolType::Array(_) => unreachable!("dynamic type in decode_static"),
    }
}

fn decode_dynamic(ty: &DynSolType, data: &[u8], strict_bool: bool) -> Result<DynSolValue> {
    match ty {
        DynSolType::Bytes => Ok(DynSolValue::Bytes(decode_packed(data)?.to_vec())),
        DynSolType::String => {
            let bytes = decode_packed(data)?;
            let s = core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
            Ok(DynSolValue::String(String::from(s)))
        }
        DynSolType::Array(t) => {
            let len = read_usize(take_word(data, 0)?)?;
            let rest = data.get(WORD..).ok_or(Error::InvalidEncoding)?;
            check_declared_len(len, rest.len())?;
            let elems = decode_group(rest, &vec![(**t).clone(); len], strict_bool)?;
            Ok(DynSolValue::Array(elems))
        }
        DynSolType::FixedArray(t, len) => {
            let elems = decode_group(data, &vec![(**t).clone(); *len], strict_bool)?;
            Ok(DynSolValue::FixedArray(elems))
        }
        DynSolType::Tuple(tys) => Ok(DynSolValue::Tuple(decode_group(data, tys, strict_bool)?)),
        DynSolType::Struct { name, prop_names, tuple } => Ok(DynSolValue::Struct {
            name: name.clone(),
            prop_names: prop_names.clone(),
            tuple: decode_group(data, tuple, strict_bool)?,
        }),
        _ => unreachable!("static type in decode_dynamic"),
    }
}

fn decode_packed(data: &[u8]) -> Result<&[u8]> {
    let len = read_usize(take_word(data, 0)?)?;
    let end = WORD.checked_add(len).ok_or(Error::InvalidEncoding)?;
    data.get(WORD..end).ok_or(Error::InvalidEncoding)
}

/// Rejects a data-declared dynamic-array length that could not possibly be
/// backed by `available` remaining bytes, before any allocation sized by
/// `len` is made. Every array element occupies at least one 32-byte head
/// word (an in-place value or a tail offset), so `len * 32` is a hard lower
/// bound on the bytes required.
fn check_declared_len(len: usize, available: usize) -> Result<()> {
    match len.checked_mul(WORD) {
        Some(min_bytes) if min_bytes <= available => Ok(()),
        _ => Err(Error::InvalidEncoding),
    }
}

fn check_int_fits(value: I256, bits: usize) -> Result<()> {
    if bits >= 256 {
        return Ok(())
    }
    if value.bits() as usize > bits {
        Err(Error::NumericOverflow)
    } else {
        Ok(())
    }
}

fn check_uint_fits(value: U256, bits: usize) -> Result<()> {
    if bits >= 256 {
        return Ok(())
    }
    if value.bit_len() > bits {
        Err(Error::NumericOverflow)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;

    #[test]
    fn address_round_trip() {
        let addr = Address::repeat_byte(0x11);
        let v = DynSolValue::Address(addr);
        let enc = encode_params(&[v.clone()]);
        let dec = decode_params(&enc, &[DynSolType::Address]).unwrap();
        assert_eq!(dec, vec![v]);
    }

    #[test]
    fn dynamic_array_of_addresses() {
        let values = vec![
            DynSolValue::Address(Address::repeat_byte(0x11)),
            DynSolValue::Address(Address::repeat_byte(0x22)),
        ];
        let v = DynSolValue::Array(values);
        let enc = encode_params(&[v.clone()]);
        let ty = DynSolType::Array(Box::new(DynSolType::Address));
        let dec = decode_params(&enc, &[ty]).unwrap();
        assert_eq!(dec, vec![v]);
    }

    #[test]
    fn dynamic_tuple_with_string() {
        let v = DynSolValue::Tuple(vec![
            DynSolValue::Bool(true),
            DynSolValue::String(String::from("gavofyork")),
        ]);
        let enc = encode_params(&[v.clone()]);
        let ty = DynSolType::Tuple(vec![DynSolType::Bool, DynSolType::String]);
        let dec = decode_params(&enc, &[ty]).unwrap();
        assert_eq!(dec, vec![v]);
    }

    #[test]
    fn strict_bool_rejects_invalid_word() {
        let mut word = [0u8; 32];
        word[31] = 2;
        assert_eq!(
            decode_single(&DynSolType::Bool, &word),
            Err(Error::InvalidEncoding)
        );
    }

    #[test]
    fn lenient_bool_accepts_nonzero() {
        let mut word = [0u8; 32];
        word[31] = 2;
        let dec = decode_params_with(&word, &[DynSolType::Bool], false).unwrap();
        assert_eq!(dec, vec![DynSolValue::Bool(true)]);
    }

    #[test]
    fn overflowing_uint_rejected() {
        let mut word = [0u8; 32];
        word[30] = 1; // sets bit 8 from the end, overflows uint8
        assert_eq!(
            decode_single(&DynSolType::Uint(8), &word),
            Err(Error::NumericOverflow)
        );
    }

    #[test]
    fn oversized_declared_array_length_is_rejected_before_allocating() {
        // Word 0: offset 0x20, pointing at word 1.
        // Word 1: a declared length of u64::MAX, with no element data behind
        // it at all. Must be rejected without attempting to allocate a
        // `Vec` of that length.
        let mut data = [0u8; 64];
        data[31] = 0x20;
        data[56..64].copy_from_slice(&u64::MAX.to_be_bytes());
        let ty = DynSolType::Array(Box::new(DynSolType::Uint(256)));
        assert_eq!(decode_single(&ty, &data), Err(Error::InvalidEncoding));
    }

    #[test]
    fn misaligned_tail_offset_is_rejected() {
        // Offset word declares 0x01, which is neither 32-byte aligned nor a
        // valid start of the tail region.
        let mut data = [0u8; 64];
        data[31] = 0x01;
        assert_eq!(decode_single(&DynSolType::String, &data), Err(Error::InvalidEncoding));
    }

    #[test]
    fn real_world_selector_fixture() {
        let sig = "swapExactTokensForTokens(uint256,uint256,address[],address,uint256)";
        let selector = evmabi_primitives::keccak256(sig)[..4].to_vec();
        assert_eq!(evmabi_primitives::encode_hex_prefixed(&selector), "0x38ed1739");
    }
}
