use crate::bits::FixedBytes;
use alloc::{string::String, vec::Vec};
use core::fmt;
use tiny_keccak::{Hasher, Keccak};

/// Simple interface to the [`keccak256`] hash function.
///
/// [`keccak256`]: https://en.wikipedia.org/wiki/SHA-3
pub fn keccak256<T: AsRef<[u8]>>(bytes: T) -> FixedBytes<32> {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(bytes.as_ref());
    hasher.finalize(&mut output);
    output.into()
}

/// A hex string could not be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidHex;

impl fmt::Display for InvalidHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid hex string")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidHex {}

/// Encodes `bytes` as a lowercase hex string, optionally prefixed with
/// `0x`.
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Encodes `bytes` as a `0x`-prefixed lowercase hex string.
pub fn encode_hex_prefixed(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decodes a hex string, with or without a `0x`/`0X` prefix. An odd-length
/// body is interpreted as having an implicit leading `0` nibble.
///
/// Both uppercase and lowercase (and mixed-case) hex digits decode
/// identically. The empty string and a bare `0x`/`0X` prefix decode to the
/// empty byte string.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, InvalidHex> {
    let s = strip_0x(s);
    let bytes = s.as_bytes();

    let mut out = Vec::with_capacity(bytes.len().div_ceil(2));
    let mut i = 0;

    if bytes.len() % 2 == 1 {
        out.push(nibble(bytes[0]).ok_or(InvalidHex)?);
        i = 1;
    }

    while i + 1 < bytes.len() {
        let hi = nibble(bytes[i]).ok_or(InvalidHex)?;
        let lo = nibble(bytes[i + 1]).ok_or(InvalidHex)?;
        out.push((hi << 4) | lo);
        i += 2;
    }

    Ok(out)
}

/// Decodes a hex string the same way as [`decode_hex`], but substitutes
/// `0xff` for any nibble pair that fails to parse instead of erroring.
///
/// This is meant for diagnostics only; the codec always uses the strict
/// [`decode_hex`].
pub fn decode_hex_lenient(s: &str) -> Vec<u8> {
    let s = strip_0x(s);
    let bytes = s.as_bytes();

    let mut out = Vec::with_capacity(bytes.len().div_ceil(2));
    let mut i = 0;

    if bytes.len() % 2 == 1 {
        out.push(nibble(bytes[0]).unwrap_or(0xf));
        i = 1;
    }

    while i + 1 < bytes.len() {
        match (nibble(bytes[i]), nibble(bytes[i + 1])) {
            (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
            _ => out.push(0xff),
        }
        i += 2;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(
            encode_hex(keccak256([])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47"
        );
    }

    #[test]
    fn hello_world() {
        assert_eq!(
            encode_hex(keccak256(b"hello world")),
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fa"
        );
    }

    #[test]
    fn roundtrip() {
        let data = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(decode_hex(&encode_hex_prefixed(data)).unwrap(), data);
        assert_eq!(decode_hex(&encode_hex(data)).unwrap(), data);
    }

    #[test]
    fn odd_length_has_implicit_leading_nibble() {
        assert_eq!(decode_hex("abc").unwrap(), [0x0a, 0xbc]);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(decode_hex("0xDEADbeef").unwrap(), decode_hex("0xdeadbeef").unwrap());
    }

    #[test]
    fn empty_and_bare_prefix() {
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex("0X").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn invalid_character_fails() {
        assert_eq!(decode_hex("0xzz"), Err(InvalidHex));
    }

    #[test]
    fn lenient_substitutes_invalid_pairs() {
        assert_eq!(decode_hex_lenient("0xzz"), [0xff]);
        assert_eq!(decode_hex_lenient("0xdezz"), [0xde, 0xff]);
    }
}
