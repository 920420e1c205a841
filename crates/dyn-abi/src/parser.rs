//! A hand-written recursive-descent parser for the Solidity type grammar
//! used in function/event signatures and `internalType` strings.
//!
//! The grammar is narrower than full Solidity: there are no user-defined
//! value types and no function-pointer type, and named structs are never
//! produced here — a bare type string can only describe elementary types,
//! arrays, and anonymous tuples. Named structs are built programmatically by
//! the EIP-712 layer from a declared field list, not parsed from a string.

use crate::{DynSolType, Error, Result};
use alloc::{string::ToString, vec::Vec};

/// Parses a Solidity type string into a [`DynSolType`].
pub fn parse(s: &str) -> Result<DynSolType> {
    let mut p = Parser { input: s.as_bytes(), pos: 0, original: s };
    let ty = p.parse_type()?;
    if p.pos != p.input.len() {
        return Err(Error::InvalidTypeString(s.to_string()))
    }
    Ok(ty)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    original: &'a str,
}

impl<'a> Parser<'a> {
    fn err(&self) -> Error {
        Error::InvalidTypeString(self.original.to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// `type := stem ('[' [digits] ']')*`
    fn parse_type(&mut self) -> Result<DynSolType> {
        let mut ty = self.parse_stem()?;
        loop {
            if self.eat(b'[') {
                let len_start = self.pos;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                let len_str = core::str::from_utf8(&self.input[len_start..self.pos]).unwrap();
                if !self.eat(b']') {
                    return Err(self.err())
                }
                ty = if len_str.is_empty() {
                    DynSolType::Array(alloc::boxed::Box::new(ty))
                } else {
                    let n: usize = len_str.parse().map_err(|_| self.err())?;
                    DynSolType::FixedArray(alloc::boxed::Box::new(ty), n)
                };
            } else {
                break
            }
        }
        Ok(ty)
    }

    /// `stem := '(' type (',' type)* ')' | identifier`
    fn parse_stem(&mut self) -> Result<DynSolType> {
        if self.eat(b'(') {
            let mut elems = Vec::new();
            if !self.eat(b')') {
                loop {
                    elems.push(self.parse_type()?);
                    // A trailing comma, e.g. "(bool,)", is allowed: the loop
                    // simply exits via `eat(')')` on the next iteration.
                    if self.eat(b',') {
                        if self.peek() == Some(b')') {
                            break
                        }
                        continue
                    }
                    break
                }
                if !self.eat(b')') {
                    return Err(self.err())
                }
            }
            return Ok(DynSolType::Tuple(elems))
        }

        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.err())
        }
        let ident = core::str::from_utf8(&self.input[start..self.pos]).unwrap();
        resolve_elementary(ident).ok_or_else(|| self.err())
    }
}

fn resolve_elementary(name: &str) -> Option<DynSolType> {
    Some(match name {
        "address" => DynSolType::Address,
        "bool" => DynSolType::Bool,
        "string" => DynSolType::String,
        "bytes" => DynSolType::Bytes,
        "uint" => DynSolType::Uint(256),
        "int" => DynSolType::Int(256),
        "tuple" => return None, // handled by caller via '(' path only
        _ => {
            if let Some(sz) = name.strip_prefix("bytes") {
                let sz: usize = sz.parse().ok()?;
                if sz == 0 || sz > 32 {
                    return None
                }
                return Some(DynSolType::FixedBytes(sz))
            }
            let (rest, is_uint) = match name.strip_prefix('u') {
                Some(rest) => (rest, true),
                None => (name, false),
            };
            let sz: usize = rest.strip_prefix("int")?.parse().ok()?;
            if sz == 0 || sz > 256 || sz % 8 != 0 {
                return None
            }
            if is_uint {
                DynSolType::Uint(sz)
            } else {
                DynSolType::Int(sz)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{boxed::Box, vec};

    #[test]
    fn simple_types() {
        assert_eq!(parse("uint256").unwrap(), DynSolType::Uint(256));
        assert_eq!(parse("uint8").unwrap(), DynSolType::Uint(8));
        assert_eq!(parse("uint").unwrap(), DynSolType::Uint(256));
        assert_eq!(parse("address").unwrap(), DynSolType::Address);
        assert_eq!(parse("bool").unwrap(), DynSolType::Bool);
        assert_eq!(parse("string").unwrap(), DynSolType::String);
        assert_eq!(parse("bytes").unwrap(), DynSolType::Bytes);
        assert_eq!(parse("bytes32").unwrap(), DynSolType::FixedBytes(32));
    }

    #[test]
    fn arrays() {
        assert_eq!(parse("uint256[]").unwrap(), DynSolType::Array(Box::new(DynSolType::Uint(256))));
        assert_eq!(
            parse("uint256[2]").unwrap(),
            DynSolType::FixedArray(Box::new(DynSolType::Uint(256)), 2)
        );
        assert_eq!(
            parse("address[2][]").unwrap(),
            DynSolType::Array(Box::new(DynSolType::FixedArray(Box::new(DynSolType::Address), 2)))
        );
    }

    #[test]
    fn tuples() {
        assert_eq!(parse("()").unwrap(), DynSolType::Tuple(vec![]));
        assert_eq!(parse("(bool,)").unwrap(), DynSolType::Tuple(vec![DynSolType::Bool]));
        assert_eq!(
            parse("(uint256,address[])").unwrap(),
            DynSolType::Tuple(vec![
                DynSolType::Uint(256),
                DynSolType::Array(Box::new(DynSolType::Address))
            ])
        );
    }

    #[test]
    fn invalid_size_rejected() {
        assert!(parse("uint7").is_err());
        assert!(parse("bytes33").is_err());
        assert!(parse("uint260").is_err());
    }

    #[test]
    fn trailing_garbage_rejected() {
        assert!(parse("bool,uint256))").is_err());
        assert!(parse("(bool,uint256").is_err());
    }

    #[test]
    fn real_world_signature_fragment() {
        assert_eq!(
            parse("(uint256,uint256,address[],address,uint256)").unwrap(),
            DynSolType::Tuple(vec![
                DynSolType::Uint(256),
                DynSolType::Uint(256),
                DynSolType::Array(Box::new(DynSolType::Address)),
                DynSolType::Address,
                DynSolType::Uint(256),
            ])
        );
    }
}
