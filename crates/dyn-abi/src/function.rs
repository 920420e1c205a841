use crate::{coder, DynSolType, DynSolValue, Error, Result};
use alloc::{string::String, vec::Vec};
use evmabi_primitives::{keccak256, Selector};

/// A function descriptor: a name bound to input and output types.
///
/// The *selector* is the first four bytes of `keccak256` over the canonical
/// signature, with struct names erased to their tuple shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Input parameter types, in declaration order.
    pub inputs: Vec<DynSolType>,
    /// Output parameter types, in declaration order.
    pub outputs: Vec<DynSolType>,
}

impl Function {
    /// Creates a new function descriptor.
    pub fn new(name: impl Into<String>, inputs: Vec<DynSolType>, outputs: Vec<DynSolType>) -> Self {
        Self { name: name.into(), inputs, outputs }
    }

    /// The canonical `name(t0,t1,...)` signature, struct names erased.
    pub fn signature(&self) -> String {
        signature(&self.name, &self.inputs)
    }

    /// The 4-byte selector: `keccak256(signature)[..4]`.
    pub fn selector(&self) -> Selector {
        selector_of(&self.signature())
    }

    /// Prepends the selector to the ABI-encoded `values`.
    pub fn encode_call(&self, values: &[DynSolValue]) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + values.len() * 32);
        out.extend_from_slice(&self.selector());
        out.extend(coder::encode_params(values));
        out
    }

    /// Strips and validates the selector, then decodes the inputs.
    pub fn decode_call(&self, data: &[u8]) -> Result<Vec<DynSolValue>> {
        coder::decode_with_selector(self.selector(), data, &self.inputs)
    }

    /// Decodes a return blob as the output types. An empty blob is only
    /// valid when there are no declared outputs.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<DynSolValue>> {
        if self.outputs.is_empty() {
            return if data.is_empty() { Ok(Vec::new()) } else { Err(Error::InvalidEncoding) }
        }
        coder::decode_params(data, &self.outputs)
    }
}

pub(crate) fn signature(name: &str, inputs: &[DynSolType]) -> String {
    let mut out = String::from(name);
    out.push('(');
    for (i, t) in inputs.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&t.sol_type_name());
    }
    out.push(')');
    out
}

pub(crate) fn selector_of(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&hash[..4]);
    sel
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmabi_primitives::Address;

    #[test]
    fn swap_exact_tokens_for_tokens_selector() {
        let f = Function::new(
            "swapExactTokensForTokens",
            vec![
                DynSolType::Uint(256),
                DynSolType::Uint(256),
                DynSolType::Array(alloc::boxed::Box::new(DynSolType::Address)),
                DynSolType::Address,
                DynSolType::Uint(256),
            ],
            vec![DynSolType::Array(alloc::boxed::Box::new(DynSolType::Uint(256)))],
        );
        assert_eq!(evmabi_primitives::encode_hex_prefixed(f.selector()), "0x38ed1739");
    }

    #[test]
    fn call_round_trips() {
        let f = Function::new("transfer", vec![DynSolType::Address, DynSolType::Uint(256)], vec![DynSolType::Bool]);
        let args = vec![
            DynSolValue::Address(Address::repeat_byte(0x11)),
            DynSolValue::Uint(evmabi_primitives::U256::from(42u64), 256),
        ];
        let call = f.encode_call(&args);
        assert_eq!(&call[..4], &f.selector());
        assert_eq!(f.decode_call(&call).unwrap(), args);
    }

    #[test]
    fn empty_output_allowed_only_when_declared_empty() {
        let f = Function::new("noop", vec![], vec![]);
        assert_eq!(f.decode_output(&[]).unwrap(), Vec::<DynSolValue>::new());
    }
}
