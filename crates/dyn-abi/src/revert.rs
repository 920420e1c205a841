use crate::{coder, function, DynSolType, DynSolValue, Error, Result};
use alloc::{string::String, vec::Vec};
use evmabi_primitives::Selector;

/// A custom error descriptor: a name bound to input types, as declared by a
/// Solidity `error` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDef {
    /// Error name.
    pub name: String,
    /// Input parameter types, in declaration order.
    pub inputs: Vec<DynSolType>,
}

impl ErrorDef {
    /// Creates a new error descriptor.
    pub fn new(name: impl Into<String>, inputs: Vec<DynSolType>) -> Self {
        Self { name: name.into(), inputs }
    }

    /// The canonical `name(t0,t1,...)` signature.
    pub fn signature(&self) -> String {
        function::signature(&self.name, &self.inputs)
    }

    /// The 4-byte selector: `keccak256(signature)[..4]`.
    pub fn selector(&self) -> Selector {
        function::selector_of(&self.signature())
    }

    /// Strips and validates the selector, then decodes the inputs.
    pub fn decode_error(&self, data: &[u8]) -> Result<Vec<DynSolValue>> {
        coder::decode_with_selector(self.selector(), data, &self.inputs)
    }
}

/// Finds the candidate in `errors` whose selector matches `data`'s first
/// four bytes and decodes the remainder against it.
///
/// Returns [`Error::UnknownFunctionOrError`] if `data` is shorter than four
/// bytes or matches none of the candidates.
pub fn dispatch_error<'a>(
    errors: &'a [ErrorDef],
    data: &[u8],
) -> Result<(&'a ErrorDef, Vec<DynSolValue>)> {
    if data.len() < 4 {
        return Err(Error::UnknownFunctionOrError)
    }
    let selector: Selector = data[..4].try_into().unwrap();
    let candidate = errors
        .iter()
        .find(|e| e.selector() == selector)
        .ok_or(Error::UnknownFunctionOrError)?;
    let values = candidate.decode_error(data)?;
    Ok((candidate, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matches_known_signature() {
        // Solidity's built-in `Error(string)` revert reason.
        let e = ErrorDef::new("Error", vec![DynSolType::String]);
        assert_eq!(e.signature(), "Error(string)");
        assert_eq!(evmabi_primitives::encode_hex_prefixed(e.selector()), "0x08c379a0");
    }

    #[test]
    fn decode_error_round_trips() {
        let e = ErrorDef::new("InsufficientBalance", vec![DynSolType::Uint(256), DynSolType::Uint(256)]);
        let args = vec![
            DynSolValue::Uint(evmabi_primitives::U256::from(10u64), 256),
            DynSolValue::Uint(evmabi_primitives::U256::from(5u64), 256),
        ];
        let mut data = e.selector().to_vec();
        data.extend(coder::encode_params(&args));
        assert_eq!(e.decode_error(&data).unwrap(), args);
    }

    #[test]
    fn dispatch_picks_matching_candidate() {
        let insufficient = ErrorDef::new("InsufficientBalance", vec![DynSolType::Uint(256)]);
        let paused = ErrorDef::new("Paused", vec![]);
        let mut data = insufficient.selector().to_vec();
        data.extend(coder::encode_params(&[DynSolValue::Uint(evmabi_primitives::U256::from(1u64), 256)]));

        let (matched, values) = dispatch_error(&[paused.clone(), insufficient.clone()], &data).unwrap();
        assert_eq!(matched, &insufficient);
        assert_eq!(values, vec![DynSolValue::Uint(evmabi_primitives::U256::from(1u64), 256)]);
    }

    #[test]
    fn dispatch_rejects_unknown_selector() {
        let paused = ErrorDef::new("Paused", vec![]);
        let data = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(dispatch_error(&[paused], &data), Err(Error::UnknownFunctionOrError));
    }
}
