use alloc::{string::String, vec::Vec};
use evmabi_dyn_abi::{encode_params, DynSolValue};
use evmabi_primitives::{keccak256, Address, B256, U256};

/// EIP-712 domain separator parameters.
///
/// Protocol designers only include the fields relevant to their signing
/// domain; unused fields are left out of both the struct's `encodeType`
/// string and its `encodeData` word list, per the
/// [EIP-712 domain rationale](https://eips.ethereum.org/EIPS/eip-712#definition-of-domainseparator).
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// The user-readable name of the signing domain, e.g. the DApp's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The current major version of the signing domain. Signatures across
    /// versions are not compatible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// The EIP-155 chain id. Signing should be refused if this does not
    /// match the active chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<U256>,
    /// The address of the contract that will verify the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<Address>,
    /// A disambiguating salt, usable as a domain separator of last resort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<B256>,
}

impl Eip712Domain {
    const NAME: &'static str = "EIP712Domain";

    /// The domain separator: `hashStruct(domain)`.
    pub fn separator(&self) -> B256 {
        self.hash_struct()
    }

    /// The `encodeType` string, e.g. `"EIP712Domain(string name,uint256
    /// chainId)"` when only `name` and `chain_id` are set.
    pub fn encode_type(&self) -> String {
        let mut ty = String::from(Self::NAME);
        ty.push('(');
        if self.name.is_some() {
            ty.push_str("string name,");
        }
        if self.version.is_some() {
            ty.push_str("string version,");
        }
        if self.chain_id.is_some() {
            ty.push_str("uint256 chainId,");
        }
        if self.verifying_contract.is_some() {
            ty.push_str("address verifyingContract,");
        }
        if self.salt.is_some() {
            ty.push_str("bytes32 salt,");
        }
        if ty.ends_with(',') {
            ty.pop();
        }
        ty.push(')');
        ty
    }

    /// `keccak256(encodeType)`.
    pub fn type_hash(&self) -> B256 {
        keccak256(self.encode_type().as_bytes())
    }

    /// The `encodeData` word list: each set field as one 32-byte ABI word,
    /// with `name`/`version` replaced by their `keccak256` hash.
    pub fn encode_data(&self) -> Vec<u8> {
        let mut values = Vec::with_capacity(5);
        if let Some(name) = &self.name {
            values.push(DynSolValue::FixedBytes(keccak256(name.as_bytes()), 32));
        }
        if let Some(version) = &self.version {
            values.push(DynSolValue::FixedBytes(keccak256(version.as_bytes()), 32));
        }
        if let Some(chain_id) = self.chain_id {
            values.push(DynSolValue::Uint(chain_id, 256));
        }
        if let Some(verifying_contract) = self.verifying_contract {
            values.push(DynSolValue::Address(verifying_contract));
        }
        if let Some(salt) = self.salt {
            values.push(DynSolValue::FixedBytes(salt, 32));
        }
        // Every field here is static, so the head/tail codec degenerates to
        // a flat concatenation of words, which is exactly `encodeData`.
        encode_params(&values)
    }

    /// `hashStruct(domain) = keccak256(typeHash ‖ encodeData)`.
    pub fn hash_struct(&self) -> B256 {
        let mut buf = self.type_hash().to_vec();
        buf.extend(self.encode_data());
        keccak256(buf)
    }
}
