use crate::{coerce, domain::Eip712Domain, resolver::PropertyDef, Resolver, Result};
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use evmabi_primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};

/// The `types` map of a [`TypedData`] object: every named struct used by the
/// message, keyed by type name, including `"EIP712Domain"` itself.
pub type Types = BTreeMap<String, Vec<PropertyDef>>;

/// A parsed [EIP-712](https://eips.ethereum.org/EIPS/eip-712) typed data
/// payload, as produced by a wallet's `eth_signTypedData` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TypedData {
    /// The signing domain.
    pub domain: Eip712Domain,
    /// Every named struct type referenced by `message`, including
    /// `"EIP712Domain"`.
    pub types: Types,
    /// The name of the struct `message` is an instance of.
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    /// The message to hash and sign.
    pub message: BTreeMap<String, serde_json::Value>,
}

/// Wallets commonly JSON-stringify the whole payload before embedding it in
/// an RPC call; accept both the object form and that stringified form.
impl<'de> Deserialize<'de> for TypedData {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            domain: Eip712Domain,
            types: Types,
            #[serde(rename = "primaryType")]
            primary_type: String,
            message: BTreeMap<String, serde_json::Value>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Object(Helper),
            String(String),
        }

        let Helper { domain, types, primary_type, message } = match Repr::deserialize(deserializer)? {
            Repr::Object(h) => h,
            Repr::String(s) => serde_json::from_str(&s).map_err(serde::de::Error::custom)?,
        };
        Ok(Self { domain, types, primary_type, message })
    }
}

impl TypedData {
    /// Builds the [`Resolver`] for this payload's `types` map.
    pub fn resolver(&self) -> Resolver {
        let mut resolver = Resolver::default();
        resolver.ingest_types(&self.types);
        resolver
    }

    /// `hashStruct(message)`, resolving `primaryType` against `types` and
    /// coercing `message` into a value tree along the way.
    pub fn hash_struct(&self) -> Result<B256> {
        let resolver = self.resolver();
        let ty = resolver.resolve(&self.primary_type)?;
        let message = serde_json::Value::Object(
            self.message.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        );
        let value = coerce::coerce(&ty, &message)?;
        resolver.hash_struct(&value)
    }

    /// The domain separator: `hashStruct(domain)`.
    pub fn domain_separator(&self) -> B256 {
        self.domain.separator()
    }

    /// The final EIP-712 signing hash:
    /// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(message))`, with the
    /// message term omitted when `primaryType == "EIP712Domain"`.
    pub fn signing_hash(&self) -> Result<B256> {
        let mut buf = Vec::with_capacity(2 + 32 + 32);
        buf.extend_from_slice(&[0x19, 0x01]);
        buf.extend_from_slice(self.domain_separator().as_slice());
        if self.primary_type != "EIP712Domain" {
            buf.extend_from_slice(self.hash_struct()?.as_slice());
        }
        Ok(keccak256(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmabi_primitives::U256;
    use serde_json::json;

    fn sample() -> TypedData {
        let mut types = Types::new();
        types.insert(
            "Person".to_string(),
            vec![PropertyDef::new("address", "wallet"), PropertyDef::new("string", "name")],
        );
        TypedData {
            domain: Eip712Domain {
                name: Some("TestDApp".to_string()),
                version: Some("1.0".to_string()),
                chain_id: Some(U256::from(1u64)),
                ..Default::default()
            },
            types,
            primary_type: "Person".to_string(),
            message: [
                ("wallet".to_string(), json!("0x0000000000000000000000000000000000000000")),
                ("name".to_string(), json!("Bob")),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[test]
    fn signing_hash_is_deterministic() {
        let data = sample();
        assert_eq!(data.signing_hash().unwrap(), data.signing_hash().unwrap());
    }

    #[test]
    fn domain_only_signing_hash_omits_message_term() {
        let mut data = sample();
        data.primary_type = "EIP712Domain".to_string();
        let expected = keccak256(
            [&[0x19, 0x01][..], data.domain_separator().as_slice()].concat(),
        );
        assert_eq!(data.signing_hash().unwrap(), expected);
    }

    #[test]
    fn domain_only_signing_hash_matches_known_fixture() {
        let mut data = sample();
        data.primary_type = "EIP712Domain".to_string();
        let domain_separator: B256 =
            "0xc2f8787176b8ac6bf7215b4adcc1e069bf4ab82d9ab1df05a57a91d425935b6e".parse().unwrap();
        assert_eq!(data.domain_separator(), domain_separator);

        let expected =
            keccak256([&[0x19, 0x01][..], domain_separator.as_slice()].concat());
        assert_eq!(data.signing_hash().unwrap(), expected);
    }

    #[test]
    fn deserializes_stringified_message() {
        let data = sample();
        let as_object = serde_json::to_value(&data).unwrap();
        let stringified = serde_json::Value::String(as_object.to_string());
        let parsed: TypedData = serde_json::from_value(stringified).unwrap();
        assert_eq!(parsed.signing_hash().unwrap(), data.signing_hash().unwrap());
    }
}
