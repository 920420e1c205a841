use crate::{coder, function, DynSolType, DynSolValue, Error, Result};
use alloc::{string::String, vec::Vec};
use evmabi_primitives::{keccak256, B256};

/// One parameter of an [`Event`]: its type and whether it is `indexed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
    /// The parameter's type.
    pub ty: DynSolType,
    /// Whether the parameter is emitted as a topic rather than in the log
    /// data.
    pub indexed: bool,
}

/// An event descriptor: a name bound to parameters, some of which are
/// `indexed`, plus the `anonymous` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name.
    pub name: String,
    /// Parameters, in declaration order.
    pub inputs: Vec<EventParam>,
    /// Anonymous events omit `topic0`.
    pub anonymous: bool,
}

/// A log's indexed parameter, decoded if it was a value type or left as the
/// opaque topic hash if it was a reference type (whose preimage cannot be
/// recovered from the topic alone).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexedValue {
    /// A fully decoded value-typed indexed parameter.
    Value(DynSolValue),
    /// The topic hash of a reference-typed indexed parameter.
    Hash(B256),
}

/// The result of decoding a log against an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    /// Indexed parameters, in declaration order.
    pub indexed: Vec<IndexedValue>,
    /// Non-indexed parameters, decoded from the log data.
    pub body: Vec<DynSolValue>,
}

fn is_reference_type(ty: &DynSolType) -> bool {
    matches!(
        ty,
        DynSolType::Bytes
            | DynSolType::String
            | DynSolType::Array(_)
            | DynSolType::FixedArray(..)
            | DynSolType::Tuple(_)
            | DynSolType::Struct { .. }
    )
}

impl Event {
    /// Creates a new event descriptor.
    pub fn new(name: impl Into<String>, inputs: Vec<EventParam>, anonymous: bool) -> Self {
        Self { name: name.into(), inputs, anonymous }
    }

    /// The canonical `name(t0,t1,...)` signature over all parameters in
    /// declaration order, indexed or not.
    pub fn signature(&self) -> String {
        let types: Vec<DynSolType> = self.inputs.iter().map(|p| p.ty.clone()).collect();
        function::signature(&self.name, &types)
    }

    /// `keccak256(signature)`, or `None` for an anonymous event.
    pub fn topic0(&self) -> Option<B256> {
        if self.anonymous {
            None
        } else {
            Some(keccak256(self.signature().as_bytes()))
        }
    }

    /// Encodes a single indexed parameter's topic value.
    pub fn encode_topic(value: &DynSolValue) -> B256 {
        match value {
            DynSolValue::Bytes(b) => keccak256(b),
            DynSolValue::String(s) => keccak256(s.as_bytes()),
            DynSolValue::Array(_) | DynSolValue::FixedArray(_) | DynSolValue::Tuple(_) | DynSolValue::Struct { .. } => {
                keccak256(value.encode_single())
            }
            _ => {
                let mut out = Vec::with_capacity(32);
                value.encode_head(&mut out);
                B256::from_slice(&out)
            }
        }
    }

    /// Decodes a log's `topics` and `data` against this event's parameters.
    ///
    /// `topics[0]` is checked against [`Self::topic0`] unless the event is
    /// anonymous. The remaining topics are matched positionally against the
    /// indexed parameters; `data` is decoded as a group over the
    /// non-indexed parameters.
    pub fn decode_log(&self, topics: &[B256], data: &[u8]) -> Result<DecodedEvent> {
        let mut topics = topics;
        if let Some(topic0) = self.topic0() {
            match topics.split_first() {
                Some((first, rest)) if *first == topic0 => topics = rest,
                _ => return Err(Error::SelectorMismatch),
            }
        }

        let indexed_params: Vec<&EventParam> = self.inputs.iter().filter(|p| p.indexed).collect();
        if topics.len() != indexed_params.len() {
            return Err(Error::InvalidEncoding)
        }

        let mut indexed = Vec::with_capacity(indexed_params.len());
        for (param, topic) in indexed_params.iter().zip(topics.iter()) {
            if is_reference_type(&param.ty) {
                indexed.push(IndexedValue::Hash(*topic));
            } else {
                let value = coder::decode_single(&param.ty, topic.as_slice())?;
                indexed.push(IndexedValue::Value(value));
            }
        }

        let body_types: Vec<DynSolType> =
            self.inputs.iter().filter(|p| !p.indexed).map(|p| p.ty.clone()).collect();
        let body = coder::decode_params(data, &body_types)?;

        Ok(DecodedEvent { indexed, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evmabi_primitives::{encode_hex_prefixed, Address};

    fn transfer_event() -> Event {
        Event::new(
            "Transfer",
            vec![
                EventParam { ty: DynSolType::Address, indexed: true },
                EventParam { ty: DynSolType::Address, indexed: true },
                EventParam { ty: DynSolType::Uint(256), indexed: false },
            ],
            false,
        )
    }

    #[test]
    fn topic0_matches_known_signature() {
        let e = transfer_event();
        assert_eq!(e.signature(), "Transfer(address,address,uint256)");
        // keccak256("Transfer(address,address,uint256)")
        assert_eq!(
            encode_hex_prefixed(e.topic0().unwrap()),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn decode_log_splits_topics_and_data() {
        let e = transfer_event();
        let topic0 = e.topic0().unwrap();
        let from = Address::repeat_byte(0x11);
        let to = Address::repeat_byte(0x22);
        let from_topic = Event::encode_topic(&DynSolValue::Address(from));
        let to_topic = Event::encode_topic(&DynSolValue::Address(to));
        let amount = DynSolValue::Uint(evmabi_primitives::U256::from(100u64), 256);
        let data = coder::encode_params(&[amount.clone()]);

        let decoded = e.decode_log(&[topic0, from_topic, to_topic], &data).unwrap();
        assert_eq!(
            decoded.indexed,
            vec![IndexedValue::Value(DynSolValue::Address(from)), IndexedValue::Value(DynSolValue::Address(to))]
        );
        assert_eq!(decoded.body, vec![amount]);
    }

    #[test]
    fn indexed_reference_type_kept_as_hash() {
        let e = Event::new(
            "Logged",
            vec![EventParam { ty: DynSolType::String, indexed: true }],
            false,
        );
        let topic0 = e.topic0().unwrap();
        let value = DynSolValue::String(String::from("hello"));
        let topic = Event::encode_topic(&value);
        let decoded = e.decode_log(&[topic0, topic], &[]).unwrap();
        assert_eq!(decoded.indexed, vec![IndexedValue::Hash(topic)]);
    }
}
