use evmabi_eip712::{Eip712Domain, PropertyDef, Resolver, TypedData, Types};
use evmabi_primitives::U256;
use serde_json::json;

#[test]
fn mail_type_string_matches_known_fixture() {
    let mut types: Types = Types::new();
    types.insert(
        "Mail".to_string(),
        vec![
            PropertyDef::new("Person", "from"),
            PropertyDef::new("Person", "to"),
            PropertyDef::new("string", "contents"),
            PropertyDef::new("Header", "header"),
        ],
    );
    types.insert("Header".to_string(), vec![PropertyDef::new("string", "header")]);
    types.insert(
        "Person".to_string(),
        vec![PropertyDef::new("address", "wallet"), PropertyDef::new("string", "name")],
    );

    let mut resolver = Resolver::default();
    resolver.ingest_types(&types);

    assert_eq!(
        resolver.encode_type("Mail").unwrap(),
        "Mail(Person from,Person to,string contents,Header header)Header(string header)Person(address wallet,string name)"
    );
}

#[test]
fn domain_only_typed_data_matches_known_signing_hash() {
    let data = TypedData {
        domain: Eip712Domain {
            name: Some("TestDApp".to_string()),
            version: Some("1.0".to_string()),
            chain_id: Some(U256::from(1u64)),
            ..Default::default()
        },
        types: Types::new(),
        primary_type: "EIP712Domain".to_string(),
        message: Default::default(),
    };

    assert_eq!(
        evmabi_primitives::encode_hex_prefixed(data.domain_separator()),
        "0xc2f8787176b8ac6bf7215b4adcc1e069bf4ab82d9ab1df05a57a91d425935b6e"
    );
}

#[test]
fn person_message_resolves_and_hashes_through_the_public_api() {
    let mut types = Types::new();
    types.insert(
        "Person".to_string(),
        vec![PropertyDef::new("address", "wallet"), PropertyDef::new("string", "name")],
    );

    let data = TypedData {
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
    };

    let a = data.signing_hash().unwrap();
    let b = data.signing_hash().unwrap();
    assert_eq!(a, b);
    assert_ne!(a, data.domain_separator());
}

#[test]
fn stringified_payload_round_trips_to_the_same_signing_hash() {
    let mut types = Types::new();
    types.insert(
        "Person".to_string(),
        vec![PropertyDef::new("address", "wallet"), PropertyDef::new("string", "name")],
    );
    let data = TypedData {
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
    };

    let as_object = serde_json::to_value(&data).unwrap();
    let stringified = serde_json::Value::String(as_object.to_string());
    let parsed: TypedData = serde_json::from_value(stringified).unwrap();
    assert_eq!(parsed.signing_hash().unwrap(), data.signing_hash().unwrap());
}
