use evmabi_dyn_abi::{dispatch_error, DynSolType, DynSolValue, Error, ErrorDef, Event, EventParam, IndexedValue};
use evmabi_primitives::{Address, U256};

#[test]
fn function_call_round_trips_through_selector() {
    let f = evmabi_dyn_abi::Function::new(
        "swapExactTokensForTokens",
        vec![
            DynSolType::Uint(256),
            DynSolType::Uint(256),
            DynSolType::Array(Box::new(DynSolType::Address)),
            DynSolType::Address,
            DynSolType::Uint(256),
        ],
        vec![DynSolType::Array(Box::new(DynSolType::Uint(256)))],
    );
    assert_eq!(evmabi_primitives::encode_hex_prefixed(f.selector()), "0x38ed1739");

    let args = vec![
        DynSolValue::Uint(U256::from(1u64), 256),
        DynSolValue::Uint(U256::from(2u64), 256),
        DynSolValue::Array(vec![
            DynSolValue::Address(Address::repeat_byte(0x11)),
            DynSolValue::Address(Address::repeat_byte(0x22)),
        ]),
        DynSolValue::Address(Address::repeat_byte(0x33)),
        DynSolValue::Uint(U256::from(3u64), 256),
    ];
    let calldata = f.encode_call(&args);
    assert_eq!(&calldata[..4], f.selector().as_slice());
    assert_eq!(f.decode_call(&calldata).unwrap(), args);
}

#[test]
fn event_log_splits_indexed_reference_types_into_topic_hashes() {
    let event = Event::new(
        "Transfer",
        vec![
            EventParam { ty: DynSolType::Address, indexed: true },
            EventParam { ty: DynSolType::String, indexed: true },
            EventParam { ty: DynSolType::Uint(256), indexed: false },
        ],
        false,
    );

    let from = DynSolValue::Address(Address::repeat_byte(0xaa));
    let label = DynSolValue::String("hello".to_string());
    let amount = DynSolValue::Uint(U256::from(42u64), 256);

    let from_topic = Event::encode_topic(&from);
    let label_topic = Event::encode_topic(&label);
    let topics = vec![event.topic0().unwrap(), from_topic, label_topic];
    let data = evmabi_dyn_abi::encode_params(&[amount.clone()]);

    let decoded = event.decode_log(&topics, &data).unwrap();
    assert_eq!(decoded.indexed[0], IndexedValue::Value(from));
    assert!(matches!(decoded.indexed[1], IndexedValue::Hash(h) if h == label_topic));
    assert_eq!(decoded.body, vec![amount]);
}

#[test]
fn dispatch_error_picks_the_matching_candidate_by_selector() {
    let insufficient_balance =
        ErrorDef::new("InsufficientBalance", vec![DynSolType::Uint(256), DynSolType::Uint(256)]);
    let unauthorized = ErrorDef::new("Unauthorized", vec![]);
    let candidates = vec![insufficient_balance.clone(), unauthorized];

    let args = vec![DynSolValue::Uint(U256::from(10u64), 256), DynSolValue::Uint(U256::from(3u64), 256)];
    let mut data = insufficient_balance.selector().to_vec();
    data.extend(evmabi_dyn_abi::encode_params(&args));

    let (matched, decoded) = dispatch_error(&candidates, &data).unwrap();
    assert_eq!(matched.name, "InsufficientBalance");
    assert_eq!(decoded, args);
}

#[test]
fn dispatch_error_rejects_data_with_no_matching_selector() {
    let candidates = vec![ErrorDef::new("Unauthorized", vec![])];
    let data = [0xde, 0xad, 0xbe, 0xef];
    assert_eq!(dispatch_error(&candidates, &data).unwrap_err(), Error::UnknownFunctionOrError);
}
