use compress::{CompressionBackend, Compressor};
use wire::{
    decode_many, encode, CheckoutComponent, CheckoutState, ComponentEntry, ComponentId,
    ConnectUser, CustomMessage, DecodeError, ErrorMessage, InitialCheckout, LimitKind, Limits,
    Message, MessageCodec, SetUserComponents, StateEntry, StateId, StateUpdate, Tick,
    TickComponent, TickState, Warning,
};

fn sample_checkout() -> InitialCheckout {
    InitialCheckout {
        server_time: 1_700_000_000_123,
        indices_count: 3,
        components: vec![
            CheckoutComponent {
                id: ComponentId::new(1),
                values: vec![0, i64::MIN, i64::MAX],
                deltas: vec![-1, 1, 0],
            },
            CheckoutComponent {
                id: ComponentId::new(40_000),
                values: vec![9_007_199_254_740_991, -9_007_199_254_740_991, 42],
                deltas: vec![0, 0, 0],
            },
        ],
        states: vec![CheckoutState {
            id: StateId::new(2),
            values: vec![Some(b"alice".to_vec()), None, Some(vec![0, 255, 128])],
        }],
    }
}

fn sample_tick() -> Tick {
    Tick {
        server_time: 1_700_000_000_173,
        removed_indices: vec![2, 0],
        indices_count: 3,
        components: vec![TickComponent {
            id: ComponentId::new(1),
            delta_deltas: vec![5, -5, i64::MIN],
        }],
        states: vec![
            TickState {
                id: StateId::new(2),
                updates: vec![StateUpdate {
                    index: 1,
                    value: Some("héllo".as_bytes().to_vec()),
                }],
            },
            TickState {
                id: StateId::new(3),
                updates: Vec::new(),
            },
        ],
    }
}

fn every_message() -> Vec<Message> {
    vec![
        Message::ConnectUser(ConnectUser {
            token: String::new(),
            observer: true,
            components: Vec::new(),
            states: Vec::new(),
        }),
        Message::SetUserComponents(SetUserComponents {
            components: vec![ComponentEntry {
                id: ComponentId::new(7),
                value: -123_456_789,
            }],
            states: vec![StateEntry {
                id: StateId::new(1),
                value: Vec::new(),
            }],
        }),
        Message::Pong { sequence: u64::MAX },
        Message::ClientCustom(CustomMessage {
            kind: 0,
            payload: "{\"chat\":\"gg\"}".into(),
        }),
        Message::InitialCheckout(sample_checkout()),
        Message::UserIndex { index: u32::MAX },
        Message::Tick(sample_tick()),
        Message::Ping { sequence: 0 },
        Message::Warning(Warning {
            message: "tick budget exceeded".into(),
        }),
        Message::Error(ErrorMessage {
            message: "room closed".into(),
            retryable: false,
        }),
        Message::ServerCustom(CustomMessage {
            kind: 12,
            payload: "ünïcödé 🚀".into(),
        }),
        Message::ServerBroadcast(CustomMessage {
            kind: u32::MAX,
            payload: String::new(),
        }),
    ]
}

#[test]
fn every_message_roundtrips_alone() {
    for message in every_message() {
        let bytes = encode(&message).unwrap();
        assert_eq!(bytes[0], message.tag().raw());
        assert_eq!(decode_many(&bytes).unwrap(), vec![message]);
    }
}

#[test]
fn concatenated_messages_decode_in_order() {
    let messages = every_message();
    let codec = MessageCodec::default();
    let bytes = codec.encode_many(&messages).unwrap();
    assert_eq!(codec.decode_many(&bytes).unwrap(), messages);

    let mut joined = Vec::new();
    for message in &messages {
        joined.extend(encode(message).unwrap());
    }
    assert_eq!(joined, bytes);
}

#[test]
fn error_retryable_flag_roundtrips() {
    for retryable in [false, true] {
        let message = Message::Error(ErrorMessage {
            message: "server restarting".into(),
            retryable,
        });
        let bytes = encode(&message).unwrap();
        assert_eq!(decode_many(&bytes).unwrap(), vec![message]);
    }
}

#[test]
fn tick_decodes_across_backends() {
    let miniz = MessageCodec::new(
        Compressor::with_backend(CompressionBackend::Miniz).unwrap(),
        Limits::default(),
    );
    let passthrough = MessageCodec::new(
        Compressor::with_backend(CompressionBackend::Passthrough).unwrap(),
        Limits::default(),
    );
    let message = Message::Tick(sample_tick());

    let bytes = miniz.encode(&message).unwrap();
    let mut backends = vec![CompressionBackend::Miniz, CompressionBackend::PreferNative];
    if CompressionBackend::Flate2.is_available() {
        backends.push(CompressionBackend::Flate2);
    }
    for backend in backends {
        let codec = MessageCodec::new(Compressor::with_backend(backend).unwrap(), Limits::default());
        assert_eq!(codec.decode_many(&bytes).unwrap(), vec![message.clone()]);
    }

    let raw = passthrough.encode(&message).unwrap();
    assert_eq!(passthrough.decode_many(&raw).unwrap(), vec![message]);
}

#[test]
fn checkout_empty_state_blob_collapses_to_none() {
    let mut checkout = sample_checkout();
    checkout.states[0].values[0] = Some(Vec::new());
    let bytes = encode(&Message::InitialCheckout(checkout)).unwrap();
    let decoded = decode_many(&bytes).unwrap();
    let Message::InitialCheckout(decoded) = &decoded[0] else {
        panic!("expected checkout, got {decoded:?}");
    };
    assert_eq!(decoded.states[0].values[0], None);
}

#[test]
fn truncated_checkout_is_fatal() {
    let bytes = encode(&Message::InitialCheckout(sample_checkout())).unwrap();
    for cut in 1..bytes.len() {
        assert!(decode_many(&bytes[..cut]).is_err(), "cut at {cut}");
    }
}

#[test]
fn indices_count_over_limit_is_rejected() {
    let codec = MessageCodec::new(Compressor::default(), Limits::for_testing());
    let tick = Tick {
        server_time: 0,
        removed_indices: Vec::new(),
        indices_count: 65,
        components: Vec::new(),
        states: Vec::new(),
    };
    let bytes = MessageCodec::default()
        .encode(&Message::Tick(tick))
        .unwrap();
    let err = codec.decode_many(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::LimitsExceeded {
            kind: LimitKind::IndicesCount,
            limit: 64,
            actual: 65,
        }
    ));
}

#[test]
fn string_over_limit_is_rejected() {
    let codec = MessageCodec::new(Compressor::default(), Limits::for_testing());
    let bytes = encode(&Message::Warning(Warning {
        message: "x".repeat(300),
    }))
    .unwrap();
    let err = codec.decode_many(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::LimitsExceeded {
            kind: LimitKind::StringBytes,
            ..
        }
    ));
}

#[test]
fn corrupt_compressed_array_is_fatal() {
    // tick: time 0, no removals, one index, one component with a bogus stream
    let bytes = [6, 0, 0, 1, 1, 1, 4, 0xFF, 0xFF, 0xFF, 0xFF, 0];
    let err = decode_many(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Compress(_)));
}
