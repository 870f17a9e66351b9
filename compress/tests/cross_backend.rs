use compress::{CompressError, CompressionBackend, CompressionConfig, Compressor};

fn extreme_values() -> Vec<i64> {
    vec![
        0,
        1,
        -1,
        42,
        -42,
        1 << 31,
        -(1 << 31),
        (1 << 53) - 1,
        -((1 << 53) - 1),
        i64::MAX,
        i64::MIN + 1,
        i64::MIN,
    ]
}

fn blobs() -> Vec<Option<Vec<u8>>> {
    vec![
        Some(b"state1".to_vec()),
        None,
        Some(Vec::new()),
        Some((0..=255).collect()),
        None,
        Some("🙂 name".as_bytes().to_vec()),
    ]
}

fn expected_blobs() -> Vec<Vec<u8>> {
    blobs().into_iter().map(Option::unwrap_or_default).collect()
}

fn deflate_backends() -> Vec<Compressor> {
    let mut backends = vec![Compressor::with_backend(CompressionBackend::Miniz).unwrap()];
    if CompressionBackend::Flate2.is_available() {
        backends.push(Compressor::with_backend(CompressionBackend::Flate2).unwrap());
    }
    backends.push(Compressor::with_backend(CompressionBackend::PreferNative).unwrap());
    backends
}

#[test]
fn integer_arrays_cross_decompress() {
    let values = extreme_values();
    for producer in deflate_backends() {
        let packed = producer.compress_i64s(&values).unwrap();
        for consumer in deflate_backends() {
            let decoded = consumer.decompress_i64s(&packed, values.len()).unwrap();
            assert_eq!(
                decoded,
                values,
                "{:?} -> {:?}",
                producer.backend(),
                consumer.backend()
            );
        }
    }
}

#[test]
fn blob_arrays_cross_decompress() {
    let input = blobs();
    let expected = expected_blobs();
    for producer in deflate_backends() {
        let packed = producer.compress_blobs(&input).unwrap();
        for consumer in deflate_backends() {
            let decoded = consumer.decompress_blobs(&packed, input.len()).unwrap();
            assert_eq!(
                decoded,
                expected,
                "{:?} -> {:?}",
                producer.backend(),
                consumer.backend()
            );
        }
    }
}

#[test]
fn corrupt_stream_is_fatal_for_every_backend() {
    let corrupt = [0xFFu8, 0xFF, 0xFF, 0xFF];
    for consumer in deflate_backends() {
        let err = consumer.decompress_i64s(&corrupt, 1).unwrap_err();
        assert!(
            matches!(err, CompressError::Inflate { .. } | CompressError::Payload(_)),
            "{:?}: {err:?}",
            consumer.backend()
        );
    }
}

#[test]
fn passthrough_roundtrip() {
    let compressor = Compressor::with_backend(CompressionBackend::Passthrough).unwrap();
    let values = extreme_values();
    let packed = compressor.compress_i64s(&values).unwrap();
    assert_eq!(
        compressor.decompress_i64s(&packed, values.len()).unwrap(),
        values
    );
}

#[test]
fn unbounded_inflate_limit_decodes_on_every_backend() {
    let mut backends = vec![
        CompressionBackend::Miniz,
        CompressionBackend::PreferNative,
        CompressionBackend::Passthrough,
    ];
    if CompressionBackend::Flate2.is_available() {
        backends.push(CompressionBackend::Flate2);
    }
    let values = extreme_values();
    let input = blobs();
    for backend in backends {
        let compressor = Compressor::new(&CompressionConfig {
            max_inflated_bytes: usize::MAX,
            ..CompressionConfig::with_backend(backend)
        })
        .unwrap();
        assert_eq!(compressor.max_inflated_bytes(), usize::MAX);

        let packed = compressor.compress_i64s(&values).unwrap();
        assert_eq!(
            compressor.decompress_i64s(&packed, values.len()).unwrap(),
            values,
            "{backend:?}"
        );
        let packed = compressor.compress_blobs(&input).unwrap();
        assert_eq!(
            compressor.decompress_blobs(&packed, input.len()).unwrap(),
            expected_blobs(),
            "{backend:?}"
        );
    }
}
