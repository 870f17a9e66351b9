use compress::{CompressionBackend, Compressor};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_i64_roundtrip(values in prop::collection::vec(any::<i64>(), 0..200)) {
        let compressor = Compressor::with_backend(CompressionBackend::Miniz).unwrap();
        let packed = compressor.compress_i64s(&values).unwrap();
        prop_assert_eq!(compressor.decompress_i64s(&packed, values.len()).unwrap(), values);
    }

    #[test]
    fn prop_blob_roundtrip(
        blobs in prop::collection::vec(prop::option::of(prop::collection::vec(any::<u8>(), 0..24)), 0..40)
    ) {
        let compressor = Compressor::default();
        let packed = compressor.compress_blobs(&blobs).unwrap();
        let decoded = compressor.decompress_blobs(&packed, blobs.len()).unwrap();
        let expected: Vec<Vec<u8>> = blobs.into_iter().map(Option::unwrap_or_default).collect();
        prop_assert_eq!(decoded, expected);
    }

    #[test]
    fn prop_garbage_never_panics(data in prop::collection::vec(any::<u8>(), 0..64), len in 0usize..16) {
        let compressor = Compressor::default();
        let _ = compressor.decompress_i64s(&data, len);
        let _ = compressor.decompress_blobs(&data, len);
    }
}
