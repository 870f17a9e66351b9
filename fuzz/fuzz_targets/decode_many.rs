#![no_main]

use compress::Compressor;
use libfuzzer_sys::fuzz_target;
use wire::{Limits, MessageCodec};

fuzz_target!(|data: &[u8]| {
    let codec = MessageCodec::new(Compressor::default(), Limits::for_testing());
    if let Ok(messages) = codec.decode_many(data) {
        // Anything that decodes must re-encode to bytes that decode the same.
        let bytes = codec.encode_many(&messages).expect("re-encode decoded messages");
        let again = MessageCodec::new(Compressor::default(), Limits::unlimited())
            .decode_many(&bytes)
            .expect("decode re-encoded messages");
        assert_eq!(again, messages);
    }
});
