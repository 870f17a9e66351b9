#![no_main]

use codec::Replica;
use compress::Compressor;
use libfuzzer_sys::fuzz_target;
use wire::{Limits, MessageCodec};

fuzz_target!(|data: &[u8]| {
    let codec = MessageCodec::new(Compressor::default(), Limits::for_testing());
    let mut replica = Replica::new();
    let mut idx = 0usize;
    while idx < data.len() {
        let len = (data[idx] as usize % 200).saturating_add(1);
        idx += 1;
        let end = (idx + len).min(data.len());
        let _ = replica.receive(&codec, &data[idx..end]);
        idx = end;
    }
});
