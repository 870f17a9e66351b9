#![no_main]

use bitstream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 7;
        idx += 1;

        let _ = match op {
            0 => reader.read_varu64().map(drop),
            1 => reader.read_vari64().map(drop),
            2 => reader.read_varu32().map(drop),
            3 => reader.read_bytes().map(drop),
            4 => reader.read_string().map(drop),
            5 => reader.read_string_flagged().map(drop),
            _ => reader.read_bool_array().map(drop),
        };
    }
});
