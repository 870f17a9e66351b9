use bitstream::{zigzag_encode, BitError, ByteReader, ByteWriter};

fn uvarint(value: u64) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    writer.write_varu64(value);
    writer.finish()
}

fn varint(value: i64) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    writer.write_vari64(value);
    writer.finish()
}

#[test]
fn unsigned_varint_vectors() {
    assert_eq!(uvarint(0), vec![0]);
    assert_eq!(uvarint(128), vec![128, 1]);
    assert_eq!(uvarint(173_573), vec![133, 204, 10]);
    assert_eq!(uvarint(268_435_455), vec![255, 255, 255, 127]);
}

#[test]
fn signed_varint_vectors() {
    assert_eq!(varint(0), vec![0]);
    assert_eq!(varint(1), vec![2]);
    assert_eq!(varint(-1), vec![1]);
    assert_eq!(varint(2_147_483_647), vec![254, 255, 255, 255, 15]);
    assert_eq!(varint(-2_147_483_648), vec![255, 255, 255, 255, 15]);
}

#[test]
fn safe_integer_range_matches_full_width() {
    // 2^53 - 1 is the largest value a double-based peer can carry exactly.
    let max_safe = (1i64 << 53) - 1;
    for value in [max_safe, -max_safe] {
        let bytes = varint(value);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_vari64().unwrap(), value);
        assert_eq!(bytes.len(), 8);
    }
}

#[test]
fn zigzag_partitions_sign_into_parity() {
    for value in -1000i64..1000 {
        let encoded = zigzag_encode(value);
        assert_eq!(encoded % 2 == 0, value >= 0, "value {value}");
    }
}

#[test]
fn strings_with_multibyte_characters() {
    let samples = [
        "",
        "plain ascii",
        "e\u{301}\u{302} combining",
        "日本語のテキスト",
        "mixed 🙂🚀 emoji",
    ];
    let mut writer = ByteWriter::new();
    for sample in samples {
        writer.write_string(sample);
    }
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    for sample in samples {
        assert_eq!(reader.read_string().unwrap(), sample);
    }
    assert!(reader.is_empty());
}

#[test]
fn flagged_strings_keep_flag() {
    let samples = [("", false), ("", true), ("retry later", true), ("🙂", false)];
    let mut writer = ByteWriter::new();
    for (text, flag) in samples {
        writer.write_string_flagged(text, flag);
    }
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    for (text, flag) in samples {
        assert_eq!(reader.read_string_flagged().unwrap(), (text.to_string(), flag));
    }
}

#[test]
fn bool_arrays_of_odd_lengths() {
    for len in [0usize, 1, 3, 7, 9, 15, 17] {
        let bits: Vec<bool> = (0..len).map(|idx| idx % 3 == 0 || idx % 5 == 1).collect();
        let mut writer = ByteWriter::new();
        writer.write_bool_array(&bits);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 1 + len.div_ceil(8), "len {len}");

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_bool_array().unwrap(), bits, "len {len}");
        assert!(reader.is_empty());
    }
}

#[test]
fn overlong_varint_is_fatal() {
    let bytes = [0x80u8; 16];
    let mut reader = ByteReader::new(&bytes);
    assert!(matches!(
        reader.read_varu64(),
        Err(BitError::InvalidVarint { offset: 0 })
    ));
}
