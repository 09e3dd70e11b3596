//! Bit-level codec behaviour at the public API boundary.

use quern::{BitReader, BitWriter, Error};

fn roundtrip(values: &[u32], lo: u32, hi: u32) -> Vec<u32> {
    let n = values.len();
    let mut framed = Vec::with_capacity(n + 2);
    framed.push(lo);
    framed.extend_from_slice(values);
    framed.push(hi);

    let mut writer = BitWriter::new();
    writer
        .encode_interpolative(&framed, 0, n + 1)
        .expect("encode");
    let mut reader = BitReader::new(writer.freeze());
    reader.decode_interpolative(0, n + 1, lo, hi);

    let mut out = Vec::new();
    while let Some(value) = reader.decode_interpolative_next().expect("decode") {
        out.push(value);
    }
    assert!(reader.check_all_gone(), "trailing payload after decode");
    // The final yielded value is the framing upper bound.
    assert_eq!(out.pop(), Some(hi));
    out
}

#[test]
fn test_known_sequence_roundtrips() {
    assert_eq!(roundtrip(&[5, 9, 20, 21], 1, 30), vec![5, 9, 20, 21]);
}

#[test]
fn test_empty_interior() {
    assert_eq!(roundtrip(&[], 1, 30), Vec::<u32>::new());
}

#[test]
fn test_dense_run_costs_zero_bits() {
    // When the bounds pin every interior value, nothing is written.
    let mut writer = BitWriter::new();
    let framed: Vec<u32> = (10..=20).collect();
    writer.encode_interpolative(&framed, 0, 10).expect("encode");
    assert!(writer.freeze().is_empty());
}

#[test]
fn test_truncated_stream_is_corrupt_not_panic() {
    let framed = [1u32, 500, 900, 1300, 2000];
    let mut writer = BitWriter::new();
    writer.encode_interpolative(&framed, 0, 4).expect("encode");
    let mut bytes = writer.freeze();
    assert!(!bytes.is_empty());
    bytes.truncate(bytes.len() - 1);

    let mut reader = BitReader::new(bytes);
    reader.decode_interpolative(0, 4, 1, 2000);
    let mut result = Ok(Some(0));
    while let Ok(Some(_)) = result {
        result = reader.decode_interpolative_next();
    }
    assert!(matches!(result, Err(Error::CorruptEncoding(_))));
}

#[test]
fn test_single_value_range() {
    // outof == 1 encodes in zero bits and decodes to zero.
    let mut writer = BitWriter::new();
    writer.encode(0, 1).expect("encode");
    let bytes = writer.freeze();
    assert!(bytes.is_empty());
    let mut reader = BitReader::new(bytes);
    assert_eq!(reader.decode(1).expect("decode"), 0);
    assert!(reader.check_all_gone());
}

#[test]
fn test_nonzero_padding_detected() {
    let mut writer = BitWriter::new();
    for _ in 0..3 {
        writer.encode(1, 3).expect("encode");
    }
    let bytes = writer.freeze();
    let mut reader = BitReader::new(bytes);
    for _ in 0..3 {
        reader.decode(3).expect("decode");
    }
    assert!(reader.check_all_gone());

    let mut writer = BitWriter::new();
    for _ in 0..3 {
        writer.encode(1, 3).expect("encode");
    }
    let mut bytes = writer.freeze();
    let last = bytes.len() - 1;
    bytes[last] |= 0x80;
    let mut reader = BitReader::new(bytes);
    for _ in 0..3 {
        reader.decode(3).expect("decode");
    }
    assert!(!reader.check_all_gone());
}
