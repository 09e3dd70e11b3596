//! Round-trip properties of the bit-level and position codecs.

use proptest::prelude::*;
use quern::{encode_positions, BitReader, BitWriter, PositionList};

use crate::common::docids_from_gaps;

/// Strictly increasing 1-based positions, arbitrary gaps.
fn positions_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..500, 0..60).prop_map(|gaps| docids_from_gaps(&gaps))
}

/// `(value, outof)` pairs with value < outof.
fn bounded_values_strategy() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec(
        (1u64..1_000_000).prop_flat_map(|outof| (0..outof, Just(outof))),
        1..40,
    )
}

proptest! {
    #[test]
    fn prop_bounded_encode_roundtrips(pairs in bounded_values_strategy()) {
        let mut writer = BitWriter::new();
        for &(value, outof) in &pairs {
            writer.encode(value, outof).expect("encode");
        }
        let mut reader = BitReader::new(writer.freeze());
        for &(value, outof) in &pairs {
            prop_assert_eq!(reader.decode(outof).expect("decode"), value);
        }
        prop_assert!(reader.check_all_gone());
    }

    #[test]
    fn prop_interpolative_roundtrips(values in positions_strategy()) {
        prop_assume!(values.len() >= 2);
        let k = values.len() - 1;
        let mut writer = BitWriter::new();
        writer.encode_interpolative(&values, 0, k).expect("encode");
        let mut reader = BitReader::new(writer.freeze());
        reader.decode_interpolative(0, k, values[0], values[k]);

        let mut decoded = vec![values[0]];
        while let Some(value) = reader.decode_interpolative_next().expect("decode") {
            decoded.push(value);
        }
        prop_assert_eq!(decoded, values);
        prop_assert!(reader.check_all_gone());
    }

    #[test]
    fn prop_position_container_roundtrips(values in positions_strategy()) {
        let bytes = encode_positions(&values).expect("encode");
        let mut list = PositionList::decode(&bytes).expect("decode");
        prop_assert_eq!(list.approx_size() as usize, values.len());

        let mut decoded = Vec::new();
        while let Some(pos) = list.next().expect("next") {
            decoded.push(pos);
        }
        prop_assert_eq!(decoded, values);
        prop_assert!(list.at_end());
    }

    #[test]
    fn prop_position_skip_to_matches_linear_scan(
        values in positions_strategy(),
        target in 0u32..4000,
    ) {
        prop_assume!(!values.is_empty());
        let bytes = encode_positions(&values).expect("encode");
        let mut list = PositionList::decode(&bytes).expect("decode");
        let expected = values.iter().copied().find(|&p| p >= target);
        prop_assert_eq!(list.skip_to(target).expect("skip"), expected);
    }
}
