//! Bound soundness: no scheme may ever score above its promised maximum.

use proptest::prelude::*;
use quern::{BoolWeight, CollectionStats, CoordWeight, DiceCoeffWeight, Weight};

/// Collection stats plus a generator for documents consistent with them.
fn stats_strategy() -> impl Strategy<Value = CollectionStats> {
    (
        1u32..100_000,
        1u32..200,
        1u32..50,
        1u32..100,
    )
        .prop_map(|(doc_count, doclen_lower, unique_lower, query_length)| CollectionStats {
            doc_count,
            doclen_lower_bound: doclen_lower,
            doclen_upper_bound: doclen_lower.saturating_mul(100),
            wdf_upper_bound: doclen_lower.saturating_mul(100),
            query_length,
            unique_terms_lower_bound: unique_lower,
        })
}

proptest! {
    #[test]
    fn prop_sum_part_never_exceeds_max_part(
        stats in stats_strategy(),
        factor in 0.0f64..100.0,
        wdf_excess in 0u32..1000,
        doclen_excess in 0u32..1000,
        unique_excess in 0u32..1000,
    ) {
        // Documents at least as long and as term-diverse as the collection
        // minima - anything the iteration could legally produce.
        let doclen = stats.doclen_lower_bound.saturating_add(doclen_excess);
        let unique = stats.unique_terms_lower_bound.saturating_add(unique_excess);
        let wdf = 1u32.saturating_add(wdf_excess);

        let schemes: Vec<Box<dyn Weight>> = vec![
            Box::new(BoolWeight::new()),
            Box::new(CoordWeight::new()),
            Box::new(DiceCoeffWeight::new()),
        ];
        for mut scheme in schemes {
            scheme.init(factor, &stats);
            let part = scheme.sum_part(wdf, doclen, unique);
            prop_assert!(
                part <= scheme.max_part(),
                "{}: sum_part {} > max_part {}",
                scheme.name(),
                part,
                scheme.max_part()
            );
            let extra = scheme.sum_extra(doclen, unique);
            prop_assert!(extra <= scheme.max_extra() || scheme.max_extra() == 0.0 && extra == 0.0);
        }
    }

    #[test]
    fn prop_dice_bound_reached_at_collection_minimum(
        query_length in 1u32..50,
        unique_lower in 1u32..100,
    ) {
        let stats = CollectionStats {
            unique_terms_lower_bound: unique_lower,
            query_length,
            ..CollectionStats::unknown(query_length)
        };
        let mut scheme = DiceCoeffWeight::new();
        scheme.init(1.0, &stats);
        // A document sitting exactly at the collection minimum attains the
        // bound: it is tight, not merely sound.
        prop_assert_eq!(scheme.sum_part(1, unique_lower, unique_lower), scheme.max_part());
    }
}
