//! Ordering properties of leaf and multi-shard posting iteration.

use proptest::prelude::*;
use quern::testing::{leaf, postings};
use quern::{DocId, LeafPostList, MultiPostList, PostList};

use crate::common::{docids_from_gaps, interleave};

/// Up to 4 shards of strictly increasing local docids.
fn shards_strategy() -> impl Strategy<Value = Vec<Vec<u32>>> {
    prop::collection::vec(
        prop::collection::vec(0u32..50, 0..30).prop_map(|gaps| docids_from_gaps(&gaps)),
        1..4,
    )
}

fn compose(shards: &[Vec<u32>]) -> MultiPostList {
    let leaves: Vec<LeafPostList> = shards
        .iter()
        .map(|ids| {
            let pairs: Vec<(u32, u32)> = ids.iter().map(|&d| (d, 1)).collect();
            leaf(postings(&pairs))
        })
        .collect();
    MultiPostList::new(leaves).expect("compose")
}

/// The logical ids the composite should yield, by explicit model.
fn model_merge(shards: &[Vec<u32>]) -> Vec<u32> {
    let n = shards.len() as u32;
    let mut logical: Vec<u32> = shards
        .iter()
        .enumerate()
        .flat_map(|(index, ids)| {
            ids.iter()
                .map(move |&local| interleave(local, index as u32, n))
        })
        .collect();
    logical.sort_unstable();
    logical
}

proptest! {
    #[test]
    fn prop_iteration_yields_model_merge_in_order(shards in shards_strategy()) {
        let expected = model_merge(&shards);
        let mut list = compose(&shards);
        prop_assert_eq!(list.termfreq() as usize, expected.len());

        let mut seen = Vec::new();
        list.next(0.0).expect("next");
        while !list.at_end() {
            seen.push(list.docid().expect("docid").get());
            list.next(0.0).expect("next");
        }
        prop_assert!(seen.windows(2).all(|w| w[0] < w[1]), "docids not strictly increasing");
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_skip_to_lands_on_first_docid_at_or_past_target(
        shards in shards_strategy(),
        target in 1u32..200,
    ) {
        let expected = model_merge(&shards)
            .into_iter()
            .find(|&d| d >= target);
        let mut list = compose(&shards);
        list.skip_to(DocId::new(target).expect("docid"), 0.0).expect("skip");
        let landed = if list.at_end() {
            None
        } else {
            Some(list.docid().expect("docid").get())
        };
        prop_assert_eq!(landed, expected);
    }

    #[test]
    fn prop_alternating_next_and_skip_stays_monotonic(
        shards in shards_strategy(),
        targets in prop::collection::vec(1u32..200, 1..10),
    ) {
        let mut list = compose(&shards);
        let mut last: Option<u32> = None;
        for &target in &targets {
            if list.at_end() {
                break;
            }
            list.skip_to(DocId::new(target).expect("docid"), 0.0).expect("skip");
            if list.at_end() {
                break;
            }
            let here = list.docid().expect("docid").get();
            if let Some(previous) = last {
                prop_assert!(here >= previous, "cursor moved backward");
            }
            last = Some(here);
            list.next(0.0).expect("next");
        }
    }
}
