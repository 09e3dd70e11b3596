// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Top-K selection over a weighted postlist.
//!
//! The matcher drives one composite postlist - whatever the query tree
//! evaluator produced - and keeps the K best documents in a min-heap keyed
//! by score. Two things make it fast without making it approximate:
//!
//! - Once the heap is full, its minimum is a floor. The postlist's
//!   [`max_weight`](crate::postlist::PostList::max_weight) may tighten as
//!   shards are exhausted; the moment it can't beat the floor, no remaining
//!   document can either, and the scan stops.
//! - The floor is passed down as the `w_min` hint on every advance, so
//!   composed iterators may skip work internally.
//!
//! Pruning is contingent on every weighting scheme's bound being sound.
//! Given that, the output is *identical* to an exhaustive scan - same set,
//! same order - which the tests check directly.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::postlist::PostList;
use crate::types::DocId;

// ============================================================================
// RESULT SET
// ============================================================================

/// One ranked result: a logical document id, its score, and the score
/// normalised against the best score seen in this match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub docid: DocId,
    pub weight: f64,
    /// `weight` as a percentage of [`MSet::max_attained`]; 100.0 for every
    /// entry when the match carries no weights (pure boolean).
    pub percent: f64,
}

/// The ranked output of a match, with the bookkeeping callers use to
/// interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MSet {
    /// Best-first: descending weight, ties broken by the ordering key.
    pub entries: Vec<ResultEntry>,
    /// Number of documents actually considered. A lower bound on the number
    /// of matches: pruning may have stopped the scan before the rest.
    pub matches_lower_bound: u32,
    /// A-priori upper bound on any document's weight, from the postlist.
    pub max_possible: f64,
    /// Greatest weight actually seen.
    pub max_attained: f64,
}

// ============================================================================
// HEAP PLUMBING
// ============================================================================

/// Heap item ordered so the *worst* candidate surfaces: lower weight first,
/// then larger tie-break key. `BinaryHeap` is a max-heap, so `Ord` is
/// inverted to make it behave as a min-heap over rank.
struct Candidate<K: Ord> {
    weight: f64,
    key: K,
    docid: DocId,
}

impl<K: Ord> PartialEq for Candidate<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for Candidate<K> {}

impl<K: Ord> PartialOrd for Candidate<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Candidate<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Worse rank = greater: lower weight, or equal weight and later key.
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.key.cmp(&other.key))
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Produce the `k` best (docid, score) pairs, ties broken by ascending
/// docid.
///
/// Because documents arrive in ascending docid order, a later document with
/// a weight *equal* to the heap floor can never displace an incumbent, so
/// the scan stops as soon as the postlist's bound sinks to the floor.
pub fn evaluate(postlist: &mut dyn PostList, k: usize) -> Result<MSet> {
    evaluate_inner(postlist, k, |docid| docid, true)
}

/// Like [`evaluate`], with a caller-supplied secondary ordering key.
///
/// The key only breaks ties between equal weights. A custom key may rank a
/// later document above an earlier equal-weight one, so the cutoff here is
/// strict: the scan continues while the bound still *equals* the floor.
pub fn evaluate_with<K, F>(postlist: &mut dyn PostList, k: usize, key: F) -> Result<MSet>
where
    K: Ord,
    F: Fn(DocId) -> K,
{
    evaluate_inner(postlist, k, key, false)
}

fn evaluate_inner<K, F>(
    postlist: &mut dyn PostList,
    k: usize,
    key: F,
    cutoff_at_equal: bool,
) -> Result<MSet>
where
    K: Ord,
    F: Fn(DocId) -> K,
{
    if k == 0 {
        return Err(Error::InvalidArgument(
            "cannot select a top-0 result set".to_string(),
        ));
    }

    let max_possible = postlist.max_weight();
    let mut heap: BinaryHeap<Candidate<K>> = BinaryHeap::with_capacity(k);
    let mut matches_lower_bound = 0u32;
    let mut max_attained = 0.0f64;

    loop {
        let floor = if heap.len() == k {
            heap.peek().map_or(0.0, |worst| worst.weight)
        } else {
            0.0
        };

        if heap.len() == k {
            let bound = postlist.max_weight();
            let beaten = if cutoff_at_equal {
                bound <= floor
            } else {
                bound < floor
            };
            if beaten {
                break;
            }
        }

        postlist.next(floor)?;
        if postlist.at_end() {
            break;
        }
        matches_lower_bound += 1;

        let docid = postlist.docid()?;
        let weight = postlist.weight()?;
        if weight > max_attained {
            max_attained = weight;
        }

        let candidate = Candidate {
            weight,
            key: key(docid),
            docid,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(worst) = heap.peek() {
            // `candidate < worst` means candidate ranks higher (Ord is
            // inverted for the heap).
            if candidate < *worst {
                heap.pop();
                heap.push(candidate);
            }
        }
    }

    // Heap pops worst-first; reverse into best-first order.
    let mut ranked: Vec<Candidate<K>> = Vec::with_capacity(heap.len());
    while let Some(item) = heap.pop() {
        ranked.push(item);
    }
    ranked.reverse();

    let entries = ranked
        .into_iter()
        .map(|item| ResultEntry {
            docid: item.docid,
            weight: item.weight,
            percent: if max_attained > 0.0 {
                item.weight / max_attained * 100.0
            } else {
                100.0
            },
        })
        .collect();

    Ok(MSet {
        entries,
        matches_lower_bound,
        max_possible,
        max_attained,
    })
}
