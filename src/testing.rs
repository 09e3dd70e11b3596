// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::positions::encode_positions;
use crate::postlist::LeafPostList;
use crate::types::{CollectionStats, DocId, PostingStat, RawPosting};
use crate::weight::Weight;

/// Build postings from `(docid, wdf)` pairs, with positionless payloads and
/// placeholder document statistics (`doclen = wdf`, one distinct term).
pub fn postings(pairs: &[(u32, u32)]) -> Vec<RawPosting> {
    pairs
        .iter()
        .map(|&(docid, wdf)| RawPosting {
            docid: DocId::new(docid).expect("test docid must be >= 1"),
            wdf,
            doclen: wdf,
            unique_terms: 1,
            positions: Vec::new(),
        })
        .collect()
}

/// Build postings from `(docid, wdf, doclen, unique_terms)` tuples.
pub fn postings_with_stats(rows: &[(u32, u32, u32, u32)]) -> Vec<RawPosting> {
    rows.iter()
        .map(|&(docid, wdf, doclen, unique_terms)| RawPosting {
            docid: DocId::new(docid).expect("test docid must be >= 1"),
            wdf,
            doclen,
            unique_terms,
            positions: Vec::new(),
        })
        .collect()
}

/// A single posting carrying an encoded position payload.
pub fn posting_with_positions(docid: u32, positions: &[u32]) -> RawPosting {
    RawPosting {
        docid: DocId::new(docid).expect("test docid must be >= 1"),
        wdf: positions.len() as u32,
        doclen: positions.len() as u32,
        unique_terms: 1,
        positions: encode_positions(positions).expect("test positions must encode"),
    }
}

/// Exact statistics matching a set of postings.
pub fn stat_for(entries: &[RawPosting]) -> PostingStat {
    PostingStat {
        termfreq: entries.len() as u32,
        collection_freq: entries.iter().map(|e| u64::from(e.wdf)).sum(),
    }
}

/// A leaf list over `entries` with no weighting scheme attached.
pub fn leaf(entries: Vec<RawPosting>) -> LeafPostList {
    LeafPostList::new(stat_for(&entries), entries).expect("test postings must be valid")
}

/// A leaf list with a weighting scheme attached and initialised.
pub fn leaf_weighted(
    entries: Vec<RawPosting>,
    scheme: Box<dyn Weight>,
    factor: f64,
    stats: &CollectionStats,
) -> LeafPostList {
    let mut list = leaf(entries);
    list.attach_weight(scheme, factor, stats);
    list
}

/// Collection statistics derived from a set of postings, treating them as
/// the whole collection.
pub fn query_stats(entries: &[RawPosting], query_length: u32) -> CollectionStats {
    if entries.is_empty() {
        return CollectionStats::unknown(query_length);
    }
    CollectionStats {
        doc_count: entries.len() as u32,
        doclen_lower_bound: entries.iter().map(|e| e.doclen).min().unwrap_or(1).max(1),
        doclen_upper_bound: entries.iter().map(|e| e.doclen).max().unwrap_or(1).max(1),
        wdf_upper_bound: entries.iter().map(|e| e.wdf).max().unwrap_or(0),
        query_length,
        unique_terms_lower_bound: entries
            .iter()
            .map(|e| e.unique_terms)
            .min()
            .unwrap_or(1)
            .max(1),
    }
}
