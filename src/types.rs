// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the retrieval core.
//!
//! These types define what flows between the storage layer, the posting
//! iterators, and the matcher. The storage layer hands us raw postings; we
//! hand back ranked documents. Everything in between stays inside the crate.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **DocId**: always >= 1. Zero is not a document. A shard's local ids are
//!   densely packed from 1; logical ids across shards are interleaved and
//!   deliberately *not* dense.
//!
//! - **RawPosting**: entries for one term within one shard arrive sorted by
//!   strictly increasing docid. [`crate::postlist::LeafPostList`] validates
//!   this at construction rather than trusting the storage layer.
//!
//! - **PostingStat**: exact, immutable once the posting list is built.
//!   "Estimated" frequencies only exist in operator trees, which live
//!   outside this crate.

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES: Type-safe document identifiers
// =============================================================================

/// Type-safe document identifier, local to a shard or logical across shards.
///
/// Always >= 1. Prevents accidentally passing a count or an array index where
/// a document id is expected. Use [`DocId::new`] for validated construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(u32);

impl DocId {
    /// Create a new DocId. Returns `None` for 0, which is not a valid id.
    #[inline]
    pub fn new(id: u32) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(DocId(id))
        }
    }

    /// Smallest valid document id.
    pub const MIN: DocId = DocId(1);

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PER-TERM STATISTICS
// =============================================================================

/// Exact per-term, per-shard statistics.
///
/// Immutable once the owning posting list is constructed. `termfreq` is the
/// number of documents containing the term; `collection_freq` is the wdf
/// summed over those documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingStat {
    pub termfreq: u32,
    pub collection_freq: u64,
}

// =============================================================================
// COLLECTION STATISTICS
// =============================================================================

/// Collection-level statistics a weighting scheme may need at init time.
///
/// The lower bounds are the load-bearing fields: a scheme with a
/// reciprocal-length term must bound its weight using the *shortest possible*
/// document, because shorter documents can always turn up later in iteration.
/// Bounds here must hold across every shard the query touches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Total documents across all shards.
    pub doc_count: u32,
    /// Length (in term occurrences) of the shortest document.
    pub doclen_lower_bound: u32,
    /// Length of the longest document.
    pub doclen_upper_bound: u32,
    /// Largest within-document frequency of any term in any document.
    pub wdf_upper_bound: u32,
    /// Number of terms in the query being evaluated.
    pub query_length: u32,
    /// Smallest count of distinct terms in any document.
    pub unique_terms_lower_bound: u32,
}

impl CollectionStats {
    /// Conservative stats for a collection nothing is known about.
    ///
    /// Every bound degenerates to the weakest sound value, so weighting
    /// schemes stay correct (just less prunable).
    pub fn unknown(query_length: u32) -> Self {
        CollectionStats {
            doc_count: u32::MAX,
            doclen_lower_bound: 1,
            doclen_upper_bound: u32::MAX,
            wdf_upper_bound: u32::MAX,
            query_length,
            unique_terms_lower_bound: 1,
        }
    }
}

// =============================================================================
// STORAGE-LAYER INPUT
// =============================================================================

/// One term occurrence record, as handed over by the storage layer.
///
/// Per-document statistics travel with the posting rather than through a
/// shared lookup handle: the core is single-threaded pull iteration and has
/// no business holding references into the storage layer's tables. The
/// position payload stays encoded until somebody actually asks for positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosting {
    /// Shard-local document id.
    pub docid: DocId,
    /// Within-document frequency of the term.
    pub wdf: u32,
    /// Total term occurrences in the document.
    pub doclen: u32,
    /// Distinct terms in the document.
    pub unique_terms: u32,
    /// Encoded position data (see [`crate::positions`]); empty if the
    /// backend stores no positions for this term.
    pub positions: Vec<u8>,
}
