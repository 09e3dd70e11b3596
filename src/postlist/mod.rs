// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list iterators: one term's documents, in docid order.
//!
//! The trait is a flat capability interface - no iterator adapters, no
//! inheritance chains. A [`LeafPostList`] walks one term within one shard;
//! a [`MultiPostList`] composes one leaf per shard behind the same trait,
//! translating shard-local docids into one logical id space. Query operator
//! trees (AND/OR/phrase) compose further, outside this crate, against the
//! same trait.
//!
//! # State machine
//!
//! ```text
//! BEFORE_START --first next()/skip_to()--> POSITIONED --past last--> AT_END
//! ```
//!
//! A fresh list is *before* its first entry: accessors like
//! [`docid`](PostList::docid) are precondition errors until the first
//! advance. `AT_END` is terminal - advancing again is a precondition error,
//! not a quiet no-op.

mod leaf;
mod multi;

pub use leaf::LeafPostList;
pub use multi::MultiPostList;

use crate::error::Result;
use crate::positions::PositionList;
use crate::types::DocId;

/// Iterator over the documents containing a term, in increasing docid order.
pub trait PostList {
    /// Exact number of documents this list will yield. O(1), precomputed.
    fn termfreq(&self) -> u32;

    /// The current document id. Precondition error unless positioned.
    fn docid(&self) -> Result<DocId>;

    /// Within-document frequency at the current document.
    fn wdf(&self) -> Result<u32>;

    /// Weight contribution of the current document.
    fn weight(&self) -> Result<f64>;

    /// Upper bound on [`weight`](PostList::weight) for the current position
    /// onward. Callable in any state - before the first advance it is the
    /// global bound for the whole list. May tighten as the list advances;
    /// never understates.
    fn max_weight(&self) -> f64;

    /// Advance to the next document.
    ///
    /// `w_min` is a hint: the smallest weight the caller still cares about.
    /// Implementations *may* use it to skip documents provably below the
    /// threshold, and may equally ignore it.
    fn next(&mut self, w_min: f64) -> Result<()>;

    /// Advance to the first document with id >= `did`.
    ///
    /// Forward-only by contract: if the cursor is already at or past `did`,
    /// this is a documented no-op - not an error, and never a move
    /// backward.
    fn skip_to(&mut self, did: DocId, w_min: f64) -> Result<()>;

    /// True once iteration has moved past the last document.
    fn at_end(&self) -> bool;

    /// Open a position cursor for the term in the current document.
    fn position_list(&self) -> Result<PositionList>;
}
