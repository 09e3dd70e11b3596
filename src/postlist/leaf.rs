// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Posting list for one term within one shard.
//!
//! The storage layer hands over the full entry vector for the term (sorted
//! by local docid) plus the precomputed exact statistics; this cursor walks
//! it. Position payloads stay encoded until [`position_list`] is called -
//! most matches never look at positions, and decoding them eagerly would
//! swamp the cost of everything else.
//!
//! [`position_list`]: crate::postlist::PostList::position_list

use crate::error::{precondition, Error, Result};
use crate::positions::PositionList;
use crate::types::{CollectionStats, DocId, PostingStat, RawPosting};
use crate::weight::Weight;

use super::PostList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeStart,
    At(usize),
    AtEnd,
}

/// Iterates (docid, wdf, positions) for one term within one shard.
///
/// Owns an optional weighting scheme; without one, every weight is 0 and
/// the list behaves as a pure boolean source.
pub struct LeafPostList {
    stat: PostingStat,
    entries: Vec<RawPosting>,
    cursor: Cursor,
    scheme: Option<Box<dyn Weight>>,
    max_weight: f64,
}

impl LeafPostList {
    /// Build a leaf list, validating what the storage layer claims.
    ///
    /// Entries must be sorted by strictly increasing docid, and the exact
    /// statistics must agree with the entries - a mismatch means the shard
    /// data and its stats were produced from different states.
    pub fn new(stat: PostingStat, entries: Vec<RawPosting>) -> Result<Self> {
        if stat.termfreq as usize != entries.len() {
            return Err(Error::InvalidArgument(format!(
                "termfreq {} disagrees with {} entries",
                stat.termfreq,
                entries.len()
            )));
        }
        if entries.windows(2).any(|w| w[0].docid >= w[1].docid) {
            return Err(Error::InvalidArgument(
                "postings must be sorted by strictly increasing docid".to_string(),
            ));
        }
        let wdf_total: u64 = entries.iter().map(|e| u64::from(e.wdf)).sum();
        if wdf_total != stat.collection_freq {
            return Err(Error::InvalidArgument(format!(
                "collection_freq {} disagrees with summed wdf {}",
                stat.collection_freq, wdf_total
            )));
        }
        Ok(LeafPostList {
            stat,
            entries,
            cursor: Cursor::BeforeStart,
            scheme: None,
            max_weight: 0.0,
        })
    }

    /// Attach and initialise a weighting scheme.
    ///
    /// The global weight bound is fixed here, before any document is
    /// visited - the matcher reads it to size up the query a priori.
    pub fn attach_weight(
        &mut self,
        mut scheme: Box<dyn Weight>,
        factor: f64,
        stats: &CollectionStats,
    ) {
        scheme.init(factor, stats);
        self.max_weight = scheme.max_part() + scheme.max_extra();
        self.scheme = Some(scheme);
    }

    /// Exact collection frequency (summed wdf) for this term in this shard.
    pub fn collection_freq(&self) -> u64 {
        self.stat.collection_freq
    }

    fn current(&self) -> Result<&RawPosting> {
        match self.cursor {
            Cursor::At(index) => Ok(&self.entries[index]),
            Cursor::BeforeStart => Err(precondition("postlist accessed before first advance")),
            Cursor::AtEnd => Err(precondition("postlist accessed after end")),
        }
    }
}

impl PostList for LeafPostList {
    fn termfreq(&self) -> u32 {
        self.stat.termfreq
    }

    fn docid(&self) -> Result<DocId> {
        Ok(self.current()?.docid)
    }

    fn wdf(&self) -> Result<u32> {
        Ok(self.current()?.wdf)
    }

    fn weight(&self) -> Result<f64> {
        let entry = self.current()?;
        match &self.scheme {
            Some(scheme) => Ok(scheme.sum_part(entry.wdf, entry.doclen, entry.unique_terms)
                + scheme.sum_extra(entry.doclen, entry.unique_terms)),
            None => Ok(0.0),
        }
    }

    fn max_weight(&self) -> f64 {
        self.max_weight
    }

    // The w_min hint is accepted but unused at the leaf: a leaf has no
    // per-entry bound cheaper than computing the weight itself.
    fn next(&mut self, _w_min: f64) -> Result<()> {
        self.cursor = match self.cursor {
            Cursor::BeforeStart if self.entries.is_empty() => Cursor::AtEnd,
            Cursor::BeforeStart => Cursor::At(0),
            Cursor::At(index) if index + 1 < self.entries.len() => Cursor::At(index + 1),
            Cursor::At(_) => Cursor::AtEnd,
            Cursor::AtEnd => return Err(precondition("next() after end of postlist")),
        };
        Ok(())
    }

    fn skip_to(&mut self, did: DocId, _w_min: f64) -> Result<()> {
        let from = match self.cursor {
            Cursor::BeforeStart => 0,
            Cursor::At(index) => {
                if self.entries[index].docid >= did {
                    // Forward-only: target already reached or passed.
                    return Ok(());
                }
                index + 1
            }
            Cursor::AtEnd => return Err(precondition("skip_to() after end of postlist")),
        };
        let offset = self.entries[from..].partition_point(|e| e.docid < did);
        self.cursor = if from + offset < self.entries.len() {
            Cursor::At(from + offset)
        } else {
            Cursor::AtEnd
        };
        Ok(())
    }

    fn at_end(&self) -> bool {
        self.cursor == Cursor::AtEnd
    }

    fn position_list(&self) -> Result<PositionList> {
        PositionList::decode(&self.current()?.positions)
    }
}
