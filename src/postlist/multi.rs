// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One postlist over many shards.
//!
//! Each shard numbers its documents 1, 2, 3... independently. The composite
//! presents a single logical id space by interleaving:
//!
//! ```text
//! logical = (local - 1) * shard_count + shard_index + 1
//! ```
//!
//! Shard 0 of 2 owns logical ids 1, 3, 5...; shard 1 owns 2, 4, 6... The
//! mapping is injective (no two shards collide) and order-preserving within
//! a shard, so merging is just "advance whichever shard holds the minimum".
//! Logical ids are deliberately not dense - the gaps belong to the other
//! shards.
//!
//! Exactly one shard advances per `next()`: a tie across shards would
//! require two (shard, local) pairs mapping to one logical id, which the
//! interleaving rules out.

use crate::error::{precondition, Error, Result};
use crate::positions::PositionList;
use crate::types::DocId;

use super::{LeafPostList, PostList};

/// N per-shard posting lists behind the single-list interface.
pub struct MultiPostList {
    shards: Vec<LeafPostList>,
    started: bool,
    /// Index of the shard holding the minimum logical docid, when positioned.
    current: Option<usize>,
    /// Cached max over non-exhausted shards; recomputed only when a shard
    /// is exhausted, so it never grows.
    max_weight: f64,
}

impl MultiPostList {
    /// Compose one leaf list per shard, in shard-index order.
    pub fn new(shards: Vec<LeafPostList>) -> Result<Self> {
        if shards.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot compose a postlist over zero shards".to_string(),
            ));
        }
        let max_weight = shards
            .iter()
            .map(LeafPostList::max_weight)
            .fold(0.0, f64::max);
        Ok(MultiPostList {
            shards,
            started: false,
            current: None,
            max_weight,
        })
    }

    fn shard_count(&self) -> u32 {
        self.shards.len() as u32
    }

    /// Map a shard-local docid into the logical space.
    fn logical_docid(&self, local: DocId, shard_index: usize) -> Result<DocId> {
        let logical = u64::from(local.get() - 1) * u64::from(self.shard_count())
            + shard_index as u64
            + 1;
        u32::try_from(logical).ok().and_then(DocId::new).ok_or_else(|| {
            Error::InvalidArgument(format!("logical docid {} overflows id space", logical))
        })
    }

    /// Smallest local docid in `shard_index` whose logical id is >= `did`.
    fn local_target(&self, did: DocId, shard_index: usize) -> DocId {
        let n = u64::from(self.shard_count());
        let t = u64::from(did.get()) - 1;
        let s = shard_index as u64;
        let local = if t <= s { 1 } else { (t - s).div_ceil(n) + 1 };
        // local <= did, so it fits.
        DocId::new(local as u32).unwrap_or(DocId::MIN)
    }

    /// Recompute which shard holds the minimum logical docid.
    fn select_current(&mut self) -> Result<()> {
        let mut best: Option<(DocId, usize)> = None;
        for (index, shard) in self.shards.iter().enumerate() {
            if shard.at_end() {
                continue;
            }
            let logical = self.logical_docid(shard.docid()?, index)?;
            match best {
                Some((min, _)) => {
                    // Collisions are impossible by injectivity; equality here
                    // would mean shard data violated its id-space contract.
                    debug_assert_ne!(logical, min, "logical docid collision across shards");
                    if logical < min {
                        best = Some((logical, index));
                    }
                }
                None => best = Some((logical, index)),
            }
        }
        self.current = best.map(|(_, index)| index);
        Ok(())
    }

    fn recompute_max_weight(&mut self) {
        self.max_weight = self
            .shards
            .iter()
            .filter(|shard| !shard.at_end())
            .map(|shard| shard.max_weight())
            .fold(0.0, f64::max);
    }

    fn current_shard(&self) -> Result<&LeafPostList> {
        match self.current {
            Some(index) => Ok(&self.shards[index]),
            None if self.started => Err(precondition("postlist accessed after end")),
            None => Err(precondition("postlist accessed before first advance")),
        }
    }
}

impl PostList for MultiPostList {
    /// Exact: every shard's termfreq is exact, so the sum is too.
    fn termfreq(&self) -> u32 {
        self.shards.iter().map(LeafPostList::termfreq).sum()
    }

    fn docid(&self) -> Result<DocId> {
        match self.current {
            Some(index) => self.logical_docid(self.shards[index].docid()?, index),
            None if self.started => Err(precondition("postlist accessed after end")),
            None => Err(precondition("postlist accessed before first advance")),
        }
    }

    fn wdf(&self) -> Result<u32> {
        self.current_shard()?.wdf()
    }

    fn weight(&self) -> Result<f64> {
        self.current_shard()?.weight()
    }

    fn max_weight(&self) -> f64 {
        self.max_weight
    }

    fn next(&mut self, w_min: f64) -> Result<()> {
        if self.started {
            let index = match self.current {
                Some(index) => index,
                None => return Err(precondition("next() after end of postlist")),
            };
            self.shards[index].next(w_min)?;
            if self.shards[index].at_end() {
                self.recompute_max_weight();
            }
        } else {
            // Unpositioned shards rank "smaller than everything": the first
            // composite advance positions every shard once.
            for shard in &mut self.shards {
                shard.next(w_min)?;
            }
            self.started = true;
            if self.shards.iter().any(LeafPostList::at_end) {
                self.recompute_max_weight();
            }
        }
        self.select_current()
    }

    fn skip_to(&mut self, did: DocId, w_min: f64) -> Result<()> {
        if self.started && self.current.is_none() {
            return Err(precondition("skip_to() after end of postlist"));
        }
        if self.started {
            if let Some(index) = self.current {
                if self.logical_docid(self.shards[index].docid()?, index)? >= did {
                    // Forward-only: target already reached or passed.
                    return Ok(());
                }
            }
        }
        let had_ended: Vec<bool> = self.shards.iter().map(LeafPostList::at_end).collect();
        for index in 0..self.shards.len() {
            if had_ended[index] {
                continue;
            }
            let local = self.local_target(did, index);
            self.shards[index].skip_to(local, w_min)?;
        }
        self.started = true;
        if self
            .shards
            .iter()
            .zip(&had_ended)
            .any(|(shard, &ended)| shard.at_end() && !ended)
        {
            self.recompute_max_weight();
        }
        self.select_current()
    }

    fn at_end(&self) -> bool {
        self.started && self.current.is_none()
    }

    fn position_list(&self) -> Result<PositionList> {
        self.current_shard()?.position_list()
    }
}
