// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Coordinate matching: one point per matching term.
//!
//! See "Managing Gigabytes", 2nd edition p181. A document matching three of
//! four query terms scores three (times the factor). The bound is tight -
//! `sum_part == max_part` - so coordinate matching never inhibits pruning.

use crate::error::Result;
use crate::types::CollectionStats;

use super::{unserialise_f64, Weight};

/// Scores a fixed `factor` for every matching term.
#[derive(Debug, Clone)]
pub struct CoordWeight {
    factor: f64,
}

impl CoordWeight {
    pub fn new() -> Self {
        CoordWeight { factor: 1.0 }
    }
}

impl Default for CoordWeight {
    fn default() -> Self {
        CoordWeight::new()
    }
}

impl Weight for CoordWeight {
    fn init(&mut self, factor: f64, _stats: &CollectionStats) {
        self.factor = factor;
    }

    fn sum_part(&self, _wdf: u32, _doclen: u32, _unique_terms: u32) -> f64 {
        // Presence is what counts; the posting list only yields documents
        // that match.
        self.factor
    }

    fn max_part(&self) -> f64 {
        self.factor
    }

    fn sum_extra(&self, _doclen: u32, _unique_terms: u32) -> f64 {
        0.0
    }

    fn max_extra(&self) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "coord"
    }

    fn serialise(&self) -> Vec<u8> {
        self.factor.to_le_bytes().to_vec()
    }

    fn unserialise(&self, data: &[u8]) -> Result<Box<dyn Weight>> {
        let factor = unserialise_f64("coord", data)?;
        Ok(Box::new(CoordWeight { factor }))
    }
}
