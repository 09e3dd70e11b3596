// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dice coefficient similarity between the query and a document.
//!
//! Dice measures the overlap of two sets: `2|A ∩ B| / (|A| + |B|)`. Spread
//! over matching terms, each one contributes `2 / (Q + U)` where Q is the
//! query length and U the document's distinct-term count.
//!
//! The interesting part is the bound. `sum_part` has U in the denominator,
//! so its maximum comes from the *smallest possible* U in the collection -
//! which must be taken from the collection statistics at init time, not
//! tracked from documents seen during the match. The match visits documents
//! in docid order, and the shortest document may well be the last one.

use crate::error::Result;
use crate::types::CollectionStats;

use super::{unserialise_f64, Weight};

/// Dice coefficient scheme with an analytic upper bound.
#[derive(Debug, Clone)]
pub struct DiceCoeffWeight {
    factor: f64,
    query_length: f64,
    upper_bound: f64,
}

impl DiceCoeffWeight {
    pub fn new() -> Self {
        DiceCoeffWeight {
            factor: 1.0,
            query_length: 1.0,
            upper_bound: 1.0,
        }
    }
}

impl Default for DiceCoeffWeight {
    fn default() -> Self {
        DiceCoeffWeight::new()
    }
}

impl Weight for DiceCoeffWeight {
    fn init(&mut self, factor: f64, stats: &CollectionStats) {
        self.factor = factor;
        self.query_length = f64::from(stats.query_length.max(1));
        let fewest_unique = f64::from(stats.unique_terms_lower_bound.max(1));
        self.upper_bound = factor * 2.0 / (self.query_length + fewest_unique);
    }

    fn sum_part(&self, _wdf: u32, _doclen: u32, unique_terms: u32) -> f64 {
        self.factor * 2.0 / (self.query_length + f64::from(unique_terms.max(1)))
    }

    fn max_part(&self) -> f64 {
        self.upper_bound
    }

    fn sum_extra(&self, _doclen: u32, _unique_terms: u32) -> f64 {
        0.0
    }

    fn max_extra(&self) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "dicecoeff"
    }

    fn serialise(&self) -> Vec<u8> {
        self.factor.to_le_bytes().to_vec()
    }

    fn unserialise(&self, data: &[u8]) -> Result<Box<dyn Weight>> {
        let factor = unserialise_f64("dicecoeff", data)?;
        let mut scheme = DiceCoeffWeight::new();
        scheme.factor = factor;
        Ok(Box::new(scheme))
    }
}
