// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pure boolean retrieval: every part is exactly zero.

use crate::error::Result;
use crate::types::CollectionStats;

use super::Weight;

/// Contributes nothing to any score. Used when the caller wants set
/// membership, not ranking. Trivially sound: sum and bound are both zero.
#[derive(Debug, Default, Clone)]
pub struct BoolWeight;

impl BoolWeight {
    pub fn new() -> Self {
        BoolWeight
    }
}

impl Weight for BoolWeight {
    fn init(&mut self, _factor: f64, _stats: &CollectionStats) {}

    fn sum_part(&self, _wdf: u32, _doclen: u32, _unique_terms: u32) -> f64 {
        0.0
    }

    fn max_part(&self) -> f64 {
        0.0
    }

    fn sum_extra(&self, _doclen: u32, _unique_terms: u32) -> f64 {
        0.0
    }

    fn max_extra(&self) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "bool"
    }

    fn serialise(&self) -> Vec<u8> {
        Vec::new()
    }

    fn unserialise(&self, data: &[u8]) -> Result<Box<dyn Weight>> {
        if !data.is_empty() {
            return Err(crate::Error::Serialisation(format!(
                "bool expects no parameter bytes, got {}",
                data.len()
            )));
        }
        Ok(Box::new(BoolWeight))
    }
}
