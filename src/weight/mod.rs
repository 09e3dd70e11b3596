// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The scoring contract, and why its upper bound matters.
//!
//! A weighting scheme turns per-document statistics into a partial score,
//! and - this is the part everything else leans on - promises an upper
//! bound on that score. The matcher prunes documents whose best possible
//! score can't reach the current top-K floor. If a scheme's
//! [`max_part`](Weight::max_part) ever understates what
//! [`sum_part`](Weight::sum_part) can return, pruning silently drops valid
//! results. That is a correctness bug in the scheme, not in the matcher.
//!
//! Bounds must therefore be *analytic*: derived from the scheme's formula
//! and the collection's known extremes (shortest possible document, largest
//! possible wdf), never from whatever documents happen to have been seen so
//! far. Shorter documents can always turn up later.
//!
//! Schemes are stateless per query once [`init`](Weight::init) has run:
//! `sum_part` is a pure function of its inputs plus the per-query constants
//! computed in `init`.

mod bool_weight;
mod coord;
mod dice;

pub use bool_weight::BoolWeight;
pub use coord::CoordWeight;
pub use dice::DiceCoeffWeight;

use crate::error::Result;
use crate::types::CollectionStats;

/// Per-query scoring contract.
///
/// Lifecycle: construct with scheme parameters, [`init`](Weight::init) once
/// with the query's weighting factor and collection statistics, then score.
/// `max_part`/`max_extra` are fixed after `init` - tightening of composite
/// bounds happens at the postlist level, never inside a scheme.
pub trait Weight {
    /// Prepare per-query constant state. `factor` scales every part this
    /// scheme returns; the stats supply the collection extremes bounds are
    /// derived from. Must be called before any scoring method.
    fn init(&mut self, factor: f64, stats: &CollectionStats);

    /// This term's contribution to a document's score.
    fn sum_part(&self, wdf: u32, doclen: u32, unique_terms: u32) -> f64;

    /// Upper bound on [`sum_part`](Weight::sum_part) over every valid input.
    /// Must hold unconditionally.
    fn max_part(&self) -> f64;

    /// Document-level (not per-term) contribution.
    fn sum_extra(&self, doclen: u32, unique_terms: u32) -> f64;

    /// Upper bound on [`sum_extra`](Weight::sum_extra).
    fn max_extra(&self) -> f64;

    /// Scheme identity, used to pair with serialised parameters.
    fn name(&self) -> &'static str;

    /// Scheme parameters as bytes, for crossing a shard boundary unmodified.
    fn serialise(&self) -> Vec<u8>;

    /// Rebuild a scheme of this kind from serialised parameters. The new
    /// instance still needs [`init`](Weight::init). Malformed input - wrong
    /// length, trailing bytes - fails with `Serialisation` rather than
    /// being silently ignored.
    fn unserialise(&self, data: &[u8]) -> Result<Box<dyn Weight>>;
}

/// Read exactly one f64 parameter, rejecting short or trailing bytes.
pub(crate) fn unserialise_f64(name: &str, data: &[u8]) -> Result<f64> {
    let bytes: [u8; 8] = data.try_into().map_err(|_| {
        crate::Error::Serialisation(format!(
            "{} expects 8 parameter bytes, got {}",
            name,
            data.len()
        ))
    })?;
    Ok(f64::from_le_bytes(bytes))
}
