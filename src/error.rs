// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the retrieval core.
//!
//! Four failure classes, and it matters which one you get:
//!
//! - [`Error::CorruptEncoding`]: the bytes on disk are wrong. Fatal for that
//!   term's postings, retrying will not help. Unrelated terms are unaffected.
//! - [`Error::Precondition`]: the *caller* is wrong - reading a cursor before
//!   positioning it, advancing past the end. A bug, not a data problem.
//! - [`Error::Serialisation`]: a weighting scheme's parameters failed to
//!   round-trip across a shard boundary.
//! - [`Error::InvalidArgument`]: a request that can never be satisfied
//!   (zero shards, zero result slots).
//!
//! Errors abort the query they occur in and surface to the caller. A failed
//! query never returns a partial result set.

use thiserror::Error;

/// Main error type for retrieval operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The bit-level decoder hit truncated or malformed data.
    #[error("corrupt encoding: {0}")]
    CorruptEncoding(String),

    /// An API contract was violated by the caller.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    /// Weighting scheme parameters failed to round-trip.
    #[error("serialisation error: {0}")]
    Serialisation(String),

    /// A request that can never be satisfied, regardless of data.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Flag an API-misuse condition.
///
/// Returned (not panicked) so release callers get a defined error. Tests
/// exercise these paths directly, so no `debug_assert!` here.
#[inline]
pub(crate) fn precondition(msg: &'static str) -> Error {
    Error::Precondition(msg)
}
