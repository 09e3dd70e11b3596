//! Retrieval core for a sharded full-text index: posting iteration,
//! position decoding, weighting, and top-K selection.
//!
//! The storage layer (not this crate) resolves a term to its per-shard
//! posting data; this crate turns that data into a ranked result set.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │  binary/     │────▶│  positions.rs │     │  weight/     │
//! │ (BitWriter,  │     │ (PositionList,│     │ (Weight,     │
//! │  BitReader)  │     │  encode)      │     │  DiceCoeff)  │
//! └──────────────┘     └───────┬───────┘     └──────┬───────┘
//!                              │                    │
//!                              ▼                    ▼
//!                      ┌───────────────────────────────────┐
//!                      │            postlist/              │
//!                      │ (PostList, LeafPostList,          │
//!                      │  MultiPostList - shard interleave)│
//!                      └───────────────┬───────────────────┘
//!                                      │
//!                                      ▼
//!                      ┌───────────────────────────────────┐
//!                      │            matcher.rs             │
//!                      │ (evaluate: bound-pruned top-K,    │
//!                      │  MSet)                            │
//!                      └───────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use quern::{evaluate, CollectionStats, DiceCoeffWeight, LeafPostList,
//!             MultiPostList, PostingStat, RawPosting};
//! # use quern::DocId;
//!
//! let entries = vec![RawPosting {
//!     docid: DocId::new(1).unwrap(),
//!     wdf: 2,
//!     doclen: 10,
//!     unique_terms: 8,
//!     positions: Vec::new(),
//! }];
//! let stat = PostingStat { termfreq: 1, collection_freq: 2 };
//! let mut shard = LeafPostList::new(stat, entries).unwrap();
//! shard.attach_weight(
//!     Box::new(DiceCoeffWeight::new()),
//!     1.0,
//!     &CollectionStats::unknown(2),
//! );
//! let mut postlist = MultiPostList::new(vec![shard]).unwrap();
//! let mset = evaluate(&mut postlist, 10).unwrap();
//! assert_eq!(mset.entries.len(), 1);
//! ```
//!
//! # Scope
//!
//! Query parsing, operator trees (AND/OR/phrase), the storage backends, and
//! text analysis all live elsewhere. This crate only assumes it is handed
//! postings sorted by docid and statistics that are exact.

// Module declarations
pub mod binary;
mod error;
pub mod matcher;
pub mod positions;
pub mod postlist;
mod types;
pub mod weight;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use binary::{BitReader, BitWriter};
pub use error::{Error, Result};
pub use matcher::{evaluate, evaluate_with, MSet, ResultEntry};
pub use positions::{encode_positions, PositionList};
pub use postlist::{LeafPostList, MultiPostList, PostList};
pub use types::{CollectionStats, DocId, PostingStat, RawPosting};
pub use weight::{BoolWeight, CoordWeight, DiceCoeffWeight, Weight};
