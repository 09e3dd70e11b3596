// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Position data for one (term, document) pair.
//!
//! The container format keeps the cheap questions cheap. A varint header
//! carries the count, the first position, and the span to the last position;
//! only the interior positions go through the bit-level interpolative codec.
//! So [`PositionList::approx_size`] - which phrase matching uses to pick the
//! cheapest term to drive from - reads one varint and touches no bitstream.
//!
//! Layout:
//! - count: varint
//! - first: varint (if count >= 1)
//! - last - first: varint (if count >= 2)
//! - interior positions: interpolative bitstream (if count >= 3)
//!
//! The cursor is forward-only. There is no rewind; callers wanting a second
//! pass decode a fresh list from the same bytes.

use crate::binary::{decode_varint, encode_varint, BitReader, BitWriter, MAX_POSITION_COUNT};
use crate::error::{precondition, Error, Result};

/// Encode a strictly increasing sequence of 1-based positions.
///
/// Duplicate or decreasing positions are an indexer bug, rejected with
/// `InvalidArgument` rather than silently coalesced - coalescing is the
/// indexer's job, before the data gets here.
pub fn encode_positions(positions: &[u32]) -> Result<Vec<u8>> {
    if positions.len() as u64 > u64::from(MAX_POSITION_COUNT) {
        return Err(Error::InvalidArgument(format!(
            "position list too long: {}",
            positions.len()
        )));
    }
    if positions.first().is_some_and(|&p| p == 0) {
        return Err(Error::InvalidArgument("positions are 1-based".to_string()));
    }
    if positions.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidArgument(
            "positions must be strictly increasing".to_string(),
        ));
    }

    let mut buf = Vec::new();
    encode_varint(positions.len() as u64, &mut buf);
    if let Some(&first) = positions.first() {
        encode_varint(u64::from(first), &mut buf);
    }
    if positions.len() >= 2 {
        let first = positions[0];
        let last = positions[positions.len() - 1];
        encode_varint(u64::from(last - first), &mut buf);
        if positions.len() > 2 {
            let mut writer = BitWriter::new();
            writer.encode_interpolative(positions, 0, positions.len() - 1)?;
            buf.extend_from_slice(&writer.freeze());
        }
    }
    Ok(buf)
}

/// Cursor state: before the first position, on a position, or past the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeStart,
    At(u32),
    AtEnd,
}

/// Forward-only cursor over one document's positions for one term.
///
/// Starts *before* the first position: call [`next`](PositionList::next) or
/// [`skip_to`](PositionList::skip_to) before [`position`](PositionList::position).
/// Decodes lazily - positions are pulled from the bitstream as the cursor
/// advances, never all at once.
#[derive(Debug)]
pub struct PositionList {
    count: u32,
    emitted: u32,
    first: u32,
    reader: Option<BitReader>,
    cursor: Cursor,
}

impl PositionList {
    /// Open a cursor over encoded position data.
    ///
    /// An empty buffer means "no positions stored", which is valid.
    /// Anything else malformed is `CorruptEncoding`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(PositionList {
                count: 0,
                emitted: 0,
                first: 0,
                reader: None,
                cursor: Cursor::BeforeStart,
            });
        }

        let (count, mut at) = decode_varint(bytes)?;
        if count > u64::from(MAX_POSITION_COUNT) {
            return Err(Error::CorruptEncoding(format!(
                "position count {} exceeds limit",
                count
            )));
        }
        let count = count as u32;

        let mut first = 0u32;
        if count >= 1 {
            let (value, used) = decode_varint(&bytes[at..])?;
            at += used;
            if value == 0 || value > u64::from(u32::MAX) {
                return Err(Error::CorruptEncoding(format!(
                    "first position {} out of range",
                    value
                )));
            }
            first = value as u32;
        }

        let mut reader = None;
        if count >= 2 {
            let (span, used) = decode_varint(&bytes[at..])?;
            at += used;
            // The span must leave room for count strictly increasing values.
            if span < u64::from(count) - 1 || u64::from(first) + span > u64::from(u32::MAX) {
                return Err(Error::CorruptEncoding(format!(
                    "position span {} cannot hold {} positions",
                    span, count
                )));
            }
            let last = first + span as u32;
            let mut r = BitReader::new(bytes[at..].to_vec());
            r.decode_interpolative(0, count as usize - 1, first, last);
            reader = Some(r);
        } else if at != bytes.len() {
            return Err(Error::CorruptEncoding(
                "trailing bytes after position header".to_string(),
            ));
        }

        Ok(PositionList {
            count,
            emitted: 0,
            first,
            reader,
            cursor: Cursor::BeforeStart,
        })
    }

    /// Total number of positions in the list.
    ///
    /// Available without touching the bitstream, and never less than the
    /// number of positions remaining - callers use it for cost estimation.
    pub fn approx_size(&self) -> u32 {
        self.count
    }

    /// Advance to the next position. Returns it, or `None` at the end.
    pub fn next(&mut self) -> Result<Option<u32>> {
        if self.emitted == self.count {
            self.finish()?;
            return Ok(None);
        }
        let pos = if self.emitted == 0 {
            self.first
        } else {
            // The interpolative decoder yields everything after `first`,
            // including the final bound.
            match &mut self.reader {
                Some(reader) => match reader.decode_interpolative_next()? {
                    Some(pos) => pos,
                    None => {
                        return Err(Error::CorruptEncoding(
                            "position bitstream ended early".to_string(),
                        ))
                    }
                },
                None => {
                    return Err(Error::CorruptEncoding(
                        "position count disagrees with payload".to_string(),
                    ))
                }
            }
        };
        self.emitted += 1;
        self.cursor = Cursor::At(pos);
        Ok(Some(pos))
    }

    /// Advance to the first position >= `target`. Forward-only: if the
    /// cursor is already at or past `target`, this is a no-op returning the
    /// current position.
    pub fn skip_to(&mut self, target: u32) -> Result<Option<u32>> {
        if let Cursor::At(current) = self.cursor {
            if current >= target {
                return Ok(Some(current));
            }
        }
        loop {
            match self.next()? {
                Some(pos) if pos >= target => return Ok(Some(pos)),
                Some(_) => {}
                None => return Ok(None),
            }
        }
    }

    /// The current position. Only valid after a successful `next`/`skip_to`.
    pub fn position(&self) -> Result<u32> {
        match self.cursor {
            Cursor::At(pos) => Ok(pos),
            Cursor::BeforeStart => Err(precondition("position() before first next()")),
            Cursor::AtEnd => Err(precondition("position() after end of list")),
        }
    }

    /// True once iteration has moved past the last position.
    pub fn at_end(&self) -> bool {
        self.cursor == Cursor::AtEnd
    }

    /// On the transition past the last entry, verify the stream was
    /// consumed exactly: leftover data bits or nonzero padding is corruption.
    fn finish(&mut self) -> Result<()> {
        if self.cursor != Cursor::AtEnd {
            self.cursor = Cursor::AtEnd;
            if let Some(reader) = &self.reader {
                if !reader.check_all_gone() {
                    return Err(Error::CorruptEncoding(
                        "trailing data after position list".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
