// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bit-level codec for sorted position sequences.
//!
//! [`BitWriter::encode`] packs a value drawn from `[0, outof)` into the
//! minimal number of bits that can disambiguate `outof` distinct values -
//! not fixed-width: when `outof` is not a power of two there are spare
//! codes, and values in the middle of the range borrow them to save a bit.
//! The same deterministic formula runs on both sides, so no model or table
//! crosses the wire. The LSB goes first in the stream, which means the
//! shortened codes must be suffix-free rather than prefix-free.
//!
//! On top of that sits binary interpolative coding: encode the middle
//! element of a sorted range against the bounds its already-encoded
//! neighbours imply, then recurse. Clustered positions collapse to almost
//! nothing. The decoder mirrors the recursion with an explicit stack and
//! yields positions lazily in ascending order, so a caller that stops after
//! two positions pays for two positions.
//!
//! The exact bit layout is a format compatibility contract. Change it and
//! every stored position list in existence becomes garbage.

use crate::error::{Error, Result};

/// Position of the most significant set bit, counting from 1 (0 if none).
#[inline]
fn highest_order_bit(value: u64) -> u32 {
    64 - value.leading_zeros()
}

/// Codes shorter than `outof` values exist when `outof` isn't a power of
/// two; this many values get one fewer bit.
#[inline]
fn spare_codes(outof: u64, bits: u32) -> u64 {
    // 1 << 64 needs the wider type when outof - 1 uses all 64 bits.
    ((1u128 << bits) - u128::from(outof)) as u64
}

// ============================================================================
// WRITER
// ============================================================================

/// Append-only bit buffer with a sub-byte write cursor.
#[derive(Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    acc: u64,
    n_bits: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter::default()
    }

    /// Append `value`, drawn from `[0, outof)`, using the minimal-bits
    /// range split. `value >= outof` is caller error.
    pub fn encode(&mut self, mut value: u64, outof: u64) -> Result<()> {
        if outof == 0 || value >= outof {
            return Err(crate::error::precondition("encode: value out of range"));
        }
        let mut bits = highest_order_bit(outof - 1);
        let spare = spare_codes(outof, bits);
        if spare != 0 {
            // Values in the middle of the range take one fewer bit; testing
            // on positional data shows the middle beats shortening the ends.
            let mid_start = (outof - spare) / 2;
            if value >= mid_start + spare {
                value = (value - (mid_start + spare)) | (1 << (bits - 1));
            } else if value >= mid_start {
                bits -= 1;
            }
        }

        if bits + self.n_bits > 64 {
            // More bits than the accumulator has room for: shift out one
            // byte, then carry on with 8 fewer bits.
            self.acc |= value << self.n_bits;
            self.buf.push(self.acc as u8);
            self.acc >>= 8;
            value >>= 8;
            bits -= 8;
        }
        self.acc |= value << self.n_bits;
        self.n_bits += bits;
        while self.n_bits >= 8 {
            self.buf.push(self.acc as u8);
            self.acc >>= 8;
            self.n_bits -= 8;
        }
        Ok(())
    }

    /// Interpolative-encode `pos[j..=k]`, assuming `pos[j]` and `pos[k]`
    /// are already known to the decoder. `pos` must be strictly increasing.
    pub fn encode_interpolative(&mut self, pos: &[u32], mut j: usize, k: usize) -> Result<()> {
        while j + 1 < k {
            let mid = j + (k - j) / 2;
            // One out of (pos[k] - pos[j] + 1) values, less the slots the
            // intervening positions must fit into.
            let outof = u64::from(pos[k] - pos[j]) - (k - j) as u64 + 1;
            let lowest = pos[j] + (mid - j) as u32;
            self.encode(u64::from(pos[mid] - lowest), outof)?;
            self.encode_interpolative(pos, j, mid)?;
            j = mid;
        }
        Ok(())
    }

    /// Flush the partial final byte (zero-padded on the unused high bits)
    /// and hand over the buffer.
    pub fn freeze(mut self) -> Vec<u8> {
        if self.n_bits > 0 {
            self.buf.push(self.acc as u8);
        }
        self.buf
    }
}

// ============================================================================
// READER
// ============================================================================

/// Stack frame for the lazy interpolative decode: an index range `[j, k]`
/// whose boundary positions are already known.
#[derive(Debug, Clone, Copy)]
struct DiFrame {
    j: usize,
    k: usize,
    pos_j: u32,
    pos_k: u32,
}

impl DiFrame {
    #[inline]
    fn outof(&self) -> u64 {
        u64::from(self.pos_k - self.pos_j) - (self.k - self.j) as u64 + 1
    }

    /// True if this range still has undecoded interior elements.
    #[inline]
    fn has_interior(&self) -> bool {
        self.j + 1 < self.k
    }
}

/// Bounds-checked bit cursor over an encoded buffer.
///
/// Never reads past the buffer: a decode that would is
/// [`Error::CorruptEncoding`]. After a full decode, [`check_all_gone`]
/// reports whether every data bit was consumed and the trailing padding
/// bits are zero - a nonzero trailing bit is corruption.
///
/// [`check_all_gone`]: BitReader::check_all_gone
#[derive(Debug)]
pub struct BitReader {
    data: Vec<u8>,
    idx: usize,
    acc: u64,
    n_bits: u32,
    di_stack: Vec<DiFrame>,
    di_current: Option<DiFrame>,
}

impl BitReader {
    pub fn new(data: Vec<u8>) -> Self {
        BitReader {
            data,
            idx: 0,
            acc: 0,
            n_bits: 0,
            di_stack: Vec::new(),
            di_current: None,
        }
    }

    /// Read `count` raw bits, LSB-first.
    pub fn read_bits(&mut self, count: u32) -> Result<u64> {
        if count > 64 - 7 {
            // Split so refilling the accumulator can't overflow it.
            let half = 32;
            let low = self.read_bits(half)?;
            return Ok(low | (self.read_bits(count - half)? << half));
        }
        while self.n_bits < count {
            let byte = *self.data.get(self.idx).ok_or_else(|| {
                Error::CorruptEncoding("bitstream truncated".to_string())
            })?;
            self.idx += 1;
            self.acc |= u64::from(byte) << self.n_bits;
            self.n_bits += 8;
        }
        let result = self.acc & ((1u64 << count) - 1);
        self.acc >>= count;
        self.n_bits -= count;
        Ok(result)
    }

    /// Exact inverse of [`BitWriter::encode`] for matching `outof`.
    pub fn decode(&mut self, outof: u64) -> Result<u64> {
        if outof == 0 {
            return Err(crate::error::precondition("decode: outof must be nonzero"));
        }
        let bits = highest_order_bit(outof - 1);
        let spare = spare_codes(outof, bits);
        if spare == 0 {
            return self.read_bits(bits);
        }
        let mid_start = (outof - spare) / 2;
        let mut p = self.read_bits(bits - 1)?;
        if p < mid_start && self.read_bits(1)? != 0 {
            p += mid_start + spare;
        }
        Ok(p)
    }

    /// True once every data bit is consumed and only zero padding remains.
    pub fn check_all_gone(&self) -> bool {
        self.idx == self.data.len() && self.acc == 0
    }

    /// Begin a lazy interpolative decode of the index range `[j, k]`, whose
    /// boundary positions `pos_j` and `pos_k` are known out-of-band.
    pub fn decode_interpolative(&mut self, j: usize, k: usize, pos_j: u32, pos_k: u32) {
        self.di_stack.clear();
        self.di_current = Some(DiFrame { j, k, pos_j, pos_k });
    }

    /// Yield the next position, ascending. Produces `pos[j+1..=k]` - the
    /// caller already holds `pos[j]`. Returns `None` once exhausted.
    pub fn decode_interpolative_next(&mut self) -> Result<Option<u32>> {
        let Some(mut current) = self.di_current.take() else {
            return Ok(None);
        };
        loop {
            if current.has_interior() {
                // Pre-order: decode this range's midpoint, then descend left.
                let mid = current.j + (current.k - current.j) / 2;
                let lowest = current.pos_j + (mid - current.j) as u32;
                let pos_mid = self.decode(current.outof())? as u32 + lowest;
                self.di_stack.push(current);
                current = DiFrame {
                    j: current.j,
                    k: mid,
                    pos_j: current.pos_j,
                    pos_k: pos_mid,
                };
            } else {
                let pos_ret = current.pos_k;
                match self.di_stack.pop() {
                    Some(parent) => {
                        // Left subtree done: resume the parent on its right half.
                        let mid = parent.j + (parent.k - parent.j) / 2;
                        self.di_current = Some(DiFrame {
                            j: mid,
                            k: parent.k,
                            pos_j: pos_ret,
                            pos_k: parent.pos_k,
                        });
                    }
                    None => {
                        // Traversal finished; this yields the final bound.
                        self.di_current = None;
                    }
                }
                return Ok(Some(pos_ret));
            }
        }
    }
}
