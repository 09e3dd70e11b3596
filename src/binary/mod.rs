// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives for posting data.
//!
//! Two codecs live here. Varint for the byte-aligned headers (counts, first
//! and last positions) where sub-byte packing buys nothing. The bit-level
//! interpolative codec in [`bits`] for the position sequences themselves,
//! where it buys a lot: position lists cluster hard, and interpolative
//! coding gets within a whisker of entropy on clustered data.
//!
//! Everything here decodes untrusted bytes. All counts are validated against
//! the `MAX_*` guard limits before allocation, and every read is
//! bounds-checked - a truncated or malformed buffer yields
//! [`Error::CorruptEncoding`](crate::Error::CorruptEncoding), never a panic.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer
//!   encoding. See Google Protocol Buffers encoding:
//!   <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **Binary Interpolative Coding**: Moffat & Stuiver (2000), "Binary
//!   Interpolative Coding for Effective Index Compression"; also "Managing
//!   Gigabytes" (Witten, Moffat, Bell), 2nd edition pp. 126-127.

mod bits;

pub use bits::{BitReader, BitWriter};

use crate::error::{Error, Result};

// ============================================================================
// GUARD LIMITS
// ============================================================================

/// Maximum bytes in a single varint (10 bytes covers u64).
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum entries in one position list. Generous: a position is at least
/// one token, and no document has four billion tokens. Anything above this
/// is corruption, not data.
pub const MAX_POSITION_COUNT: u32 = 1 << 28;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes.
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed).
///
/// Fails on an empty buffer, a buffer ending mid-varint, or a varint longer
/// than [`MAX_VARINT_BYTES`] (malformed or malicious input).
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(Error::CorruptEncoding("empty buffer for varint".to_string()));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= u64::from(byte & 0x7F) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(Error::CorruptEncoding(
            "varint exceeds maximum length (possible corruption)".to_string(),
        ))
    } else {
        Err(Error::CorruptEncoding("incomplete varint".to_string()))
    }
}
