/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Minimal binary codes.
//!
//! A minimal binary code with upper bound `u > 0` (AKA [truncated binary
//! encoding](https://en.wikipedia.org/wiki/Truncated_binary_encoding)) is an
//! optimal prefix-free code for the first `u` natural numbers with uniform distribution.
//!
//! There are several such prefix-free codes, and the one implemented here is
//! defined as follows: if `s = ⌊log₂u⌋`, then the first `2^(s+1) - u` codewords are
//! the first binary numbers of length `s`, and the remaining codewords
//! are the last `2u - 2^(s+1)` binary numbers of length `s + 1`.
//!
//! Long codewords are written as an `s`-bit field followed by a 1-bit
//! field, so in [`L2M`](BitOrder::L2M) order their last bit ends up at the
//! head of the codeword.
//!
//! Bounds are handled internally with 128-bit arithmetic, as the buckets of
//! [ζ codes](super::zeta) can be wider than 64 bits.

use super::*;
use crate::traits::BitOrder;

#[inline(always)]
fn ensure_max(max: u128) {
    assert!(max > 0, "max = {}", max);
}

/// Return `⌊log₂ max⌋` and the number of short codewords.
#[inline(always)]
fn split(max: u128) -> (usize, u128) {
    let l = max.ilog2();
    // 2^(l+1) might not be representable, but the difference is
    (l as usize, (2_u128 << l).wrapping_sub(max))
}

#[inline]
pub(crate) fn len_wide(n: u128, max: u128) -> usize {
    let (l, limit) = split(max);
    if n >= limit { l + 1 } else { l }
}

#[inline]
pub(crate) fn write_wide(buf: &mut BitBuf, n: u128, max: u128, order: BitOrder) {
    ensure_max(max);
    debug_assert!(n < max, "{} >= {}", n, max);
    let (l, limit) = split(max);
    if n < limit {
        buf.write_fixed(n, l, order);
    } else {
        let to_write = n + limit;
        buf.write_fixed(to_write >> 1, l, order);
        buf.write_fixed(to_write & 1, 1, order);
    }
}

#[inline]
pub(crate) fn read_wide(buf: &mut BitBuf, max: u128, order: BitOrder) -> Result<u128, DecodeError> {
    ensure_max(max);
    let (l, limit) = split(max);
    let prefix = buf.read_fixed(l, order)?;
    Ok(if prefix < limit {
        prefix
    } else {
        let prefix = prefix.wrapping_shl(1) | buf.read_fixed(1, order)?;
        prefix.wrapping_sub(limit)
    })
}

/// Return the length of the minimal binary code for `n` with upper bound `max`.
#[must_use]
#[inline]
pub fn len_minimal_binary(n: u64, max: u64) -> usize {
    if max == 0 {
        return 0;
    }
    len_wide(n as u128, max as u128)
}

/// Append the minimal binary code of `n` with upper bound `max` to `buf`.
///
/// # Panics
///
/// If `max` is zero, if `n` is not smaller than `max`, or if the codeword
/// does not fit in the buffer.
#[inline]
pub fn write_minimal_binary(buf: &mut BitBuf, n: u64, max: u64, order: BitOrder) {
    assert!(n < max, "{} >= {}", n, max);
    write_wide(buf, n as u128, max as u128, order);
}

/// Consume a minimal binary code with upper bound `max` from `buf`.
///
/// # Panics
///
/// If `max` is zero.
#[inline]
pub fn read_minimal_binary(buf: &mut BitBuf, max: u64, order: BitOrder) -> Result<u64, DecodeError> {
    // values are smaller than max
    read_wide(buf, max as u128, order).map(|n| n as u64)
}

/// Return the minimal binary codeword of `n` with upper bound `max`.
///
/// # Panics
///
/// If `max` is zero.
pub fn encode_minimal_binary(n: u64, max: u64, order: BitOrder) -> Result<BitBuf, EncodeError> {
    ensure_max(max as u128);
    if n >= max {
        return Err(EncodeError::ValueOutOfRange { value: n, max });
    }
    encode_with(len_minimal_binary(n, max), |buf| {
        write_minimal_binary(buf, n, max, order)
    })
}

/// Decode a minimal binary codeword with upper bound `max` from the start
/// of `buf`.
///
/// # Panics
///
/// If `max` is zero.
pub fn decode_minimal_binary(
    buf: &mut BitBuf,
    max: u64,
    order: BitOrder,
) -> Result<Decoded, DecodeError> {
    decode_with(buf, |buf| read_minimal_binary(buf, max, order))
}
