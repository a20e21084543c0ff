/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Elias δ code.
//!
//! The δ code of a natural number `n` is the concatenation of the
//! [γ](super::gamma) code of `⌊log₂(n + 1)⌋` and the binary representation of
//! `n + 1` with the most significant bit removed.

use super::*;
use crate::traits::BitOrder;

/// Return the length of the δ code for `n`.
#[must_use]
#[inline]
pub fn len_delta(n: u64) -> usize {
    let l = (n as u128 + 1).ilog2();
    l as usize + len_gamma(l as u64)
}

/// Append the δ code of `n` to `buf`.
///
/// # Panics
///
/// If the codeword does not fit in the buffer.
#[inline]
pub fn write_delta(buf: &mut BitBuf, n: u64, order: BitOrder) {
    let n = n as u128 + 1;
    let number_of_bits_to_write = n.ilog2();
    write_gamma(buf, number_of_bits_to_write as u64, order);
    buf.write_fixed(
        n ^ (1 << number_of_bits_to_write),
        number_of_bits_to_write as usize,
        order,
    );
}

/// Consume a δ code from `buf`.
#[inline]
pub fn read_delta(buf: &mut BitBuf, order: BitOrder) -> Result<u64, DecodeError> {
    let len = read_gamma(buf, order)?;
    if len == 0 {
        return Ok(0);
    }
    if len as usize > buf.len() {
        return Err(DecodeError::Incomplete);
    }
    let s = buf.read_fixed(len as usize, order)?;
    to_value(s + (1 << len) - 1)
}

/// Return the δ codeword of `n`.
pub fn encode_delta(n: u64, order: BitOrder) -> Result<BitBuf, EncodeError> {
    encode_with(len_delta(n), |buf| write_delta(buf, n, order))
}

/// Decode a δ codeword from the start of `buf`.
pub fn decode_delta(buf: &mut BitBuf, order: BitOrder) -> Result<Decoded, DecodeError> {
    decode_with(buf, |buf| read_delta(buf, order))
}
